use tracing::warn;

use crate::console::Console;
use crate::error::ConsoleError;
use crate::gateway::{Connection, GatewayError, Session};
use crate::selector::show_databases;

/// Server-internal schemas that are never offered for selection.
pub const RESERVED_DATABASES: &[&str] =
    &["information_schema", "performance_schema", "mysql", "sys"];

pub fn is_reserved(name: &str) -> bool {
    RESERVED_DATABASES.contains(&name)
}

pub fn filter_databases(names: Vec<String>) -> Vec<String> {
    names.into_iter().filter(|name| !is_reserved(name)).collect()
}

pub fn fetch_databases<C: Connection>(
    session: &mut Session<C>,
) -> Result<Vec<String>, GatewayError> {
    Ok(filter_databases(session.list_databases()?))
}

/// Lists and shows the user databases. A listing failure is reported on its
/// own and treated as an empty catalog.
pub fn list_databases<C: Connection>(
    session: &mut Session<C>,
    console: &mut dyn Console,
) -> Result<Vec<String>, ConsoleError> {
    match fetch_databases(session) {
        Ok(names) => {
            show_databases(&names, console)?;
            Ok(names)
        }
        Err(err) => {
            warn!(error = %err, "listing databases failed");
            console.println(&format!("Error listing databases: {}", err))?;
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::StdioConsole;
    use crate::gateway::fake::FakeConnection;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn filter_drops_reserved_and_keeps_order() {
        let filtered =
            filter_databases(names(&["information_schema", "sales", "mysql", "inventory"]));

        assert_eq!(filtered, vec!["sales", "inventory"]);
    }

    #[test]
    fn filter_is_idempotent() {
        let once = filter_databases(names(&["sys", "b", "performance_schema", "a"]));
        let twice = filter_databases(once.clone());

        assert_eq!(once, twice);
        assert_eq!(twice, vec!["b", "a"]);
    }

    #[test]
    fn filter_is_case_sensitive() {
        let filtered = filter_databases(names(&["MySQL", "SYS", "mysql"]));

        assert_eq!(filtered, vec!["MySQL", "SYS"]);
    }

    #[test]
    fn list_databases_returns_user_databases() -> Result<(), ConsoleError> {
        let mut session = Session::new(
            "localhost",
            "root",
            FakeConnection::with_databases(&["information_schema", "sales", "sys", "inventory"]),
        );
        let mut console = StdioConsole::new(&b""[..], Vec::new());

        let databases = list_databases(&mut session, &mut console)?;

        assert_eq!(databases, vec!["sales", "inventory"]);
        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output, "\nAvailable Databases:\n1. sales\n2. inventory\n");
        Ok(())
    }

    #[test]
    fn listing_failure_is_reported_as_empty() -> Result<(), ConsoleError> {
        let connection = FakeConnection {
            listing_error: Some("Access denied".into()),
            ..FakeConnection::default()
        };
        let mut session = Session::new("localhost", "root", connection);
        let mut console = StdioConsole::new(&b""[..], Vec::new());

        let databases = list_databases(&mut session, &mut console)?;

        assert!(databases.is_empty());
        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.starts_with("Error listing databases: "));
        assert!(output.contains("Access denied"));
        assert!(!output.contains("Available Databases"));
        assert!(!output.contains("No databases available."));
        Ok(())
    }

    #[test]
    fn empty_catalog_is_still_shown() -> Result<(), ConsoleError> {
        let mut session = Session::new(
            "localhost",
            "root",
            FakeConnection::with_databases(&["mysql", "sys"]),
        );
        let mut console = StdioConsole::new(&b""[..], Vec::new());

        let databases = list_databases(&mut session, &mut console)?;

        assert!(databases.is_empty());
        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output, "\nAvailable Databases:\nNo databases available.\n");
        Ok(())
    }
}
