/// Prefixes of statements that change stored data and get committed.
pub const MUTATING_KEYWORDS: &[&str] = &["insert", "update", "delete"];

const DESCRIBE_KEYWORD: &str = "describe";
const EXIT_COMMAND: &str = "exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Mutating,
    Retrieving,
}

impl StatementKind {
    pub fn of(statement: &str) -> Self {
        let statement = normalize(statement);
        if MUTATING_KEYWORDS
            .iter()
            .any(|keyword| statement.starts_with(keyword))
        {
            StatementKind::Mutating
        } else {
            StatementKind::Retrieving
        }
    }
}

/// Describe statements render a table even when they return no rows.
pub fn is_describe(statement: &str) -> bool {
    normalize(statement).starts_with(DESCRIBE_KEYWORD)
}

pub fn is_exit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(EXIT_COMMAND)
}

fn normalize(statement: &str) -> String {
    statement.trim().to_lowercase()
}
