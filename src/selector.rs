use crate::console::Console;
use crate::error::ConsoleError;

const PROMPT: &str = "Enter the number of the database you want to use: ";
const NOT_A_NUMBER: &str = "Please enter a valid number.";
const OUT_OF_RANGE: &str = "Invalid choice. Please select a valid number.";

#[derive(Debug, PartialEq, Eq)]
pub enum Choice {
    /// Zero based index into the list.
    Accepted(usize),
    NotANumber,
    OutOfRange,
}

/// Reads a 1-based choice among `count` entries.
pub fn parse_choice(input: &str, count: usize) -> Choice {
    let Ok(number) = input.trim().parse::<i64>() else {
        return Choice::NotANumber;
    };
    match usize::try_from(number) {
        Ok(number) if (1..=count).contains(&number) => Choice::Accepted(number - 1),
        _ => Choice::OutOfRange,
    }
}

pub fn show_databases(names: &[String], console: &mut dyn Console) -> Result<(), ConsoleError> {
    console.println("")?;
    console.println("Available Databases:")?;
    if names.is_empty() {
        console.println("No databases available.")?;
    }
    for (index, name) in names.iter().enumerate() {
        console.println(&format!("{}. {}", index + 1, name))?;
    }
    Ok(())
}

/// Prompts until the user picks one of `names`.
pub fn select_one(names: &[String], console: &mut dyn Console) -> Result<String, ConsoleError> {
    loop {
        let Some(line) = console.read_line(PROMPT)? else {
            return Err(ConsoleError::InputClosed);
        };
        match parse_choice(&line, names.len()) {
            Choice::Accepted(index) => return Ok(names[index].clone()),
            Choice::NotANumber => console.println(NOT_A_NUMBER)?,
            Choice::OutOfRange => console.println(OUT_OF_RANGE)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::StdioConsole;

    fn names() -> Vec<String> {
        vec!["sales".into(), "inventory".into()]
    }

    #[test]
    fn parse_choice_accepts_range() {
        assert_eq!(parse_choice("1", 2), Choice::Accepted(0));
        assert_eq!(parse_choice(" 2 ", 2), Choice::Accepted(1));
        assert_eq!(parse_choice("+2", 2), Choice::Accepted(1));
    }

    #[test]
    fn parse_choice_rejects_out_of_range() {
        assert_eq!(parse_choice("0", 2), Choice::OutOfRange);
        assert_eq!(parse_choice("3", 2), Choice::OutOfRange);
        assert_eq!(parse_choice("-1", 2), Choice::OutOfRange);
        assert_eq!(parse_choice("1", 0), Choice::OutOfRange);
    }

    #[test]
    fn parse_choice_rejects_non_numbers() {
        assert_eq!(parse_choice("abc", 2), Choice::NotANumber);
        assert_eq!(parse_choice("", 2), Choice::NotANumber);
        assert_eq!(parse_choice("1.5", 2), Choice::NotANumber);
    }

    #[test]
    fn select_one_reprompts_until_valid() -> Result<(), ConsoleError> {
        let mut console = StdioConsole::new(&b"abc\n5\n2\n"[..], Vec::new());

        let chosen = select_one(&names(), &mut console)?;

        assert_eq!(chosen, "inventory");
        let output = String::from_utf8(console.into_output()).unwrap();
        let expected = format!(
            "{PROMPT}{NOT_A_NUMBER}\n{PROMPT}{OUT_OF_RANGE}\n{PROMPT}"
        );
        assert_eq!(output, expected);
        Ok(())
    }

    #[test]
    fn select_one_fails_when_input_closes() {
        let mut console = StdioConsole::new(&b"7\n"[..], Vec::new());

        let result = select_one(&names(), &mut console);

        assert!(matches!(result, Err(ConsoleError::InputClosed)));
    }

    #[test]
    fn show_databases_numbers_from_one() -> Result<(), ConsoleError> {
        let mut console = StdioConsole::new(&b""[..], Vec::new());

        show_databases(&names(), &mut console)?;

        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output, "\nAvailable Databases:\n1. sales\n2. inventory\n");
        Ok(())
    }

    #[test]
    fn show_databases_without_names() -> Result<(), ConsoleError> {
        let mut console = StdioConsole::new(&b""[..], Vec::new());

        show_databases(&[], &mut console)?;

        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output, "\nAvailable Databases:\nNo databases available.\n");
        Ok(())
    }
}
