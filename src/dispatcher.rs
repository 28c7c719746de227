use tracing::debug;

use crate::console::Console;
use crate::error::ConsoleError;
use crate::gateway::{Connection, ExecutionOutcome, Session};
use crate::statement::{is_describe, is_exit};
use crate::table::draw_table;

const PROMPT: &str = "Enter your SQL command (or type 'exit' to quit): ";

enum State {
    Prompting,
    Executing(String),
    Done,
}

/// Reads and runs statements until the user types `exit` or closes the
/// input. A failing statement is reported and the loop carries on.
pub fn run<C: Connection>(
    session: &mut Session<C>,
    console: &mut dyn Console,
) -> Result<(), ConsoleError> {
    let mut state = State::Prompting;
    loop {
        state = match state {
            State::Prompting => match console.read_line(PROMPT)? {
                Some(line) if !is_exit(&line) => State::Executing(line),
                _ => {
                    console.println("Exiting the SQL interface...")?;
                    State::Done
                }
            },
            State::Executing(statement) => {
                dispatch(session, &statement, console)?;
                State::Prompting
            }
            State::Done => return Ok(()),
        };
    }
}

pub fn dispatch<C: Connection>(
    session: &mut Session<C>,
    statement: &str,
    console: &mut dyn Console,
) -> Result<(), ConsoleError> {
    match session.execute(statement) {
        ExecutionOutcome::MutationAck { affected_rows } => {
            debug!(affected_rows, "statement applied");
            console.println("Command executed successfully")
        }
        ExecutionOutcome::ResultSet(results) => {
            if is_describe(statement) || !results.is_empty() {
                console.println("")?;
                console.print(&draw_table(&results))
            } else {
                console.println("No results found.")
            }
        }
        ExecutionOutcome::ExecutionError { message } => {
            console.println(&format!("Error executing command: {}", message))
        }
    }
}
