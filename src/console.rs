use std::borrow::Cow;
use std::io::IsTerminal;
use std::io::{self, BufRead, Write};

use reedline::{
    ColumnarMenu, DefaultCompleter, Emacs, ExampleHighlighter, KeyCode, KeyModifiers, MenuBuilder,
    Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};

use crate::args::Args;
use crate::error::ConsoleError;
use crate::gateway::{self, Connection, Session};
use crate::{catalog, dispatcher, selector};

/// Line based conversation with the user.
pub trait Console {
    /// Shows the prompt and reads one line. `None` once the input is closed.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ConsoleError>;

    fn print(&mut self, text: &str) -> Result<(), ConsoleError>;

    fn println(&mut self, line: &str) -> Result<(), ConsoleError> {
        self.print(line)?;
        self.print("\n")
    }
}

pub struct StdioConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StdioConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for StdioConsole<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ConsoleError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.strip_suffix('\n').unwrap_or(&line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        Ok(Some(line.to_string()))
    }

    fn print(&mut self, text: &str) -> Result<(), ConsoleError> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }
}

pub struct LineEditorConsole {
    line_editor: Reedline,
}

impl LineEditorConsole {
    pub fn new() -> Self {
        let commands_to_complete = vec![
            "SELECT".into(),
            "UPDATE".into(),
            "DELETE".into(),
            "INSERT".into(),
            "INTO".into(),
            "VALUES".into(),
            "FROM".into(),
            "WHERE".into(),
            "GROUP BY".into(),
            "ORDER BY".into(),
            "HAVING".into(),
            "LIMIT".into(),
            "DESCRIBE".into(),
            "SHOW".into(),
            "TABLES".into(),
            "exit".into(),
        ];
        let completer = DefaultCompleter::new_with_wordlen(commands_to_complete, 2);
        let completion_menu = Box::new(ColumnarMenu::default().with_name("completion_menu"));
        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu("completion_menu".to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let commands_to_highlight = vec![
            "SELECT".into(),
            "UPDATE".into(),
            "DELETE".into(),
            "INSERT".into(),
            "DESCRIBE".into(),
            "SHOW".into(),
        ];
        let highlighter = Box::new(ExampleHighlighter::new(commands_to_highlight));

        let edit_mode = Box::new(Emacs::new(keybindings));
        let line_editor = Reedline::create()
            .with_completer(Box::new(completer))
            .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
            .with_edit_mode(edit_mode)
            .with_highlighter(highlighter);

        Self { line_editor }
    }
}

impl Default for LineEditorConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for LineEditorConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ConsoleError> {
        match self.line_editor.read_line(&LinePrompt(prompt))? {
            Signal::Success(line) => Ok(Some(line)),
            Signal::CtrlD | Signal::CtrlC => Ok(None),
        }
    }

    fn print(&mut self, text: &str) -> Result<(), ConsoleError> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

/// Shows the prompt text as is, with no mode indicator after it.
struct LinePrompt<'a>(&'a str);

impl Prompt for LinePrompt<'_> {
    fn render_prompt_left(&self) -> Cow<str> {
        Cow::Borrowed(self.0)
    }

    fn render_prompt_right(&self) -> Cow<str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<str> {
        Cow::Borrowed("")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!("({}reverse-search: {}) ", prefix, history_search.term))
    }
}

pub fn work_on_console(args: &Args) -> Result<(), ConsoleError> {
    let mut console: Box<dyn Console> = if io::stdout().is_terminal() && io::stdin().is_terminal()
    {
        Box::new(LineEditorConsole::new())
    } else {
        Box::new(StdioConsole::new(io::stdin().lock(), io::stdout()))
    };

    let mut session = gateway::connect(&args.host, &args.user, &args.password)
        .map_err(ConsoleError::Connection)?;
    console.println("Successfully connected to MySQL server")?;

    let result = run_session(&mut session, console.as_mut());
    session.disconnect();
    result
}

/// Lists the databases, binds the session to the chosen one and runs
/// statements until the user exits.
pub fn run_session<C: Connection>(
    session: &mut Session<C>,
    console: &mut dyn Console,
) -> Result<(), ConsoleError> {
    let databases = catalog::list_databases(session, console)?;
    if databases.is_empty() {
        console.println("No databases available to choose from. Exiting.")?;
        return Ok(());
    }

    loop {
        let name = selector::select_one(&databases, console)?;
        match session.select_database(&name) {
            Ok(()) => {
                console.println(&format!("Using database: {}", name))?;
                break;
            }
            Err(err) => console.println(&format!("Error selecting database: {}", err))?,
        }
    }

    dispatcher::run(session, console)
}
