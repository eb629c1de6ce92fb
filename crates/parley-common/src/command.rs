use std::fmt;

/// A command after phrase translation: a case-folded verb and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCommand {
    pub verb: String,
    pub args: Vec<String>,
}

impl CanonicalCommand {
    /// Split `text` on whitespace. Returns `None` for blank input.
    pub fn parse(text: &str) -> Option<Self> {
        let mut tokens = text.split_whitespace();
        let verb = tokens.next()?.to_lowercase();
        let args = tokens.map(str::to_string).collect();
        Some(Self { verb, args })
    }

    /// The built-in this verb selects, if any.
    pub fn builtin(&self) -> Option<Builtin> {
        Builtin::from_verb(&self.verb)
    }
}

/// Outcome of a single dispatch.
///
/// `Exit` is kept apart from `Output` so that a command producing no text is
/// never mistaken for a request to end the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    Output(String),
    Exit,
}

impl CommandResult {
    pub fn empty() -> Self {
        CommandResult::Output(String::new())
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, CommandResult::Exit)
    }

    /// Text produced by the command, `None` for the exit signal.
    pub fn output(&self) -> Option<&str> {
        match self {
            CommandResult::Output(text) => Some(text),
            CommandResult::Exit => None,
        }
    }
}

impl From<String> for CommandResult {
    fn from(text: String) -> Self {
        CommandResult::Output(text)
    }
}

/// Stateless transports have no session to end; they render the signal as `exit`.
impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::Output(text) => f.write_str(text),
            CommandResult::Exit => f.write_str("exit"),
        }
    }
}

/// The closed set of built-in verbs. Anything else goes to the host shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    List,
    PrintWorkingDir,
    ChangeDir,
    MakeDir,
    RemoveDir,
    RemoveFile,
    Touch,
    Move,
    Copy,
    Cat,
    Echo,
    History,
    Clear,
    Cpu,
    Memory,
    Processes,
    Help,
    Exit,
}

impl Builtin {
    pub const ALL: [Builtin; 18] = [
        Builtin::List,
        Builtin::PrintWorkingDir,
        Builtin::ChangeDir,
        Builtin::MakeDir,
        Builtin::RemoveDir,
        Builtin::RemoveFile,
        Builtin::Touch,
        Builtin::Move,
        Builtin::Copy,
        Builtin::Cat,
        Builtin::Echo,
        Builtin::History,
        Builtin::Clear,
        Builtin::Cpu,
        Builtin::Memory,
        Builtin::Processes,
        Builtin::Help,
        Builtin::Exit,
    ];

    /// Map a lowercased verb to its built-in. `exit` and `quit` share one variant.
    pub fn from_verb(verb: &str) -> Option<Self> {
        let builtin = match verb {
            "ls" => Builtin::List,
            "pwd" => Builtin::PrintWorkingDir,
            "cd" => Builtin::ChangeDir,
            "mkdir" => Builtin::MakeDir,
            "rmdir" => Builtin::RemoveDir,
            "rm" => Builtin::RemoveFile,
            "touch" => Builtin::Touch,
            "mv" => Builtin::Move,
            "cp" => Builtin::Copy,
            "cat" => Builtin::Cat,
            "echo" => Builtin::Echo,
            "history" => Builtin::History,
            "clear" => Builtin::Clear,
            "cpu" => Builtin::Cpu,
            "memory" => Builtin::Memory,
            "processes" => Builtin::Processes,
            "help" => Builtin::Help,
            "exit" | "quit" => Builtin::Exit,
            _ => return None,
        };
        Some(builtin)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::List => "ls",
            Builtin::PrintWorkingDir => "pwd",
            Builtin::ChangeDir => "cd",
            Builtin::MakeDir => "mkdir",
            Builtin::RemoveDir => "rmdir",
            Builtin::RemoveFile => "rm",
            Builtin::Touch => "touch",
            Builtin::Move => "mv",
            Builtin::Copy => "cp",
            Builtin::Cat => "cat",
            Builtin::Echo => "echo",
            Builtin::History => "history",
            Builtin::Clear => "clear",
            Builtin::Cpu => "cpu",
            Builtin::Memory => "memory",
            Builtin::Processes => "processes",
            Builtin::Help => "help",
            Builtin::Exit => "exit",
        }
    }

    pub fn usage(&self) -> &'static str {
        match self {
            Builtin::List => "ls [path]            list directory entries",
            Builtin::PrintWorkingDir => "pwd                  print the working directory",
            Builtin::ChangeDir => "cd <path>            change the working directory",
            Builtin::MakeDir => "mkdir <path>...      create directories and parents",
            Builtin::RemoveDir => "rmdir <path>...      remove empty directories",
            Builtin::RemoveFile => "rm <path>...         remove files",
            Builtin::Touch => "touch <path>...      create empty files",
            Builtin::Move => "mv <src> <dst>       rename or move",
            Builtin::Copy => "cp <src> <dst>       copy a file or directory tree",
            Builtin::Cat => "cat <path>...        print file contents",
            Builtin::Echo => "echo <text> [>|>> <path>]  print or write text",
            Builtin::History => "history [-c]         show or clear command history",
            Builtin::Clear => "clear                clear the screen",
            Builtin::Cpu => "cpu                  per-core CPU usage",
            Builtin::Memory => "memory               memory usage",
            Builtin::Processes => "processes            running processes",
            Builtin::Help => "help                 show this help",
            Builtin::Exit => "exit | quit          end the session",
        }
    }
}
