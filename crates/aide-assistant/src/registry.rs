use std::fmt;

/// Every handler the assistant knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Help,
    Time,
    Date,
    AddTask,
    ListTasks,
    CompleteTask,
    AddNote,
    ListNotes,
    SetPreference,
    WebSearch,
    Exit,
}

impl CommandKind {
    /// Built-ins in the order they appear in help output.
    pub const ALL: [CommandKind; 11] = [
        Self::Help,
        Self::Time,
        Self::Date,
        Self::AddTask,
        Self::ListTasks,
        Self::CompleteTask,
        Self::AddNote,
        Self::ListNotes,
        Self::SetPreference,
        Self::WebSearch,
        Self::Exit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Time => "time",
            Self::Date => "date",
            Self::AddTask => "add_task",
            Self::ListTasks => "list_tasks",
            Self::CompleteTask => "complete_task",
            Self::AddNote => "add_note",
            Self::ListNotes => "list_notes",
            Self::SetPreference => "set_preference",
            Self::WebSearch => "web_search",
            Self::Exit => "exit",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Help => "Show available commands",
            Self::Time => "Display current time",
            Self::Date => "Display current date",
            Self::AddTask => "Add a task to your to-do list",
            Self::ListTasks => "List all tasks",
            Self::CompleteTask => "Mark a task as completed",
            Self::AddNote => "Save a quick note",
            Self::ListNotes => "List all saved notes",
            Self::SetPreference => "Set a user preference",
            Self::WebSearch => "Open web browser with search query",
            Self::Exit => "Exit the assistant",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for CommandKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == lower)
            .ok_or_else(|| format!("unknown command: {s}"))
    }
}

#[derive(Debug, Clone)]
pub struct CommandEntry {
    pub name: String,
    pub kind: CommandKind,
    pub description: String,
}

/// Command names mapped to handlers, kept in registration order.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for kind in CommandKind::ALL {
            registry.register(kind.name(), kind, kind.description());
        }
        registry
    }

    /// Names are stored lowercased. Registering an existing name replaces its
    /// handler and description but keeps its position.
    pub fn register(&mut self, name: &str, kind: CommandKind, description: &str) {
        let name = name.trim().to_lowercase();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            entry.kind = kind;
            entry.description = description.to_string();
            return;
        }
        self.entries.push(CommandEntry {
            name,
            kind,
            description: description.to_string(),
        });
    }

    /// Exact match against a lowercased name.
    pub fn lookup(&self, name: &str) -> Option<CommandKind> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.kind)
    }

    pub fn describe_all(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.name.as_str(), e.description.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
