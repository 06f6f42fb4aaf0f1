use std::num::IntErrorKind;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::{debug, error, warn};

use aide_core::{AssistantState, Browser, Clock, StateStore, SystemClock, TIMESTAMP_FORMAT};

use crate::intent::match_intent;
use crate::registry::{CommandKind, CommandRegistry};

pub const DEFAULT_NAME: &str = "MyAssistant";
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search?q=";
pub const FAREWELL: &str = "Goodbye! Have a great day.";

const FALLBACK_COUNT: usize = 3;

/// Turns one line of user text into one display string.
///
/// Owns the in-memory state; every mutating handler writes the whole state
/// back through the [`StateStore`] before returning.
pub struct Assistant {
    name: String,
    registry: CommandRegistry,
    state: AssistantState,
    store: Box<dyn StateStore>,
    browser: Box<dyn Browser>,
    clock: Box<dyn Clock>,
    rng: Box<dyn RngCore>,
    search_url: String,
}

impl Assistant {
    /// Registers the built-in commands and loads state from `store`, falling
    /// back to an empty state if it cannot be read.
    pub fn new(name: &str, store: Box<dyn StateStore>, browser: Box<dyn Browser>) -> Self {
        let state = store.load_or_default();
        debug!(
            tasks = state.tasks.len(),
            notes = state.notes.len(),
            preferences = state.preferences.len(),
            "loaded state"
        );
        Self {
            name: name.to_string(),
            registry: CommandRegistry::with_builtins(),
            state,
            store,
            browser,
            clock: Box::new(SystemClock),
            rng: Box::new(StdRng::from_entropy()),
            search_url: DEFAULT_SEARCH_URL.to_string(),
        }
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_rng(mut self, rng: Box<dyn RngCore>) -> Self {
        self.rng = rng;
        self
    }

    /// The query text is appended to `url` verbatim.
    pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = url.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &AssistantState {
        &self.state
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Add or replace a command name. Used for user-defined aliases.
    pub fn register(&mut self, name: &str, kind: CommandKind, description: &str) {
        self.registry.register(name, kind, description);
    }

    /// Never fails: malformed input comes back as a readable reply.
    pub fn process_input(&mut self, raw: &str) -> String {
        let input = raw.trim();
        let (command, remainder) = match input.split_once(' ') {
            Some((head, rest)) => (head.to_lowercase(), rest),
            None => (input.to_lowercase(), ""),
        };

        if let Some(kind) = self.registry.lookup(&command) {
            debug!("command: {kind}");
            return self.dispatch(kind, remainder);
        }

        if let Some(intent) = match_intent(input) {
            debug!("intent: {}", intent.command);
            return self.dispatch(intent.command, &intent.argument);
        }

        debug!("no command or intent for input");
        self.fallback(input)
    }

    fn dispatch(&mut self, kind: CommandKind, arg: &str) -> String {
        match kind {
            CommandKind::Help => self.help(),
            CommandKind::Time => self.time(),
            CommandKind::Date => self.date(),
            CommandKind::AddTask => self.add_task(arg),
            CommandKind::ListTasks => self.list_tasks(),
            CommandKind::CompleteTask => self.complete_task(arg),
            CommandKind::AddNote => self.add_note(arg),
            CommandKind::ListNotes => self.list_notes(),
            CommandKind::SetPreference => self.set_preference(arg),
            CommandKind::WebSearch => self.web_search(arg),
            CommandKind::Exit => FAREWELL.to_string(),
        }
    }

    // -----------------------------------------------------------------------
    // Handlers
    // -----------------------------------------------------------------------

    fn help(&self) -> String {
        let mut text = format!("\n{} - Available Commands:\n", self.name);
        for (name, description) in self.registry.describe_all() {
            text.push_str(&format!("• {name}: {description}\n"));
        }
        text
    }

    fn time(&self) -> String {
        format!("The current time is {}", self.clock.now().format("%H:%M:%S"))
    }

    fn date(&self) -> String {
        format!("Today is {}", self.clock.now().format("%A, %B %d, %Y"))
    }

    fn add_task(&mut self, arg: &str) -> String {
        let description = arg.trim();
        if description.is_empty() {
            return "Please provide a task description.".into();
        }
        let now = self.clock.now();
        self.state.add_task(description.to_string(), now);
        self.persist(format!("Task added: {description}"))
    }

    fn list_tasks(&self) -> String {
        if self.state.tasks.is_empty() {
            return "You have no tasks.".into();
        }
        let (active, completed) = self.state.partition_tasks();

        let mut text = String::from("\n--- TO-DO LIST ---\n");
        if active.is_empty() {
            text.push_str("No active tasks.\n");
        } else {
            text.push_str("Active Tasks:\n");
            for task in &active {
                text.push_str(&format!("[{}] {}\n", task.id, task.description));
            }
        }
        if !completed.is_empty() {
            text.push_str("\nCompleted Tasks:\n");
            for task in &completed {
                text.push_str(&format!("[{}] {} ✓\n", task.id, task.description));
            }
        }
        text
    }

    fn complete_task(&mut self, arg: &str) -> String {
        let raw_id = arg.trim();
        let id: i64 = match raw_id.parse() {
            Ok(id) => id,
            // a well-formed integer too wide for any stored id
            Err(e)
                if matches!(
                    e.kind(),
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow
                ) =>
            {
                return format!("Task with ID {raw_id} not found.");
            }
            Err(_) => return "Please provide a valid task ID number.".into(),
        };
        let found = u64::try_from(id)
            .map(|id| self.state.complete_task(id))
            .unwrap_or(false);
        if !found {
            return format!("Task with ID {id} not found.");
        }
        self.persist(format!("Task {id} marked as completed."))
    }

    fn add_note(&mut self, arg: &str) -> String {
        let content = arg.trim();
        if content.is_empty() {
            return "Please provide note content.".into();
        }
        let now = self.clock.now();
        self.state.add_note(content.to_string(), now);
        self.persist(format!("Note saved: {content}"))
    }

    fn list_notes(&self) -> String {
        if self.state.notes.is_empty() {
            return "You have no saved notes.".into();
        }
        let mut text = String::from("\n--- NOTES ---\n");
        for note in &self.state.notes {
            text.push_str(&format!(
                "[{}] ({}): {}\n",
                note.id,
                note.created.format(TIMESTAMP_FORMAT),
                note.content
            ));
        }
        text
    }

    fn set_preference(&mut self, arg: &str) -> String {
        let Some((key, value)) = arg.split_once('=') else {
            return "Format should be: 'set_preference key=value'".into();
        };
        let (key, value) = (key.trim(), value.trim());
        self.state.set_preference(key.to_string(), value.to_string());
        self.persist(format!("Preference set: {key} = {value}"))
    }

    fn web_search(&self, arg: &str) -> String {
        let query = arg.trim();
        if query.is_empty() {
            return "Please provide a search query.".into();
        }
        let url = format!("{}{}", self.search_url, query.replace(' ', "+"));
        if let Err(e) = self.browser.open(&url) {
            warn!("could not open {url}: {e}");
        }
        format!("Searching for: {query}")
    }

    fn fallback(&mut self, input: &str) -> String {
        match self.rng.gen_range(0..FALLBACK_COUNT) {
            0 => format!(
                "I'm not sure how to help with '{input}'. Type 'help' to see what I can do."
            ),
            1 => "I didn't understand that. Try 'help' to see available commands.".into(),
            _ => "Could you phrase that differently? \
                  Type 'help' for a list of commands I understand."
                .into(),
        }
    }

    /// Write the full state, keeping the conversation alive if that fails.
    fn persist(&self, confirmation: String) -> String {
        match self.store.save(&self.state) {
            Ok(()) => confirmation,
            Err(e) => {
                error!("failed to save state: {e}");
                format!("{confirmation}\n(warning: your changes could not be saved: {e})")
            }
        }
    }
}
