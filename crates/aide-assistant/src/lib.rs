pub mod console;
pub mod intent;
pub mod processor;
pub mod registry;

#[cfg(test)]
mod test_support;

pub use console::{run_console, EXIT_KEYWORD};
pub use intent::{match_intent, IntentMatch};
pub use processor::{Assistant, DEFAULT_NAME, DEFAULT_SEARCH_URL, FAREWELL};
pub use registry::{CommandEntry, CommandKind, CommandRegistry};
