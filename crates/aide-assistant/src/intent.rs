//! Phrase-based fallback routing for input that is not a literal command.
//!
//! Rules are tried in a fixed priority order and the first hit wins. Phrase
//! detection ignores case; the extracted argument keeps the user's casing.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::registry::CommandKind;

static TASK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:add task|new task|create task)\s+(.*)").expect("valid task regex")
});
static NOTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:add note|new note|save note)\s+(.*)").expect("valid note regex")
});
static SEARCH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:search for|look up)\s+(.*)").expect("valid search regex"));

const TASK_PHRASES: [&str; 3] = ["add task", "new task", "create task"];
const NOTE_PHRASES: [&str; 3] = ["add note", "new note", "save note"];
const SEARCH_PHRASES: [&str; 2] = ["search for", "look up"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentMatch {
    pub command: CommandKind,
    pub argument: String,
}

impl IntentMatch {
    fn bare(command: CommandKind) -> Self {
        Self {
            command,
            argument: String::new(),
        }
    }
}

/// Route free-form `input` to a handler, or `None` if nothing applies.
///
/// A phrase rule that fires but has no trailing text to capture ends the
/// search with `None`; lower-priority rules are not consulted.
pub fn match_intent(input: &str) -> Option<IntentMatch> {
    let lower = input.to_lowercase();

    if lower.contains("time") && lower.contains("what") {
        return Some(IntentMatch::bare(CommandKind::Time));
    }
    if lower.contains("date") && lower.contains("what") {
        return Some(IntentMatch::bare(CommandKind::Date));
    }
    if contains_any(&lower, &TASK_PHRASES) {
        return capture(&TASK_RE, input, CommandKind::AddTask);
    }
    if contains_any(&lower, &NOTE_PHRASES) {
        return capture(&NOTE_RE, input, CommandKind::AddNote);
    }
    if contains_any(&lower, &SEARCH_PHRASES) {
        return capture(&SEARCH_RE, input, CommandKind::WebSearch);
    }

    None
}

fn contains_any(haystack: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| haystack.contains(p))
}

fn capture(re: &Regex, input: &str, command: CommandKind) -> Option<IntentMatch> {
    let caps = re.captures(input)?;
    Some(IntentMatch {
        command,
        argument: caps.get(1).map_or("", |m| m.as_str()).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routed(input: &str) -> Option<(CommandKind, String)> {
        match_intent(input).map(|m| (m.command, m.argument))
    }

    #[test]
    fn test_time_question() {
        assert_eq!(routed("what time is it"), Some((CommandKind::Time, String::new())));
        assert_eq!(routed("WHAT TIME is it?"), Some((CommandKind::Time, String::new())));
    }

    #[test]
    fn test_date_question() {
        assert_eq!(routed("what is the date today"), Some((CommandKind::Date, String::new())));
    }

    #[test]
    fn test_time_beats_date() {
        assert_eq!(
            routed("what date and time is it").map(|(k, _)| k),
            Some(CommandKind::Time)
        );
    }

    #[test]
    fn test_time_needs_what() {
        assert_eq!(routed("time flies"), None);
    }

    #[test]
    fn test_task_phrases() {
        assert_eq!(
            routed("please add task buy milk"),
            Some((CommandKind::AddTask, "buy milk".into()))
        );
        assert_eq!(
            routed("New Task Call Mom"),
            Some((CommandKind::AddTask, "Call Mom".into()))
        );
        assert_eq!(
            routed("create task   file taxes"),
            Some((CommandKind::AddTask, "file taxes".into()))
        );
    }

    #[test]
    fn test_note_phrases() {
        assert_eq!(
            routed("save note Parking on level 3"),
            Some((CommandKind::AddNote, "Parking on level 3".into()))
        );
    }

    #[test]
    fn test_search_phrases() {
        assert_eq!(
            routed("can you look up Rust Book"),
            Some((CommandKind::WebSearch, "Rust Book".into()))
        );
        assert_eq!(
            routed("Search For weather in Oslo"),
            Some((CommandKind::WebSearch, "weather in Oslo".into()))
        );
    }

    #[test]
    fn test_phrase_without_trailing_text_stops() {
        // the task rule fires, fails to extract, and does not fall through
        // to the note rule
        assert_eq!(routed("add task"), None);
        assert_eq!(routed("add taskbar then add note x"), None);
    }

    #[test]
    fn test_priority_task_over_search() {
        assert_eq!(
            routed("add task search for flights"),
            Some((CommandKind::AddTask, "search for flights".into()))
        );
    }

    #[test]
    fn test_unrelated_input() {
        assert_eq!(routed("xyzzy quux"), None);
        assert_eq!(routed(""), None);
    }
}
