use tracing::warn;

use crate::error::AideResult;
use crate::state::AssistantState;

/// Loads and saves the whole [`AssistantState`] as one unit.
///
/// No locking: a single in-process caller is assumed. Two processes writing
/// the same backing file will clobber each other.
pub trait StateStore {
    fn load(&self) -> AideResult<AssistantState>;
    fn save(&self, state: &AssistantState) -> AideResult<()>;

    /// Like [`StateStore::load`], but an unreadable or malformed document
    /// yields the empty state instead of an error.
    fn load_or_default(&self) -> AssistantState {
        match self.load() {
            Ok(state) => state,
            Err(e) => {
                warn!("Error loading data: {e}");
                AssistantState::default()
            }
        }
    }
}
