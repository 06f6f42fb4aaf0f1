pub mod browser;
pub mod clock;
pub mod error;
pub mod state;
pub mod store;

pub use browser::Browser;
pub use clock::{Clock, SystemClock};
pub use error::{AideError, AideResult};
pub use state::{AssistantState, Note, Task, TIMESTAMP_FORMAT};
pub use store::StateStore;
