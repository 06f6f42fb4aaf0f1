//! Fakes shared by the processor and console tests.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::SeedableRng;

use aide_core::{AideError, AideResult, AssistantState, Browser, Clock, StateStore};
use aide_store::MemoryStore;

use crate::processor::Assistant;

/// Saturday, 9 March 2024, 14:05:09.
pub fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(14, 5, 9)
        .unwrap()
}

pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[derive(Clone, Default)]
pub struct RecordingBrowser {
    pub opened: Rc<RefCell<Vec<String>>>,
}

impl Browser for RecordingBrowser {
    fn open(&self, url: &str) -> AideResult<()> {
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}

pub struct BrokenBrowser;

impl Browser for BrokenBrowser {
    fn open(&self, _url: &str) -> AideResult<()> {
        Err(AideError::Browser("no display".into()))
    }
}

/// A [`MemoryStore`] the test can keep inspecting after handing it over.
#[derive(Clone, Default)]
pub struct SharedStore(pub Rc<MemoryStore>);

impl StateStore for SharedStore {
    fn load(&self) -> AideResult<AssistantState> {
        self.0.load()
    }

    fn save(&self, state: &AssistantState) -> AideResult<()> {
        self.0.save(state)
    }
}

pub struct ReadOnlyStore;

impl StateStore for ReadOnlyStore {
    fn load(&self) -> AideResult<AssistantState> {
        Ok(AssistantState::default())
    }

    fn save(&self, _state: &AssistantState) -> AideResult<()> {
        Err(AideError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        )))
    }
}

pub struct Harness {
    pub assistant: Assistant,
    pub store: SharedStore,
    pub browser: RecordingBrowser,
}

impl Harness {
    pub fn new() -> Self {
        let store = SharedStore::default();
        let browser = RecordingBrowser::default();
        let assistant = Assistant::new(
            "TestAssistant",
            Box::new(store.clone()),
            Box::new(browser.clone()),
        )
        .with_clock(Box::new(FixedClock(fixed_time())))
        .with_rng(Box::new(StdRng::seed_from_u64(7)));
        Self {
            assistant,
            store,
            browser,
        }
    }

    pub fn say(&mut self, input: &str) -> String {
        self.assistant.process_input(input)
    }

    /// The state as last written to the store.
    pub fn persisted(&self) -> AssistantState {
        self.store.0.load().unwrap()
    }
}
