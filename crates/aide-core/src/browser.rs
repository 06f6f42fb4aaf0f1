use crate::error::AideResult;

/// Opens a URL in the user's default browser.
pub trait Browser {
    fn open(&self, url: &str) -> AideResult<()>;
}
