use aide_core::{AideError, AideResult, Browser};

/// Hands URLs to the platform's default browser.
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> AideResult<()> {
        webbrowser::open(url).map_err(|e| AideError::Browser(e.to_string()))
    }
}
