use crate::error::App;
use serde::Deserialize;

/// Raw payload shape. Unknown keys are ignored; every slot is optional.
#[derive(Deserialize, Debug)]
struct Payload {
    file1: Option<String>,
    file2: Option<String>,
    file3: Option<String>,
}

/// An ordered playback request of up to three filenames, slot order
/// preserved and empty slots dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayRequest {
    pub files: Vec<String>,
}

impl PlayRequest {
    /// Parses a message body as UTF-8 JSON and extracts the `file1..file3`
    /// slots in that fixed order.
    pub fn from_payload(payload: &[u8]) -> Result<Self, App> {
        let body: Payload = serde_json::from_slice(payload)?;
        let files = [body.file1, body.file2, body.file3]
            .into_iter()
            .flatten()
            .filter(|f| !f.is_empty())
            .collect();
        Ok(Self { files })
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
