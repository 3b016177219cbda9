use serde::{Deserialize, Deserializer, Serialize};

/// How an entry's audio is provided. Absent when nothing has been uploaded yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mp3Format {
    /// Uploaded file served by the backend.
    Mp3,
    /// Link to an allowed external host.
    External,
}

/// A submitted piece, as returned for editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub uuid: String,
    pub entry_name: String,
    pub entrant_name: String,
    #[serde(default, deserialize_with = "locator")]
    pub mp3_url: Option<String>,
    #[serde(default, deserialize_with = "locator")]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub mp3_format: Option<Mp3Format>,
}

/// An entry as the admin view sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminEntry {
    #[serde(flatten)]
    pub entry: Entry,
    #[serde(default)]
    pub entry_notes: Option<String>,
    pub is_valid: bool,
}

/// An entry as the public voting view sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryVotingData {
    pub uuid: String,
    #[serde(default)]
    pub mp3_format: Option<Mp3Format>,
    pub entrant_name: String,
    pub entry_name: String,
    pub is_valid: bool,
    #[serde(default, deserialize_with = "locator")]
    pub pdf_url: Option<String>,
    #[serde(default, deserialize_with = "locator")]
    pub mp3_url: Option<String>,
    #[serde(default)]
    pub entry_notes: Option<String>,
}

impl EntryVotingData {
    pub fn has_media(&self) -> bool {
        self.mp3_url.is_some() || self.pdf_url.is_some()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Locator {
    Plain(String),
    // The backend's public week listing wraps pdfUrl in a one-element array.
    Wrapped((String,)),
}

fn locator<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<Locator>::deserialize(deserializer)?.map(|l| match l {
            Locator::Plain(url) => url,
            Locator::Wrapped((url,)) => url,
        }),
    )
}
