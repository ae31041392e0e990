use serde::{Deserialize, Serialize};

/// One navigable destination offered by the palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredCandidate", into = "StoredCandidate")]
pub struct Candidate {
    title: String,
    destination_id: String,
    normalized_title: String,
}

impl Candidate {
    pub fn new(title: &str, destination_id: &str) -> Self {
        Self::from_owned(title.to_string(), destination_id.to_string())
    }

    pub fn from_owned(title: String, destination_id: String) -> Self {
        let normalized_title = normalize_for_search(&title);
        Self {
            title,
            destination_id,
            normalized_title,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn destination_id(&self) -> &str {
        &self.destination_id
    }

    pub fn normalized_title(&self) -> &str {
        &self.normalized_title
    }
}

// Persisted shape; `id` keeps blobs written by the browser plugin readable.
#[derive(Serialize, Deserialize)]
struct StoredCandidate {
    title: String,
    id: String,
}

impl From<StoredCandidate> for Candidate {
    fn from(value: StoredCandidate) -> Self {
        Self::from_owned(value.title, value.id)
    }
}

impl From<Candidate> for StoredCandidate {
    fn from(value: Candidate) -> Self {
        Self {
            title: value.title,
            id: value.destination_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    pub candidate: Candidate,
    /// 0.0 is a perfect match, 1.0 matches nothing.
    pub score: f64,
}

impl RankedResult {
    pub fn unscored(candidate: Candidate) -> Self {
        Self {
            candidate,
            score: 0.0,
        }
    }
}

pub fn normalize_for_search(input: &str) -> String {
    input.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::Candidate;

    #[test]
    fn serializes_with_legacy_id_field() {
        let candidate = Candidate::new("Liked Songs", "spotify:app:collection-songs");
        let encoded = serde_json::to_string(&candidate).unwrap();
        assert_eq!(
            encoded,
            r#"{"title":"Liked Songs","id":"spotify:app:collection-songs"}"#
        );

        let decoded: Candidate = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, candidate);
        assert_eq!(decoded.normalized_title(), "liked songs");
    }
}
