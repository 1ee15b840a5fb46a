use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One LLM answer to one prompt on one provider.
///
/// Created once when the provider-facing collaborator returns a response;
/// immutable thereafter. The engine never talks to a provider itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub id: Uuid,
    pub prompt_id: Uuid,
    /// Provider the answer came from, e.g. `chatgpt`, `claude`, `gemini`.
    pub platform: String,
    pub topic: String,
    pub persona: String,
    pub raw_text: String,
    /// Cited URLs in the order the provider returned them.
    pub cited_urls: Vec<String>,
    pub captured_at: DateTime<Utc>,
}

impl AnswerRecord {
    /// Convenience constructor for a freshly captured answer.
    #[must_use]
    pub fn new(
        prompt_id: Uuid,
        platform: impl Into<String>,
        topic: impl Into<String>,
        persona: impl Into<String>,
        raw_text: impl Into<String>,
        cited_urls: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            prompt_id,
            platform: platform.into(),
            topic: topic.into(),
            persona: persona.into(),
            raw_text: raw_text.into(),
            cited_urls,
            captured_at: Utc::now(),
        }
    }
}
