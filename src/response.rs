//! Pulling the answer out of a `generateContent` response.

use tracing::warn;

use crate::errors::LlmError;
use crate::gemini::GenerateContentResponse;

/// The text of the first candidate, if it holds exactly one text part.
///
/// Anything else is [`LlmError::EmptyResponse`], which callers treat as a
/// missing answer rather than a failure.
pub fn extract(response: &GenerateContentResponse) -> Result<String, LlmError> {
    let Some(candidate) = response.candidates.first() else {
        let block_reason = response
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref());
        warn!(block_reason = ?block_reason, "response has no candidates");
        return Err(LlmError::EmptyResponse);
    };

    let parts = candidate
        .content
        .as_ref()
        .map(|content| content.parts.as_slice())
        .unwrap_or_default();
    match parts {
        [part] => part.text.clone().ok_or_else(|| {
            warn!("response part carries no text");
            LlmError::EmptyResponse
        }),
        _ => {
            warn!(
                part_count = parts.len(),
                finish_reason = ?candidate.finish_reason,
                "first candidate does not hold exactly one part"
            );
            Err(LlmError::EmptyResponse)
        }
    }
}
