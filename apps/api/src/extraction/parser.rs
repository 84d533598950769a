//! Response Extractor — recovers the JSON document embedded in a raw model
//! reply.

use serde_json::Value;
use thiserror::Error;

/// Parse failure carrying the unmodified model reply for diagnostics.
#[derive(Debug, Error)]
#[error("model reply is not parseable JSON")]
pub struct JsonExtractError {
    pub raw: String,
    #[source]
    pub source: serde_json::Error,
}

/// Isolates and parses the JSON object embedded in `raw`.
///
/// The candidate span runs from the first `{` to the last `}`, a greedy
/// match rather than a balanced-brace scan. Prose after the object that itself
/// contains a `}` lands inside the candidate and fails the parse; callers
/// depend on the current behavior, so it is kept rather than upgraded.
/// Without such a span the whole reply is the candidate. Code-fence markers
/// are removed and the remainder trimmed before parsing.
pub fn extract_json(raw: &str) -> Result<Value, JsonExtractError> {
    let candidate = match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => raw,
    };

    let cleaned = candidate.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();

    serde_json::from_str(cleaned).map_err(|source| JsonExtractError {
        raw: raw.to_string(),
        source,
    })
}
