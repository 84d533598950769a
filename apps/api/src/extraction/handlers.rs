//! POST /extract-from-resume — validates the request, builds the prompt,
//! calls the completion backend once, and reshapes the reply into JSON.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::extraction::fields::{ExtractField, FieldMetadata};
use crate::extraction::parser::extract_json;
use crate::extraction::prompt::build_prompt;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub options: Vec<ExtractField>,
    /// Opaque JSON document describing the desired output shape.
    pub structure: Option<Value>,
    #[serde(default)]
    pub metadata: FieldMetadata,
    /// Accepted for wire compatibility; proxying is handled upstream.
    #[serde(default)]
    #[allow(dead_code)]
    pub use_proxy: bool,
    #[serde(default)]
    #[allow(dead_code)]
    pub proxy_url: Option<String>,
}

pub async fn handle_extract(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<Value>, AppError> {
    if req.resume_text.trim().is_empty() {
        return Err(AppError::Validation("Resume text is empty".to_string()));
    }
    let structure = match &req.structure {
        Some(s) if !s.is_null() => s,
        _ => {
            return Err(AppError::Validation(
                "No output structure definition provided".to_string(),
            ))
        }
    };

    let prompt = build_prompt(&req.resume_text, &req.options, structure, &req.metadata);

    let reply = state
        .llm
        .complete(&prompt.system, &prompt.user)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    // Returned verbatim — the caller owns shape validation against its structure.
    let result = extract_json(&reply)?;
    Ok(Json(result))
}
