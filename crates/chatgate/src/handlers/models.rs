//! Provider listing for client model pickers.

use axum::Json;
use serde::Serialize;

use crate::llm::Provider;

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    /// Selector to send back as `provider`.
    id: &'static str,
    name: &'static str,
    /// Credential field that must be filled for this model.
    provider: &'static str,
}

/// GET /api/models
pub async fn list_models() -> Json<Vec<ModelInfo>> {
    Json(
        Provider::ALL
            .iter()
            .map(|p| ModelInfo {
                id: p.selector(),
                name: p.display_name(),
                provider: p.credential_field(),
            })
            .collect(),
    )
}
