//! Axum route handlers for the classifier preview.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::interview::classifier::{classify_tech_stack, matched_technologies};

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub tech_stack: String,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub categories: String,
    pub technologies: Vec<&'static str>,
}

/// POST /api/v1/classify
///
/// Shows which focus areas generated questions will target for a tech stack.
pub async fn handle_classify(Json(request): Json<ClassifyRequest>) -> Json<ClassifyResponse> {
    Json(ClassifyResponse {
        categories: classify_tech_stack(&request.tech_stack),
        technologies: matched_technologies(&request.tech_stack),
    })
}
