//! GET /api/search?word=<string> - look a word up across discovered tables.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::error::{AppError, MISSING_WORD_MESSAGE};
use crate::api::state::AppState;
use crate::error::LookupError;
use crate::search::SearchResult;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub word: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub word: String,
    pub count: usize,
    pub results: Vec<SearchResult>,
}

pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    // A query string that does not deserialize (e.g. `word` given twice)
    // is treated the same as a missing word
    let params = params.map(|Query(params)| params).map_err(|rejection| {
        tracing::debug!("Rejected search query string: {}", rejection);
        LookupError::InvalidInput(MISSING_WORD_MESSAGE.to_string())
    })?;

    let word = params
        .word
        .as_deref()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .ok_or_else(|| LookupError::InvalidInput(MISSING_WORD_MESSAGE.to_string()))?
        .to_string();

    let results = state.engine.search(&word).await?;

    Ok(Json(SearchResponse {
        count: results.len(),
        word,
        results,
    }))
}
