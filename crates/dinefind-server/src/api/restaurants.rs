use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use dinefind_finder::{retry_with_backoff, FinderError, SearchOutcome, SearchQuery};
use dinefind_places::PlaceDetail;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_finder_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct SearchRequest {
    pub query: String,
    /// Search radius in metres; the configured default when absent.
    #[serde(default)]
    pub radius: Option<u32>,
    #[serde(default, rename = "type")]
    pub place_type: Option<String>,
    /// Extra term appended to the (normalised) query text.
    #[serde(default)]
    pub keyword: Option<String>,
}

impl SearchRequest {
    fn into_query(self) -> Result<SearchQuery, FinderError> {
        let mut query = SearchQuery::new(&self.query)?;
        if let Some(radius) = self.radius {
            query = query.with_radius(radius);
        }
        if let Some(place_type) = self.place_type {
            query = query.with_place_type(place_type);
        }
        if let Some(keyword) = self.keyword {
            query = query.with_keyword(keyword);
        }
        Ok(query)
    }
}

pub(super) async fn search_restaurants(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SearchOutcome>>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        ApiError::new(req_id.0.clone(), "bad_request", rejection.body_text())
    })?;

    tracing::info!(query = %request.query, "restaurant search requested");

    let query = request
        .into_query()
        .map_err(|e| map_finder_error(req_id.0.clone(), &e))?;
    let finder = Arc::clone(&state.finder);
    let outcome = retry_with_backoff(
        state.retry.max_retries,
        state.retry.backoff_base_ms,
        || finder.find_restaurants_for(&query),
    )
    .await
    .map_err(|e| map_finder_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: outcome,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_restaurant(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(place_id): Path<String>,
) -> Result<Json<ApiResponse<PlaceDetail>>, ApiError> {
    let detail = state.finder.place_details(&place_id).await.ok_or_else(|| {
        ApiError::new(
            req_id.0.clone(),
            "not_found",
            format!("restaurant {place_id} not found"),
        )
    })?;

    Ok(Json(ApiResponse {
        data: detail,
        meta: ResponseMeta::new(req_id.0),
    }))
}
