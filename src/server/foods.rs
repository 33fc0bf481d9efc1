//! Food record handlers: the ownership-checked CRUD flow.
//!
//! Reads are open to any authenticated user; mutations require the
//! requester to be the record's creator.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

use super::auth::AuthUser;
use super::error::ApiError;
use super::AppState;
use crate::models::{Food, FoodDraft};

/// Confirmation payload for deletions.
#[derive(Serialize)]
pub struct DeleteResponse {
    message: &'static str,
}

/// GET /api/foods - every record, keyed by id.
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<HashMap<String, Food>>, ApiError> {
    let foods = state.foods.list().await?;

    Ok(Json(
        foods
            .into_iter()
            .map(|food| (food.id.to_string(), food))
            .collect(),
    ))
}

/// POST /api/foods - validate and persist a new record.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(draft): Json<FoodDraft>,
) -> Result<(StatusCode, Json<Food>), ApiError> {
    let food = Food::create(draft, user.user_id.as_str())?;
    let created = state.foods.create(&food).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/foods/{id} - owner-only update with revalidation.
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(draft): Json<FoodDraft>,
) -> Result<Json<Food>, ApiError> {
    let mut food = state
        .foods
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No food with id {}", id)))?;

    if !food.owned_by(&user.user_id) {
        return Err(ApiError::Unauthorized(
            "Only the owner can modify this food".to_string(),
        ));
    }

    food.apply(draft)?;
    let updated = state.foods.update(&food).await?;

    Ok(Json(updated))
}

/// DELETE /api/foods/{id} - owner-only removal.
pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let food = state
        .foods
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No food with id {}", id)))?;

    if !food.owned_by(&user.user_id) {
        return Err(ApiError::Unauthorized(
            "Only the owner can delete this food".to_string(),
        ));
    }

    state.foods.delete(id).await?;

    Ok(Json(DeleteResponse {
        message: "Successfully deleted",
    }))
}
