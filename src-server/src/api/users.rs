use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use quotedesk_core::users::{NewUser, UserUpdate};

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

async fn list_users(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let users = state.user_service.list()?;
    Ok(Json(json!({ "users": users })))
}

#[derive(Debug, Deserialize)]
struct FilterUsersParams {
    q: Option<String>,
}

async fn filter_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterUsersParams>,
) -> ApiResult<Json<Value>> {
    let query = params
        .q
        .ok_or_else(|| ApiError::BadRequest("Missing query parameter q".to_string()))?;
    let users = state.user_service.filter(&query)?;
    Ok(Json(json!({ "users": users })))
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewUser>,
) -> ApiResult<Json<Value>> {
    let user = state.user_service.create(payload).await?;
    Ok(Json(json!({ "user": user })))
}

async fn get_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    let user = state.user_service.retrieve(&id)?;
    Ok(Json(json!({ "user": user })))
}

async fn update_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UserUpdate>,
) -> ApiResult<Json<Value>> {
    let user = state.user_service.update(id, payload).await?;
    Ok(Json(json!({ "user": user })))
}

#[derive(Debug, Deserialize)]
struct ChangePasswordPayload {
    old_password: String,
    new_password: String,
}

async fn change_password(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChangePasswordPayload>,
) -> ApiResult<Json<Value>> {
    state
        .user_service
        .change_password(id.clone(), payload.old_password, payload.new_password)
        .await?;
    Ok(Json(json!({ "id": id, "password_changed": true })))
}

async fn delete_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    state.user_service.delete(&id)?;
    Ok(Json(json!({
        "id": id,
        "object": "user",
        "deleted": true,
    })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/filter", get(filter_users))
        .route(
            "/users/{id}",
            get(get_user).post(update_user).delete(delete_user),
        )
        .route("/users/{id}/change-password", post(change_password))
}
