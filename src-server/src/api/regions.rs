use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use quotedesk_core::regions::{NewRegion, RegionUpdate};

use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn list_regions(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let regions = state.region_service.list()?;
    Ok(Json(json!({ "regions": regions })))
}

async fn create_region(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewRegion>,
) -> ApiResult<Json<Value>> {
    let region = state.region_service.create(payload).await?;
    Ok(Json(json!({ "region": region })))
}

async fn get_region(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    let region = state.region_service.retrieve(&id)?;
    Ok(Json(json!({ "region": region })))
}

async fn update_region(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegionUpdate>,
) -> ApiResult<Json<Value>> {
    let region = state.region_service.update(id, payload).await?;
    Ok(Json(json!({ "region": region })))
}

async fn delete_region(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    state.region_service.delete(&id)?;
    Ok(Json(json!({
        "id": id,
        "object": "region",
        "deleted": true,
    })))
}

#[derive(Debug, Deserialize)]
struct SetProductPricePayload {
    price: i64,
}

async fn set_product_price(
    Path((id, product_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SetProductPricePayload>,
) -> ApiResult<Json<Value>> {
    let region = state
        .region_service
        .set_product_price(id, product_id, payload.price)
        .await?;
    Ok(Json(json!({ "region": region })))
}

async fn list_product_prices(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    let prices = state.region_service.list_product_prices(&id)?;
    Ok(Json(json!({ "product_prices": prices })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/regions", get(list_regions).post(create_region))
        .route(
            "/regions/{id}",
            get(get_region).post(update_region).delete(delete_region),
        )
        .route(
            "/regions/{id}/products/{product_id}",
            post(set_product_price),
        )
        .route("/regions/{id}/prices", get(list_product_prices))
}
