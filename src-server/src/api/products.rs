use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use quotedesk_core::products::{NewProduct, ProductFilter, ProductUpdate};

use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ProductFilter>,
) -> ApiResult<Json<Value>> {
    let products = state.product_service.list(filter)?;
    Ok(Json(json!({ "products": products })))
}

async fn list_brands(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let brands = state.product_service.list_brands()?;
    Ok(Json(json!({ "brands": brands })))
}

async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewProduct>,
) -> ApiResult<Json<Value>> {
    let product = state.product_service.create(payload).await?;
    Ok(Json(json!({ "product": product })))
}

async fn get_product(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    let product = state.product_service.retrieve(&id)?;
    Ok(Json(json!({ "product": product })))
}

async fn update_product(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ProductUpdate>,
) -> ApiResult<Json<Value>> {
    let product = state.product_service.update(id, payload).await?;
    Ok(Json(json!({ "product": product })))
}

async fn delete_product(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    state.product_service.delete(&id)?;
    Ok(Json(json!({
        "id": id,
        "object": "product",
        "deleted": true,
    })))
}

#[derive(Debug, Deserialize)]
struct AddAdditionalHardwarePayload {
    product_additions_id: String,
}

async fn add_additional_hardware(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AddAdditionalHardwarePayload>,
) -> ApiResult<Json<Value>> {
    state
        .product_service
        .add_additional_hardware(id.clone(), payload.product_additions_id)
        .await?;
    let additions = state.product_service.list_additional_hardware(&id)?;
    Ok(Json(json!({ "additional_hardware": additions })))
}

async fn list_additional_hardware(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    let additions = state.product_service.list_additional_hardware(&id)?;
    Ok(Json(json!({ "additional_hardware": additions })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/brands", get(list_brands))
        .route(
            "/products/{id}",
            get(get_product).post(update_product).delete(delete_product),
        )
        .route(
            "/products/{id}/additional-hardware",
            post(add_additional_hardware).get(list_additional_hardware),
        )
}
