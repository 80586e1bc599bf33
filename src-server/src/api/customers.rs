use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use quotedesk_core::customers::{Customer, CustomerUpdate, NewCustomer};

use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn list_customers(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let customers: Vec<Customer> = state.customer_service.list()?;
    Ok(Json(json!({ "customers": customers })))
}

async fn create_customer(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewCustomer>,
) -> ApiResult<Json<Value>> {
    let customer = state.customer_service.create(payload).await?;
    Ok(Json(json!({ "customer": customer })))
}

async fn get_customer(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    let customer = state.customer_service.retrieve(&id)?;
    Ok(Json(json!({ "customer": customer })))
}

async fn update_customer(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CustomerUpdate>,
) -> ApiResult<Json<Value>> {
    let customer = state.customer_service.update(id, payload).await?;
    Ok(Json(json!({ "customer": customer })))
}

async fn delete_customer(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    state.customer_service.delete(&id)?;
    Ok(Json(json!({
        "id": id,
        "object": "customer",
        "deleted": true,
    })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route(
            "/customers/{id}",
            get(get_customer)
                .post(update_customer)
                .delete(delete_customer),
        )
}
