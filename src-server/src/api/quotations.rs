use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use quotedesk_core::quotations::{
    FindQuotationConfig, NewQuotation, QuotationFilter, DEFAULT_PAGE_SIZE,
    DEFAULT_QUOTATION_RELATIONS,
};

use crate::api::shared::{active_region_from_headers, parse_comma_list, parse_order, project_fields};
use crate::error::ApiResult;
use crate::main_lib::AppState;

fn default_relations() -> Vec<String> {
    DEFAULT_QUOTATION_RELATIONS
        .iter()
        .map(|relation| relation.to_string())
        .collect()
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuotationParams {
    pub q: Option<String>,
    pub id: Option<String>,
    pub code: Option<String>,
    pub title: Option<String>,
    pub sale_persion_id: Option<String>,
    pub customer_id: Option<String>,
    pub region_id: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub order: Option<String>,
    pub expand: Option<String>,
    pub fields: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GetQuotationParams {
    pub expand: Option<String>,
    pub fields: Option<String>,
}

async fn list_quotations(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<ListQuotationParams>,
) -> ApiResult<Json<Value>> {
    let filter = QuotationFilter {
        q: params.q.clone(),
        id: params.id.as_deref().map(parse_comma_list),
        code: params.code.clone(),
        title: params.title.clone(),
        sale_persion_id: params.sale_persion_id.clone(),
        customer_id: params.customer_id.clone(),
        region_id: params.region_id.clone(),
        ..Default::default()
    };

    let relations = params
        .expand
        .as_deref()
        .map(parse_comma_list)
        .unwrap_or_else(default_relations);
    let select = params
        .fields
        .as_deref()
        .map(parse_comma_list)
        .unwrap_or_default();
    let offset = params.offset.unwrap_or(0);
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE);

    let config = FindQuotationConfig {
        relations,
        select: select.clone(),
        skip: offset,
        take: limit,
        order: params.order.as_deref().and_then(parse_order),
        with_deleted: false,
    };

    let region_scope = active_region_from_headers(&headers);
    let (quotations, count) = state
        .quotation_service
        .list_and_count(filter, config, region_scope)?;

    let quotations: Vec<Value> = quotations
        .iter()
        .map(|quotation| serde_json::to_value(quotation).map(|v| project_fields(v, &select)))
        .collect::<Result<_, _>>()?;

    Ok(Json(json!({
        "quotations": quotations,
        "count": count,
        "offset": offset,
        "limit": limit,
    })))
}

async fn create_quotation(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewQuotation>,
) -> ApiResult<Json<Value>> {
    let created = state.quotation_service.create(payload).await?;

    // Re-read with the default relation set so the response carries the
    // hydrated aggregate.
    let config = FindQuotationConfig {
        relations: default_relations(),
        ..Default::default()
    };
    let quotation = state.quotation_service.retrieve(&created.id, config)?;

    Ok(Json(json!({ "quotation": quotation })))
}

async fn get_quotation(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(params): Query<GetQuotationParams>,
) -> ApiResult<Json<Value>> {
    let relations = params
        .expand
        .as_deref()
        .map(parse_comma_list)
        .unwrap_or_else(default_relations);
    let select = params
        .fields
        .as_deref()
        .map(parse_comma_list)
        .unwrap_or_default();

    let config = FindQuotationConfig {
        relations,
        select: select.clone(),
        ..Default::default()
    };
    let quotation = state.quotation_service.retrieve(&id, config)?;
    let quotation = project_fields(serde_json::to_value(&quotation)?, &select);

    Ok(Json(json!({ "quotation": quotation })))
}

async fn delete_quotation(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    state.quotation_service.delete(&id)?;
    Ok(Json(json!({
        "id": id,
        "object": "quotation",
        "deleted": true,
    })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/quotations", get(list_quotations).post(create_quotation))
        .route(
            "/quotations/{id}",
            get(get_quotation).delete(delete_quotation),
        )
}
