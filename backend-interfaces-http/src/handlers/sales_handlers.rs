use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;

use backend_application::commands::refresh_commands::{self, RefreshReport};
use backend_application::queries::sales_queries;
use backend_application::AppState;
use backend_domain::{FilterOptions, SaleDetail, SalesFilterQuery, SalesView};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn list_sales(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SalesFilterQuery>,
) -> Result<Json<SalesView>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let view = sales_queries::list_sales(&state, query).await?;
    Ok(Json(view))
}

pub async fn list_filter_options(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<FilterOptions>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let options = sales_queries::list_filter_options(&state).await?;
    Ok(Json(options))
}

pub async fn get_sale(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(sale_id): Path<String>,
) -> Result<Json<SaleDetail>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let detail = sales_queries::get_sale_detail(&state, &sale_id).await?;
    Ok(Json(detail))
}

pub async fn refresh_sales(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RefreshReport>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let report = refresh_commands::refresh_sales(&state).await?;
    Ok(Json(report))
}
