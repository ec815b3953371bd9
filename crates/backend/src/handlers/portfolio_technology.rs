use axum::extract::{Path, Query};
use axum::Json;
use contracts::domain::portfolio::technology::{Technology, TechnologyDto};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::portfolio_technology;
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};

#[derive(Deserialize)]
pub struct TechnologyListParams {
    pub search: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// GET /api/portfolio/technologies
pub async fn list(
    Query(params): Query<TechnologyListParams>,
) -> Result<Json<Paginated<Technology>>, AppError> {
    let page = PageParams {
        page: params.page,
        page_size: params.page_size,
    };
    Ok(Json(
        portfolio_technology::service::list_public(params.search, page).await?,
    ))
}

/// GET /api/portfolio/technologies/:slug
pub async fn get_by_slug(Path(slug): Path<String>) -> Result<Json<Technology>, AppError> {
    let technology = portfolio_technology::service::get_public_by_slug(&slug)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(technology))
}

/// POST /api/admin/portfolio/technologies
pub async fn upsert(Json(dto): Json<TechnologyDto>) -> Result<Json<serde_json::Value>, AppError> {
    if dto.id.is_some() {
        portfolio_technology::service::update(dto).await?;
        Ok(Json(json!({ "success": true })))
    } else {
        let id = portfolio_technology::service::create(dto).await?;
        Ok(Json(json!({ "id": id.to_string() })))
    }
}

/// DELETE /api/admin/portfolio/technologies/:id
pub async fn delete(Path(id): Path<String>) -> Result<Json<serde_json::Value>, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::BadRequest("invalid id".into()))?;
    if portfolio_technology::service::delete(id).await? {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(AppError::NotFound)
    }
}
