use axum::extract::{Path, Query};
use axum::Json;
use contracts::domain::portfolio::category::{Category, CategoryDto};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::portfolio_category;
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};

#[derive(Deserialize)]
pub struct CategoryListParams {
    pub search: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// GET /api/portfolio/categories
pub async fn list(
    Query(params): Query<CategoryListParams>,
) -> Result<Json<Paginated<Category>>, AppError> {
    let page = PageParams {
        page: params.page,
        page_size: params.page_size,
    };
    Ok(Json(
        portfolio_category::service::list_public(params.search, page).await?,
    ))
}

/// GET /api/portfolio/categories/:slug
pub async fn get_by_slug(Path(slug): Path<String>) -> Result<Json<Category>, AppError> {
    let category = portfolio_category::service::get_public_by_slug(&slug)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(category))
}

/// POST /api/admin/portfolio/categories
pub async fn upsert(Json(dto): Json<CategoryDto>) -> Result<Json<serde_json::Value>, AppError> {
    if dto.id.is_some() {
        portfolio_category::service::update(dto).await?;
        Ok(Json(json!({ "success": true })))
    } else {
        let id = portfolio_category::service::create(dto).await?;
        Ok(Json(json!({ "id": id.to_string() })))
    }
}

/// DELETE /api/admin/portfolio/categories/:id
pub async fn delete(Path(id): Path<String>) -> Result<Json<serde_json::Value>, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::BadRequest("invalid id".into()))?;
    if portfolio_category::service::delete(id).await? {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(AppError::NotFound)
    }
}
