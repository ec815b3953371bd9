use axum::extract::{Path, Query};
use axum::Json;
use contracts::domain::blog::category::{Category, CategoryDto};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::blog_category;
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};

#[derive(Deserialize)]
pub struct CategoryListParams {
    pub search: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// GET /api/blog/categories
pub async fn list(
    Query(params): Query<CategoryListParams>,
) -> Result<Json<Paginated<Category>>, AppError> {
    let page = PageParams {
        page: params.page,
        page_size: params.page_size,
    };
    Ok(Json(
        blog_category::service::list_public(params.search, page).await?,
    ))
}

/// GET /api/blog/categories/:slug
pub async fn get_by_slug(Path(slug): Path<String>) -> Result<Json<Category>, AppError> {
    let category = blog_category::service::get_public_by_slug(&slug)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(category))
}

/// POST /api/admin/blog/categories
pub async fn upsert(Json(dto): Json<CategoryDto>) -> Result<Json<serde_json::Value>, AppError> {
    if dto.id.is_some() {
        blog_category::service::update(dto).await?;
        Ok(Json(json!({ "success": true })))
    } else {
        let id = blog_category::service::create(dto).await?;
        Ok(Json(json!({ "id": id.to_string() })))
    }
}

/// DELETE /api/admin/blog/categories/:id
pub async fn delete(Path(id): Path<String>) -> Result<Json<serde_json::Value>, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::BadRequest("invalid id".into()))?;
    if blog_category::service::delete(id).await? {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(AppError::NotFound)
    }
}
