use axum::extract::{Path, Query};
use axum::Json;
use contracts::domain::blog::tag::{Tag, TagDto};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::blog_tag;
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};

#[derive(Deserialize)]
pub struct TagListParams {
    pub search: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// GET /api/blog/tags
pub async fn list(Query(params): Query<TagListParams>) -> Result<Json<Paginated<Tag>>, AppError> {
    let page = PageParams {
        page: params.page,
        page_size: params.page_size,
    };
    Ok(Json(blog_tag::service::list_public(params.search, page).await?))
}

/// GET /api/blog/tags/:slug
pub async fn get_by_slug(Path(slug): Path<String>) -> Result<Json<Tag>, AppError> {
    let tag = blog_tag::service::get_public_by_slug(&slug)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(tag))
}

/// POST /api/admin/blog/tags
pub async fn upsert(Json(dto): Json<TagDto>) -> Result<Json<serde_json::Value>, AppError> {
    if dto.id.is_some() {
        blog_tag::service::update(dto).await?;
        Ok(Json(json!({ "success": true })))
    } else {
        let id = blog_tag::service::create(dto).await?;
        Ok(Json(json!({ "id": id.to_string() })))
    }
}

/// DELETE /api/admin/blog/tags/:id
pub async fn delete(Path(id): Path<String>) -> Result<Json<serde_json::Value>, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::BadRequest("invalid id".into()))?;
    if blog_tag::service::delete(id).await? {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(AppError::NotFound)
    }
}
