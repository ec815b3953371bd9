use axum::extract::{Path, Query};
use axum::Json;
use contracts::domain::blog::comment::CommentNode;
use contracts::domain::blog::post::{Post, PostDto};
use contracts::domain::common::AggregateId;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::{blog_comment, blog_post};
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};

#[derive(Deserialize)]
pub struct PostListParams {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_desc: Option<bool>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// GET /api/blog/posts
pub async fn list(Query(params): Query<PostListParams>) -> Result<Json<Paginated<Post>>, AppError> {
    let page = blog_post::service::list_public(blog_post::service::PostListParams {
        category: params.category,
        tag: params.tag,
        featured: params.featured,
        search: params.search,
        sort_by: params.sort_by,
        sort_desc: params.sort_desc,
        page: PageParams {
            page: params.page,
            page_size: params.page_size,
        },
    })
    .await?;
    Ok(Json(page))
}

#[derive(Deserialize)]
pub struct FeaturedParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// GET /api/blog/posts/featured
pub async fn featured(
    Query(params): Query<FeaturedParams>,
) -> Result<Json<Paginated<Post>>, AppError> {
    let page = PageParams {
        page: params.page,
        page_size: params.page_size,
    };
    Ok(Json(blog_post::service::list_featured(page).await?))
}

/// GET /api/blog/posts/:slug — каждый хит учитывается счётчиком
pub async fn get_by_slug(Path(slug): Path<String>) -> Result<Json<Post>, AppError> {
    let post = blog_post::service::get_public_by_slug(&slug)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(post))
}

/// GET /api/blog/posts/:slug/comments
pub async fn comments(Path(slug): Path<String>) -> Result<Json<Vec<CommentNode>>, AppError> {
    // Комментарии невидимого поста тоже невидимы
    let post = blog_post::repository::get_published_by_slug(&slug)
        .await?
        .ok_or(AppError::NotFound)?;
    let tree = blog_comment::service::list_tree_for_post(&post.id.as_string()).await?;
    Ok(Json(tree))
}

/// POST /api/admin/blog/posts
pub async fn upsert(Json(dto): Json<PostDto>) -> Result<Json<serde_json::Value>, AppError> {
    if dto.id.is_some() {
        blog_post::service::update(dto).await?;
        Ok(Json(json!({ "success": true })))
    } else {
        let id = blog_post::service::create(dto).await?;
        Ok(Json(json!({ "id": id.to_string() })))
    }
}

#[derive(Deserialize)]
pub struct StatusBody {
    pub status: String,
}

/// POST /api/admin/blog/posts/:id/status
pub async fn set_status(
    Path(id): Path<String>,
    Json(body): Json<StatusBody>,
) -> Result<Json<Post>, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::BadRequest("invalid id".into()))?;
    let post = blog_post::service::set_status(id, &body.status).await?;
    Ok(Json(post))
}

/// DELETE /api/admin/blog/posts/:id
pub async fn delete(Path(id): Path<String>) -> Result<Json<serde_json::Value>, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::BadRequest("invalid id".into()))?;
    if blog_post::service::delete(id).await? {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(AppError::NotFound)
    }
}
