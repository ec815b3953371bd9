use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use contracts::domain::blog::comment::{Comment, CommentDto};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::blog_comment;
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};
use crate::shared::request_meta::RequestMeta;

/// POST /api/blog/comments — анонимная отправка; в ответе только
/// подтверждение приёма, видимое состояние не раскрывается
pub async fn submit(
    headers: HeaderMap,
    Json(dto): Json<CommentDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let meta = RequestMeta::from_headers(&headers);
    blog_comment::service::submit(dto, meta).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Comment submitted successfully! It will appear after moderation.",
            "status": "pending_approval",
        })),
    ))
}

#[derive(Deserialize)]
pub struct AdminCommentListParams {
    pub pending: Option<bool>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// GET /api/admin/blog/comments
pub async fn list_admin(
    Query(params): Query<AdminCommentListParams>,
) -> Result<Json<Paginated<Comment>>, AppError> {
    let page = PageParams {
        page: params.page,
        page_size: params.page_size,
    };
    Ok(Json(
        blog_comment::service::list_admin(params.pending.unwrap_or(false), page).await?,
    ))
}

/// POST /api/admin/blog/comments/:id/approve
pub async fn approve(Path(id): Path<String>) -> Result<Json<serde_json::Value>, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::BadRequest("invalid id".into()))?;
    blog_comment::service::approve(id).await?;
    Ok(Json(json!({ "success": true })))
}

/// POST /api/admin/blog/comments/:id/reject
pub async fn reject(Path(id): Path<String>) -> Result<Json<serde_json::Value>, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::BadRequest("invalid id".into()))?;
    blog_comment::service::reject(id).await?;
    Ok(Json(json!({ "success": true })))
}
