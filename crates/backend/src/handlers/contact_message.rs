use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use contracts::domain::contacts::message::{ContactMessage, ContactMessageDto};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::contact_message;
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};
use crate::shared::request_meta::RequestMeta;

/// POST /api/contacts/messages — ответ подтверждает только приём;
/// уведомления уходят после коммита и на ответ не влияют
pub async fn submit(
    headers: HeaderMap,
    Json(dto): Json<ContactMessageDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let meta = RequestMeta::from_headers(&headers);
    contact_message::service::submit(dto, meta).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Message received. We'll get back to you soon.",
            "status": "received",
        })),
    ))
}

#[derive(Deserialize)]
pub struct AdminMessageListParams {
    pub status: Option<String>,
    pub is_read: Option<bool>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// GET /api/admin/contacts/messages
pub async fn list_admin(
    Query(params): Query<AdminMessageListParams>,
) -> Result<Json<Paginated<ContactMessage>>, AppError> {
    let page = PageParams {
        page: params.page,
        page_size: params.page_size,
    };
    Ok(Json(
        contact_message::service::list_admin(params.status, params.is_read, page).await?,
    ))
}

/// POST /api/admin/contacts/messages/:id/read
pub async fn mark_read(Path(id): Path<String>) -> Result<Json<ContactMessage>, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::BadRequest("invalid id".into()))?;
    Ok(Json(contact_message::service::mark_read(id).await?))
}

#[derive(Deserialize)]
pub struct StatusBody {
    pub status: String,
}

/// POST /api/admin/contacts/messages/:id/status
pub async fn set_status(
    Path(id): Path<String>,
    Json(body): Json<StatusBody>,
) -> Result<Json<ContactMessage>, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::BadRequest("invalid id".into()))?;
    Ok(Json(
        contact_message::service::set_status(id, &body.status).await?,
    ))
}
