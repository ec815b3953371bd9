use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use contracts::domain::blog::subscription::{SubscribeDto, Subscription};
use serde::Deserialize;
use serde_json::json;

use crate::domain::blog_subscription;
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};
use crate::shared::request_meta::RequestMeta;

/// POST /api/blog/subscriptions — повторный email отдаёт 409 с
/// отличимым телом и не создаёт записи
pub async fn subscribe(
    headers: HeaderMap,
    Json(dto): Json<SubscribeDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let meta = RequestMeta::from_headers(&headers);
    blog_subscription::service::subscribe(dto, meta).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Successfully subscribed!",
            "status": "subscribed",
        })),
    ))
}

#[derive(Deserialize)]
pub struct AdminSubscriptionListParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// GET /api/admin/blog/subscriptions
pub async fn list_admin(
    Query(params): Query<AdminSubscriptionListParams>,
) -> Result<Json<Paginated<Subscription>>, AppError> {
    let page = PageParams {
        page: params.page,
        page_size: params.page_size,
    };
    Ok(Json(blog_subscription::service::list_admin(page).await?))
}
