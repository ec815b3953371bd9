use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use contracts::domain::analytics::facts::{
    Event, PageView, TrackEventDto, TrackPageViewDto, Visitor,
};
use serde::Deserialize;
use serde_json::json;

use crate::domain::analytics;
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};
use crate::shared::request_meta::RequestMeta;

/// POST /api/analytics/pageviews
pub async fn track_page_view(
    headers: HeaderMap,
    Json(dto): Json<TrackPageViewDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let meta = RequestMeta::from_headers(&headers);
    analytics::service::track_page_view(dto, meta).await?;
    Ok((StatusCode::CREATED, Json(json!({ "status": "recorded" }))))
}

/// POST /api/analytics/events
pub async fn track_event(
    headers: HeaderMap,
    Json(dto): Json<TrackEventDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let meta = RequestMeta::from_headers(&headers);
    analytics::service::track_event(dto, meta).await?;
    Ok((StatusCode::CREATED, Json(json!({ "status": "recorded" }))))
}

#[derive(Deserialize)]
pub struct VisitorListParams {
    pub is_bot: Option<bool>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// GET /api/admin/analytics/visitors
pub async fn list_visitors(
    Query(params): Query<VisitorListParams>,
) -> Result<Json<Paginated<Visitor>>, AppError> {
    let page = PageParams {
        page: params.page,
        page_size: params.page_size,
    };
    Ok(Json(
        analytics::service::list_visitors(params.is_bot, page).await?,
    ))
}

#[derive(Deserialize)]
pub struct PageViewListParams {
    pub path: Option<String>,
    pub is_bot: Option<bool>,
    pub is_mobile: Option<bool>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// GET /api/admin/analytics/pageviews
pub async fn list_page_views(
    Query(params): Query<PageViewListParams>,
) -> Result<Json<Paginated<PageView>>, AppError> {
    let page = PageParams {
        page: params.page,
        page_size: params.page_size,
    };
    Ok(Json(
        analytics::service::list_page_views(params.path, params.is_bot, params.is_mobile, page)
            .await?,
    ))
}

#[derive(Deserialize)]
pub struct EventListParams {
    pub name: Option<String>,
    pub category: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// GET /api/admin/analytics/events
pub async fn list_events(
    Query(params): Query<EventListParams>,
) -> Result<Json<Paginated<Event>>, AppError> {
    let page = PageParams {
        page: params.page,
        page_size: params.page_size,
    };
    Ok(Json(
        analytics::service::list_events(params.name, params.category, page).await?,
    ))
}
