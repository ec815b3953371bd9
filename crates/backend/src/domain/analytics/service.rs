use contracts::domain::analytics::facts::{
    Event, PageView, TrackEventDto, TrackPageViewDto, Visitor,
};
use contracts::domain::common::Timestamps;
use uuid::Uuid;

use super::repository::{self, VisitorAttrs};
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};
use crate::shared::request_meta::RequestMeta;

/// Просмотр страницы: факт дописывается, посетитель идентифицируется по
/// непрозрачному ключу, сессия двигается вперёд.
pub async fn track_page_view(dto: TrackPageViewDto, meta: RequestMeta) -> Result<(), AppError> {
    dto.validate()?;

    let timestamps = Timestamps::new();
    let view = PageView {
        id: Uuid::new_v4().to_string(),
        path: dto.path.clone(),
        query: dto.query.clone(),
        referrer: dto.referrer.clone(),
        language: dto.language.clone(),
        visitor_key: dto.visitor_key.clone(),
        session_key: dto.session_key.clone(),
        ip_address: meta.ip_address.clone(),
        user_agent: meta.user_agent.clone(),
        is_bot: dto.is_bot,
        is_mobile: dto.is_mobile,
        duration: dto.duration,
        timestamps,
    };
    repository::insert_page_view(&view).await?;

    repository::touch_or_create_visitor(
        &dto.visitor_key,
        &VisitorAttrs {
            ip_address: meta.ip_address,
            user_agent: meta.user_agent,
            language: dto.language.clone(),
            referrer: dto.referrer.clone(),
            is_bot: dto.is_bot,
        },
    )
    .await?;

    if !dto.session_key.trim().is_empty() {
        repository::record_session_page(&dto.session_key, &dto.visitor_key, &dto.path).await?;
    }
    Ok(())
}

/// Событие: факт дописывается, посетитель создаётся при первом появлении
pub async fn track_event(dto: TrackEventDto, meta: RequestMeta) -> Result<(), AppError> {
    dto.validate()?;

    let event = Event {
        id: Uuid::new_v4().to_string(),
        name: dto.name.clone(),
        category: dto.category.clone(),
        data: dto.data.clone(),
        path: dto.path.clone(),
        visitor_key: dto.visitor_key.clone(),
        session_key: dto.session_key.clone(),
        ip_address: meta.ip_address.clone(),
        user_agent: meta.user_agent.clone(),
        timestamps: Timestamps::new(),
    };
    repository::insert_event(&event).await?;

    if repository::get_visitor_by_key(&dto.visitor_key).await?.is_none() {
        repository::touch_or_create_visitor(
            &dto.visitor_key,
            &VisitorAttrs {
                ip_address: meta.ip_address,
                user_agent: meta.user_agent,
                ..Default::default()
            },
        )
        .await?;
    }
    Ok(())
}

pub async fn list_visitors(
    is_bot: Option<bool>,
    params: PageParams,
) -> Result<Paginated<Visitor>, AppError> {
    let (items, total) =
        repository::list_visitors(is_bot, params.page_index(), params.page_size()).await?;
    Ok(Paginated::new(items, total, params))
}

pub async fn list_page_views(
    path: Option<String>,
    is_bot: Option<bool>,
    is_mobile: Option<bool>,
    params: PageParams,
) -> Result<Paginated<PageView>, AppError> {
    let (items, total) = repository::list_page_views(
        path.as_deref(),
        is_bot,
        is_mobile,
        params.page_index(),
        params.page_size(),
    )
    .await?;
    Ok(Paginated::new(items, total, params))
}

pub async fn list_events(
    name: Option<String>,
    category: Option<String>,
    params: PageParams,
) -> Result<Paginated<Event>, AppError> {
    let (items, total) = repository::list_events(
        name.as_deref(),
        category.as_deref(),
        params.page_index(),
        params.page_size(),
    )
    .await?;
    Ok(Paginated::new(items, total, params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support::init_test_db;

    fn page_view(visitor_key: &str, session_key: &str, path: &str) -> TrackPageViewDto {
        TrackPageViewDto {
            visitor_key: visitor_key.into(),
            session_key: session_key.into(),
            path: path.into(),
            language: "ru".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_repeat_identification_updates_visitor_aggregate() {
        init_test_db().await;
        let key = format!("visitor-{}", Uuid::new_v4());
        let session = format!("session-{}", Uuid::new_v4());

        track_page_view(page_view(&key, &session, "/"), RequestMeta::default())
            .await
            .unwrap();
        let first = repository::get_visitor_by_key(&key).await.unwrap().unwrap();
        assert_eq!(first.visits_count, 1);

        track_page_view(page_view(&key, &session, "/blog"), RequestMeta::default())
            .await
            .unwrap();
        let second = repository::get_visitor_by_key(&key).await.unwrap().unwrap();
        assert_eq!(second.visits_count, 2);
        assert!(second.last_visit_at >= first.last_visit_at);
    }

    #[tokio::test]
    async fn test_second_page_view_clears_bounce() {
        init_test_db().await;
        let key = format!("visitor-{}", Uuid::new_v4());
        let session = format!("session-{}", Uuid::new_v4());

        track_page_view(page_view(&key, &session, "/"), RequestMeta::default())
            .await
            .unwrap();
        let opened = repository::get_session_by_key(&session).await.unwrap().unwrap();
        assert!(opened.is_bounce);
        assert_eq!(opened.entry_page, "/");
        assert_eq!(opened.pages_viewed, 1);

        track_page_view(page_view(&key, &session, "/about"), RequestMeta::default())
            .await
            .unwrap();
        let moved = repository::get_session_by_key(&session).await.unwrap().unwrap();
        assert!(!moved.is_bounce);
        assert_eq!(moved.exit_page, "/about");
        assert_eq!(moved.pages_viewed, 2);
    }

    #[tokio::test]
    async fn test_event_requires_name() {
        init_test_db().await;
        let bad = TrackEventDto {
            visitor_key: "v".into(),
            name: "  ".into(),
            ..Default::default()
        };
        match track_event(bad, RequestMeta::default()).await {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "name"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
