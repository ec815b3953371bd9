use chrono::Utc;
use contracts::domain::contacts::message::{ContactMessage, ContactMessageDto, ContactStatus};
use uuid::Uuid;

use super::repository;
use crate::shared::config;
use crate::shared::error::AppError;
use crate::shared::notify;
use crate::shared::pagination::{PageParams, Paginated};
use crate::shared::request_meta::RequestMeta;

/// Приём сообщения контактной формы. После коммита строки уведомления
/// уходят фоновой задачей, ответ формы их не ждёт и об их судьбе не знает.
pub async fn submit(dto: ContactMessageDto, meta: RequestMeta) -> Result<(), AppError> {
    let message = ContactMessage::new_for_insert(&dto, meta.ip_address, meta.user_agent);
    message.validate()?;
    repository::insert(&message).await?;

    let notifications = config::get().notifications.clone();
    tokio::spawn(async move {
        notify::notify_contact_message(&message, &notifications).await;
    });

    Ok(())
}

pub async fn list_admin(
    status: Option<String>,
    is_read: Option<bool>,
    params: PageParams,
) -> Result<Paginated<ContactMessage>, AppError> {
    let status = match status.as_deref() {
        Some(s) => Some(
            ContactStatus::from_str(s)
                .ok_or_else(|| AppError::BadRequest(format!("unknown status `{s}`")))?,
        ),
        None => None,
    };
    let (items, total) =
        repository::list(status, is_read, params.page_index(), params.page_size()).await?;
    Ok(Paginated::new(items, total, params))
}

/// Отметка о прочтении; read_at ставится при первом прочтении
pub async fn mark_read(id: Uuid) -> Result<ContactMessage, AppError> {
    let mut message = repository::get_by_id(id).await?.ok_or(AppError::NotFound)?;
    if !message.is_read {
        message.is_read = true;
        message.read_at = Some(Utc::now());
        message.timestamps.touch();
        repository::update(&message).await?;
    }
    Ok(message)
}

/// Статус workflow; от is_read не зависит
pub async fn set_status(id: Uuid, status: &str) -> Result<ContactMessage, AppError> {
    let status = ContactStatus::from_str(status)
        .ok_or_else(|| AppError::BadRequest(format!("unknown status `{status}`")))?;

    let mut message = repository::get_by_id(id).await?.ok_or(AppError::NotFound)?;
    message.status = status;
    message.timestamps.touch();
    repository::update(&message).await?;
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support::init_test_db;

    fn dto() -> ContactMessageDto {
        ContactMessageDto {
            name: "Dana".into(),
            email: format!("dana-{}@example.com", Uuid::new_v4()),
            subject: "Work".into(),
            message: "Let's talk".into(),
        }
    }

    async fn find_by_email(email: &str) -> ContactMessage {
        let (items, _) = repository::list(None, None, 0, 100).await.unwrap();
        items
            .into_iter()
            .find(|m| m.email == email)
            .expect("submitted message is stored")
    }

    #[tokio::test]
    async fn test_submit_persists_with_new_status() {
        init_test_db().await;
        let dto = dto();
        let email = dto.email.clone();
        submit(dto, RequestMeta::default()).await.unwrap();

        let stored = find_by_email(&email).await;
        assert_eq!(stored.status, ContactStatus::New);
        assert!(!stored.is_read);
        assert!(stored.read_at.is_none());
    }

    #[tokio::test]
    async fn test_validation_rejects_empty_subject() {
        init_test_db().await;
        let bad = ContactMessageDto {
            subject: "  ".into(),
            ..dto()
        };
        match submit(bad, RequestMeta::default()).await {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "subject"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_read_flag_and_status_are_independent() {
        init_test_db().await;
        let dto = dto();
        let email = dto.email.clone();
        submit(dto, RequestMeta::default()).await.unwrap();
        let id = find_by_email(&email).await.id.0;

        let read = mark_read(id).await.unwrap();
        assert!(read.is_read);
        let first_read_at = read.read_at.unwrap();

        // Смена статуса не трогает прочтение, повторный read не двигает метку
        let replied = set_status(id, "replied").await.unwrap();
        assert!(replied.is_read);
        assert_eq!(replied.status, ContactStatus::Replied);

        let again = mark_read(id).await.unwrap();
        assert_eq!(again.read_at.unwrap(), first_read_at);
    }
}
