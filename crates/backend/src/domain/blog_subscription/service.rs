use contracts::domain::blog::subscription::{SubscribeDto, Subscription};

use super::repository;
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};
use crate::shared::request_meta::RequestMeta;

/// Подписка на блог. Повторный email — отдельный распознаваемый исход,
/// новая запись при этом не создаётся.
pub async fn subscribe(dto: SubscribeDto, meta: RequestMeta) -> Result<Subscription, AppError> {
    let subscription = Subscription::new_for_insert(&dto, meta.ip_address);
    subscription.validate()?;

    if repository::find_by_email(&subscription.email).await?.is_some() {
        return Err(AppError::Duplicate {
            resource: "subscription",
        });
    }

    repository::insert(&subscription).await?;
    Ok(subscription)
}

pub async fn list_admin(params: PageParams) -> Result<Paginated<Subscription>, AppError> {
    let (items, total) =
        repository::list_active(params.page_index(), params.page_size()).await?;
    Ok(Paginated::new(items, total, params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support::init_test_db;
    use uuid::Uuid;

    fn dto(email: String) -> SubscribeDto {
        SubscribeDto {
            email,
            name: "Reader".into(),
            language: Some("ru".into()),
        }
    }

    #[tokio::test]
    async fn test_new_email_creates_active_subscription() {
        init_test_db().await;
        let email = format!("reader-{}@example.com", Uuid::new_v4());
        let subscription = subscribe(dto(email.clone()), RequestMeta::default())
            .await
            .unwrap();
        assert!(subscription.is_active);

        let stored = repository::find_by_email(&email).await.unwrap().unwrap();
        assert!(stored.is_active);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected_without_new_record() {
        init_test_db().await;
        let email = format!("dup-{}@example.com", Uuid::new_v4());
        subscribe(dto(email.clone()), RequestMeta::default())
            .await
            .unwrap();
        let first_id = repository::find_by_email(&email)
            .await
            .unwrap()
            .unwrap()
            .id;

        match subscribe(dto(email.clone()), RequestMeta::default()).await {
            Err(AppError::Duplicate { resource }) => assert_eq!(resource, "subscription"),
            other => panic!("expected duplicate, got {other:?}"),
        }

        // Запись осталась ровно одна, прежняя
        let stored = repository::find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(stored.id, first_id);
    }

    #[tokio::test]
    async fn test_unknown_language_code_falls_back_to_en() {
        init_test_db().await;
        let email = format!("lang-{}@example.com", Uuid::new_v4());
        let subscription = subscribe(
            SubscribeDto {
                email,
                name: String::new(),
                language: Some("fr".into()),
            },
            RequestMeta::default(),
        )
        .await
        .unwrap();
        assert_eq!(
            subscription.language,
            contracts::domain::common::Language::En
        );
    }
}
