use contracts::domain::blog::post::{Post, PostDto};
use contracts::domain::common::{AggregateId, PublishStatus};
use uuid::Uuid;

use super::repository::{self, PostListQuery};
use crate::domain::{blog_category, blog_tag};
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};
use crate::shared::slug::slug_or_derive;

/// Публичные фильтры списка постов
#[derive(Debug, Clone, Default)]
pub struct PostListParams {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_desc: Option<bool>,
    pub page: PageParams,
}

pub async fn list_public(params: PostListParams) -> Result<Paginated<Post>, AppError> {
    // Слаги фильтров разрешаются в id заранее; неизвестный слаг — пустая
    // выдача, не ошибка
    let category_id = match &params.category {
        Some(slug) => match blog_category::repository::get_active_by_slug(slug).await? {
            Some(category) => Some(category.id.as_string()),
            None => return Ok(Paginated::new(Vec::new(), 0, params.page)),
        },
        None => None,
    };
    let tag_id = match &params.tag {
        Some(slug) => match blog_tag::repository::get_active_by_slug(slug).await? {
            Some(tag) => Some(tag.id.as_string()),
            None => return Ok(Paginated::new(Vec::new(), 0, params.page)),
        },
        None => None,
    };

    let (items, total) = repository::list_published(PostListQuery {
        category_id,
        tag_id,
        featured: params.featured,
        search: params.search.clone(),
        sort_by: params.sort_by.clone(),
        sort_desc: params.sort_desc,
        page: params.page.page_index(),
        page_size: params.page.page_size(),
    })
    .await?;
    Ok(Paginated::new(items, total, params.page))
}

pub async fn list_featured(page: PageParams) -> Result<Paginated<Post>, AppError> {
    list_public(PostListParams {
        featured: Some(true),
        page,
        ..Default::default()
    })
    .await
}

/// Детальная выдача: каждый хит атомарно прибавляет 1 к views_count;
/// дедупликации по посетителю нет, это сырой счётчик.
pub async fn get_public_by_slug(slug: &str) -> Result<Option<Post>, AppError> {
    let post = match repository::get_published_by_slug(slug).await? {
        Some(post) => post,
        None => return Ok(None),
    };
    repository::increment_views(&post.id.as_string()).await?;
    // Перечитываем запись, чтобы выдача отражала и параллельные хиты
    Ok(repository::get_published_by_slug(slug).await?)
}

pub async fn create(dto: PostDto) -> Result<Uuid, AppError> {
    let slug = slug_or_derive(dto.slug.as_deref(), &dto.title.en);
    if repository::get_by_slug(&slug).await?.is_some() {
        return Err(AppError::Duplicate { resource: "post" });
    }

    let mut post = Post::new_for_insert(slug, &dto);
    if let Some(status) = &dto.status {
        let status = PublishStatus::from_str(status)
            .ok_or_else(|| AppError::BadRequest(format!("unknown status `{status}`")))?;
        post.apply_status(status);
    }
    post.validate()?;
    post.before_write();

    let id = repository::insert(&post).await?;
    let id_str = post.id.as_string();
    repository::set_categories(&id_str, &dto.category_ids).await?;
    repository::set_tags(&id_str, &dto.tag_ids).await?;
    Ok(id)
}

pub async fn update(dto: PostDto) -> Result<(), AppError> {
    let id = dto
        .id
        .as_deref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::BadRequest("invalid id".into()))?;

    let mut post = repository::get_by_id(id).await?.ok_or(AppError::NotFound)?;
    post.update(&dto);
    if let Some(status) = &dto.status {
        let status = PublishStatus::from_str(status)
            .ok_or_else(|| AppError::BadRequest(format!("unknown status `{status}`")))?;
        post.apply_status(status);
    }
    post.validate()?;
    post.before_write();

    repository::update(&post).await?;
    let id_str = post.id.as_string();
    repository::set_categories(&id_str, &dto.category_ids).await?;
    repository::set_tags(&id_str, &dto.tag_ids).await?;
    Ok(())
}

/// Смена статуса публикации. Переходы не ограничены; published_at
/// ставится один раз при первой публикации.
pub async fn set_status(id: Uuid, status: &str) -> Result<Post, AppError> {
    let status = PublishStatus::from_str(status)
        .ok_or_else(|| AppError::BadRequest(format!("unknown status `{status}`")))?;

    let mut post = repository::get_by_id(id).await?.ok_or(AppError::NotFound)?;
    post.apply_status(status);
    post.before_write();
    repository::update(&post).await?;
    Ok(post)
}

pub async fn delete(id: Uuid) -> Result<bool, AppError> {
    Ok(repository::delete_by_id(id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support::init_test_db;
    use contracts::domain::common::Localized;

    fn unique_dto(tag: &str) -> PostDto {
        let suffix = Uuid::new_v4().to_string();
        PostDto {
            slug: Some(format!("{tag}-{suffix}")),
            title: Localized::with("Title", "Заголовок", ""),
            content: Localized::new("Body"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_draft_is_invisible_until_published() {
        init_test_db().await;
        let dto = unique_dto("draft-lifecycle");
        let slug = dto.slug.clone().unwrap();
        let id = create(dto.clone()).await.unwrap();

        // Черновик не виден публично даже по прямому slug
        assert!(get_public_by_slug(&slug).await.unwrap().is_none());

        let post = set_status(id, "published").await.unwrap();
        assert!(post.publication.published_at.is_some());

        // Теперь пост виден, счётчик начинается с нуля и растёт на хит
        let fetched = get_public_by_slug(&slug).await.unwrap().unwrap();
        assert_eq!(fetched.views_count, 1);
    }

    #[tokio::test]
    async fn test_published_at_is_stamped_exactly_once() {
        init_test_db().await;
        let id = create(unique_dto("stamp-once")).await.unwrap();

        let first = set_status(id, "published").await.unwrap();
        let stamped = first.publication.published_at.unwrap();

        let archived = set_status(id, "archived").await.unwrap();
        assert_eq!(archived.publication.published_at, Some(stamped));

        let republished = set_status(id, "published").await.unwrap();
        assert_eq!(republished.publication.published_at, Some(stamped));
    }

    #[tokio::test]
    async fn test_concurrent_detail_hits_are_all_counted() {
        init_test_db().await;
        let dto = unique_dto("concurrent-views");
        let slug = dto.slug.clone().unwrap();
        let id = create(dto).await.unwrap();
        set_status(id, "published").await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..10 {
            let slug = slug.clone();
            handles.push(tokio::spawn(async move {
                get_public_by_slug(&slug).await.unwrap().unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let post = repository::get_by_slug(&slug).await.unwrap().unwrap();
        assert_eq!(post.views_count, 10);
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_rejected() {
        init_test_db().await;
        let dto = unique_dto("dup-slug");
        create(dto.clone()).await.unwrap();
        match create(dto).await {
            Err(AppError::Duplicate { resource }) => assert_eq!(resource, "post"),
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }
}
