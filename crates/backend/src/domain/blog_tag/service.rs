use contracts::domain::blog::tag::{Tag, TagDto};
use uuid::Uuid;

use super::repository;
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};
use crate::shared::slug::slug_or_derive;

pub async fn list_public(
    search: Option<String>,
    params: PageParams,
) -> Result<Paginated<Tag>, AppError> {
    let (mut items, total) =
        repository::list_active(search.as_deref(), params.page_index(), params.page_size()).await?;
    repository::attach_posts_count(&mut items).await?;
    Ok(Paginated::new(items, total, params))
}

pub async fn get_public_by_slug(slug: &str) -> Result<Option<Tag>, AppError> {
    let tag = repository::get_active_by_slug(slug).await?;
    match tag {
        Some(mut tag) => {
            repository::attach_posts_count(std::slice::from_mut(&mut tag)).await?;
            Ok(Some(tag))
        }
        None => Ok(None),
    }
}

pub async fn create(dto: TagDto) -> Result<Uuid, AppError> {
    let slug = slug_or_derive(dto.slug.as_deref(), &dto.name.en);
    if repository::get_by_slug(&slug).await?.is_some() {
        return Err(AppError::Duplicate { resource: "tag" });
    }

    let mut tag = Tag::new_for_insert(slug, &dto);
    tag.validate()?;
    tag.before_write();
    Ok(repository::insert(&tag).await?)
}

pub async fn update(dto: TagDto) -> Result<(), AppError> {
    let id = dto
        .id
        .as_deref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::BadRequest("invalid id".into()))?;

    let mut tag = repository::get_by_id(id).await?.ok_or(AppError::NotFound)?;
    tag.update(&dto);
    tag.validate()?;
    tag.before_write();
    repository::update(&tag).await?;
    Ok(())
}

pub async fn delete(id: Uuid) -> Result<bool, AppError> {
    Ok(repository::delete_by_id(id).await?)
}
