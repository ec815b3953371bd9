use contracts::domain::portfolio::technology::{Technology, TechnologyDto};
use uuid::Uuid;

use super::repository;
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};
use crate::shared::slug::slug_or_derive;

pub async fn list_public(
    search: Option<String>,
    params: PageParams,
) -> Result<Paginated<Technology>, AppError> {
    let (items, total) =
        repository::list_active(search.as_deref(), params.page_index(), params.page_size()).await?;
    Ok(Paginated::new(items, total, params))
}

pub async fn get_public_by_slug(slug: &str) -> Result<Option<Technology>, AppError> {
    Ok(repository::get_active_by_slug(slug).await?)
}

pub async fn create(dto: TechnologyDto) -> Result<Uuid, AppError> {
    let slug = slug_or_derive(dto.slug.as_deref(), &dto.name);
    if repository::get_by_slug(&slug).await?.is_some() {
        return Err(AppError::Duplicate {
            resource: "technology",
        });
    }

    let mut technology = Technology::new_for_insert(slug, &dto);
    technology.validate()?;
    technology.before_write();
    Ok(repository::insert(&technology).await?)
}

pub async fn update(dto: TechnologyDto) -> Result<(), AppError> {
    let id = dto
        .id
        .as_deref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::BadRequest("invalid id".into()))?;

    let mut technology = repository::get_by_id(id).await?.ok_or(AppError::NotFound)?;
    technology.update(&dto);
    technology.validate()?;
    technology.before_write();
    repository::update(&technology).await?;
    Ok(())
}

pub async fn delete(id: Uuid) -> Result<bool, AppError> {
    Ok(repository::delete_by_id(id).await?)
}
