use contracts::domain::portfolio::category::{Category, CategoryDto};
use uuid::Uuid;

use super::repository;
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};
use crate::shared::slug::slug_or_derive;

pub async fn list_public(
    search: Option<String>,
    params: PageParams,
) -> Result<Paginated<Category>, AppError> {
    let (items, total) =
        repository::list_active(search.as_deref(), params.page_index(), params.page_size()).await?;
    Ok(Paginated::new(items, total, params))
}

pub async fn get_public_by_slug(slug: &str) -> Result<Option<Category>, AppError> {
    Ok(repository::get_active_by_slug(slug).await?)
}

pub async fn create(dto: CategoryDto) -> Result<Uuid, AppError> {
    let slug = slug_or_derive(dto.slug.as_deref(), &dto.name.en);
    if repository::get_by_slug(&slug).await?.is_some() {
        return Err(AppError::Duplicate {
            resource: "category",
        });
    }

    let mut category = Category::new_for_insert(slug, &dto);
    category.validate()?;
    category.before_write();
    Ok(repository::insert(&category).await?)
}

pub async fn update(dto: CategoryDto) -> Result<(), AppError> {
    let id = dto
        .id
        .as_deref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::BadRequest("invalid id".into()))?;

    let mut category = repository::get_by_id(id).await?.ok_or(AppError::NotFound)?;
    category.update(&dto);
    category.validate()?;
    category.before_write();
    repository::update(&category).await?;
    Ok(())
}

pub async fn delete(id: Uuid) -> Result<bool, AppError> {
    Ok(repository::delete_by_id(id).await?)
}
