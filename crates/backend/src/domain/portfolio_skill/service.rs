use contracts::domain::portfolio::skill::{Skill, SkillDto, SkillGroup};
use uuid::Uuid;

use super::repository;
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};
use crate::shared::slug::slug_or_derive;

pub async fn list_public(
    group: Option<String>,
    search: Option<String>,
    sort_by: Option<String>,
    sort_desc: bool,
    params: PageParams,
) -> Result<Paginated<Skill>, AppError> {
    let group = match group.as_deref() {
        Some(s) => Some(
            SkillGroup::from_str(s)
                .ok_or_else(|| AppError::BadRequest(format!("unknown group `{s}`")))?,
        ),
        None => None,
    };

    let (items, total) = repository::list_active(
        group,
        search.as_deref(),
        sort_by.as_deref(),
        sort_desc,
        params.page_index(),
        params.page_size(),
    )
    .await?;
    Ok(Paginated::new(items, total, params))
}

pub async fn create(dto: SkillDto) -> Result<Uuid, AppError> {
    let slug = slug_or_derive(dto.slug.as_deref(), &dto.name.en);
    if repository::get_by_slug(&slug).await?.is_some() {
        return Err(AppError::Duplicate { resource: "skill" });
    }

    let mut skill = Skill::new_for_insert(slug, &dto);
    skill.validate()?;
    skill.before_write();
    Ok(repository::insert(&skill).await?)
}

pub async fn update(dto: SkillDto) -> Result<(), AppError> {
    let id = dto
        .id
        .as_deref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::BadRequest("invalid id".into()))?;

    let mut skill = repository::get_by_id(id).await?.ok_or(AppError::NotFound)?;
    skill.update(&dto);
    skill.validate()?;
    skill.before_write();
    repository::update(&skill).await?;
    Ok(())
}

pub async fn delete(id: Uuid) -> Result<bool, AppError> {
    Ok(repository::delete_by_id(id).await?)
}
