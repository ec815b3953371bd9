use contracts::domain::common::{AggregateId, PublishStatus};
use contracts::domain::portfolio::project::{Project, ProjectDto};
use uuid::Uuid;

use super::repository::{self, ProjectListQuery};
use crate::domain::{portfolio_category, portfolio_technology};
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};
use crate::shared::slug::slug_or_derive;

/// Публичные фильтры списка проектов
#[derive(Debug, Clone, Default)]
pub struct ProjectListParams {
    pub category: Option<String>,
    pub technology: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_desc: Option<bool>,
    pub page: PageParams,
}

pub async fn list_public(params: ProjectListParams) -> Result<Paginated<Project>, AppError> {
    let category_id = match &params.category {
        Some(slug) => match portfolio_category::repository::get_active_by_slug(slug).await? {
            Some(category) => Some(category.id.as_string()),
            None => return Ok(Paginated::new(Vec::new(), 0, params.page)),
        },
        None => None,
    };
    let technology_id = match &params.technology {
        Some(slug) => match portfolio_technology::repository::get_active_by_slug(slug).await? {
            Some(technology) => Some(technology.id.as_string()),
            None => return Ok(Paginated::new(Vec::new(), 0, params.page)),
        },
        None => None,
    };

    let (items, total) = repository::list_published(ProjectListQuery {
        category_id,
        technology_id,
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

pub async fn list_featured(page: PageParams) -> Result<Paginated<Project>, AppError> {
    list_public(ProjectListParams {
        featured: Some(true),
        page,
        ..Default::default()
    })
    .await
}

/// Детальная выдача с атомарным инкрементом счётчика просмотров
pub async fn get_public_by_slug(slug: &str) -> Result<Option<Project>, AppError> {
    let project = match repository::get_published_by_slug(slug).await? {
        Some(project) => project,
        None => return Ok(None),
    };
    repository::increment_views(&project.id.as_string()).await?;
    Ok(repository::get_published_by_slug(slug).await?)
}

pub async fn create(dto: ProjectDto) -> Result<Uuid, AppError> {
    let slug = slug_or_derive(dto.slug.as_deref(), &dto.title.en);
    if repository::get_by_slug(&slug).await?.is_some() {
        return Err(AppError::Duplicate { resource: "project" });
    }

    let mut project = Project::new_for_insert(slug, &dto);
    if let Some(status) = &dto.status {
        let status = PublishStatus::from_str(status)
            .ok_or_else(|| AppError::BadRequest(format!("unknown status `{status}`")))?;
        project.apply_status(status);
    }
    project.validate()?;
    project.before_write();

    let id = repository::insert(&project).await?;
    let id_str = project.id.as_string();
    repository::set_categories(&id_str, &dto.category_ids).await?;
    repository::set_technologies(&id_str, &dto.technology_ids).await?;
    Ok(id)
}

pub async fn update(dto: ProjectDto) -> Result<(), AppError> {
    let id = dto
        .id
        .as_deref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::BadRequest("invalid id".into()))?;

    let mut project = repository::get_by_id(id).await?.ok_or(AppError::NotFound)?;
    project.update(&dto);
    if let Some(status) = &dto.status {
        let status = PublishStatus::from_str(status)
            .ok_or_else(|| AppError::BadRequest(format!("unknown status `{status}`")))?;
        project.apply_status(status);
    }
    project.validate()?;
    project.before_write();

    repository::update(&project).await?;
    let id_str = project.id.as_string();
    repository::set_categories(&id_str, &dto.category_ids).await?;
    repository::set_technologies(&id_str, &dto.technology_ids).await?;
    Ok(())
}

/// Смена статуса публикации; published_at ставится один раз
pub async fn set_status(id: Uuid, status: &str) -> Result<Project, AppError> {
    let status = PublishStatus::from_str(status)
        .ok_or_else(|| AppError::BadRequest(format!("unknown status `{status}`")))?;

    let mut project = repository::get_by_id(id).await?.ok_or(AppError::NotFound)?;
    project.apply_status(status);
    project.before_write();
    repository::update(&project).await?;
    Ok(project)
}

pub async fn delete(id: Uuid) -> Result<bool, AppError> {
    Ok(repository::delete_by_id(id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support::init_test_db;
    use contracts::domain::common::Localized;

    fn unique_dto() -> ProjectDto {
        ProjectDto {
            slug: Some(format!("project-{}", Uuid::new_v4())),
            title: Localized::new("Portfolio site"),
            description: Localized::new("Multilingual content backend"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_project_lifecycle_mirrors_post_rules() {
        init_test_db().await;
        let dto = unique_dto();
        let slug = dto.slug.clone().unwrap();
        let id = create(dto).await.unwrap();

        assert!(get_public_by_slug(&slug).await.unwrap().is_none());

        let published = set_status(id, "published").await.unwrap();
        let stamped = published.publication.published_at.unwrap();

        let fetched = get_public_by_slug(&slug).await.unwrap().unwrap();
        assert_eq!(fetched.views_count, 1);

        set_status(id, "draft").await.unwrap();
        assert!(get_public_by_slug(&slug).await.unwrap().is_none());

        let republished = set_status(id, "published").await.unwrap();
        assert_eq!(republished.publication.published_at, Some(stamped));
    }
}
