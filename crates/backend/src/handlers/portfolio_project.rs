use axum::extract::{Path, Query};
use axum::Json;
use contracts::domain::portfolio::project::{Project, ProjectDto};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::portfolio_project;
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};

#[derive(Deserialize)]
pub struct ProjectListParams {
    pub category: Option<String>,
    pub technology: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_desc: Option<bool>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// GET /api/portfolio/projects
pub async fn list(
    Query(params): Query<ProjectListParams>,
) -> Result<Json<Paginated<Project>>, AppError> {
    let page = portfolio_project::service::list_public(portfolio_project::service::ProjectListParams {
        category: params.category,
        technology: params.technology,
        featured: params.featured,
        search: params.search,
        sort_by: params.sort_by,
        sort_desc: params.sort_desc,
        page: PageParams {
            page: params.page,
            page_size: params.page_size,
        },
    })
    .await?;
    Ok(Json(page))
}

#[derive(Deserialize)]
pub struct FeaturedParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// GET /api/portfolio/projects/featured
pub async fn featured(
    Query(params): Query<FeaturedParams>,
) -> Result<Json<Paginated<Project>>, AppError> {
    let page = PageParams {
        page: params.page,
        page_size: params.page_size,
    };
    Ok(Json(portfolio_project::service::list_featured(page).await?))
}

/// GET /api/portfolio/projects/:slug — каждый хит учитывается счётчиком
pub async fn get_by_slug(Path(slug): Path<String>) -> Result<Json<Project>, AppError> {
    let project = portfolio_project::service::get_public_by_slug(&slug)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(project))
}

/// POST /api/admin/portfolio/projects
pub async fn upsert(Json(dto): Json<ProjectDto>) -> Result<Json<serde_json::Value>, AppError> {
    if dto.id.is_some() {
        portfolio_project::service::update(dto).await?;
        Ok(Json(json!({ "success": true })))
    } else {
        let id = portfolio_project::service::create(dto).await?;
        Ok(Json(json!({ "id": id.to_string() })))
    }
}

#[derive(Deserialize)]
pub struct StatusBody {
    pub status: String,
}

/// POST /api/admin/portfolio/projects/:id/status
pub async fn set_status(
    Path(id): Path<String>,
    Json(body): Json<StatusBody>,
) -> Result<Json<Project>, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::BadRequest("invalid id".into()))?;
    let project = portfolio_project::service::set_status(id, &body.status).await?;
    Ok(Json(project))
}

/// DELETE /api/admin/portfolio/projects/:id
pub async fn delete(Path(id): Path<String>) -> Result<Json<serde_json::Value>, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::BadRequest("invalid id".into()))?;
    if portfolio_project::service::delete(id).await? {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(AppError::NotFound)
    }
}
