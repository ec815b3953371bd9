use axum::extract::{Path, Query};
use axum::Json;
use contracts::domain::portfolio::skill::{Skill, SkillDto};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::portfolio_skill;
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};

#[derive(Deserialize)]
pub struct SkillListParams {
    pub group: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_desc: Option<bool>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// GET /api/portfolio/skills
pub async fn list(
    Query(params): Query<SkillListParams>,
) -> Result<Json<Paginated<Skill>>, AppError> {
    let page = PageParams {
        page: params.page,
        page_size: params.page_size,
    };
    Ok(Json(
        portfolio_skill::service::list_public(
            params.group,
            params.search,
            params.sort_by,
            params.sort_desc.unwrap_or(false),
            page,
        )
        .await?,
    ))
}

/// POST /api/admin/portfolio/skills
pub async fn upsert(Json(dto): Json<SkillDto>) -> Result<Json<serde_json::Value>, AppError> {
    if dto.id.is_some() {
        portfolio_skill::service::update(dto).await?;
        Ok(Json(json!({ "success": true })))
    } else {
        let id = portfolio_skill::service::create(dto).await?;
        Ok(Json(json!({ "id": id.to_string() })))
    }
}

/// DELETE /api/admin/portfolio/skills/:id
pub async fn delete(Path(id): Path<String>) -> Result<Json<serde_json::Value>, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::BadRequest("invalid id".into()))?;
    if portfolio_skill::service::delete(id).await? {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(AppError::NotFound)
    }
}
