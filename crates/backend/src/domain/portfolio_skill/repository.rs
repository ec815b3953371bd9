use chrono::Utc;
use contracts::domain::common::{AggregateId, Localized, Timestamps};
use contracts::domain::portfolio::skill::{Skill, SkillGroup, SkillId};
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, QueryOrder, Set};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "portfolio_skill")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub slug: String,
    pub name_en: String,
    pub name_ru: String,
    pub name_he: String,
    pub description_en: String,
    pub description_ru: String,
    pub description_he: String,
    pub icon: String,
    pub level: i32,
    pub skill_group: String,
    pub years_experience: i32,
    pub position: i32,
    pub is_active: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Skill {
    fn from(m: Model) -> Self {
        Skill {
            id: SkillId::new(Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4())),
            slug: m.slug,
            name: Localized::with(m.name_en, m.name_ru, m.name_he),
            description: Localized::with(m.description_en, m.description_ru, m.description_he),
            icon: m.icon,
            level: m.level,
            group: SkillGroup::from_str(&m.skill_group).unwrap_or_default(),
            years_experience: m.years_experience,
            position: m.position,
            is_active: m.is_active,
            timestamps: Timestamps {
                created_at: m.created_at.unwrap_or_else(Utc::now),
                updated_at: m.updated_at.unwrap_or_else(Utc::now),
            },
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(skill: &Skill) -> ActiveModel {
    ActiveModel {
        id: Set(skill.id.as_string()),
        slug: Set(skill.slug.clone()),
        name_en: Set(skill.name.en.clone()),
        name_ru: Set(skill.name.ru.clone()),
        name_he: Set(skill.name.he.clone()),
        description_en: Set(skill.description.en.clone()),
        description_ru: Set(skill.description.ru.clone()),
        description_he: Set(skill.description.he.clone()),
        icon: Set(skill.icon.clone()),
        level: Set(skill.level),
        skill_group: Set(skill.group.as_str().to_string()),
        years_experience: Set(skill.years_experience),
        position: Set(skill.position),
        is_active: Set(skill.is_active),
        created_at: Set(Some(skill.timestamps.created_at)),
        updated_at: Set(Some(skill.timestamps.updated_at)),
    }
}

/// Навыки: фильтр по группе, сортировка по allowlist (position | level),
/// по умолчанию группа + ручной порядок
pub async fn list_active(
    group: Option<SkillGroup>,
    search: Option<&str>,
    sort_by: Option<&str>,
    sort_desc: bool,
    page: u64,
    page_size: u64,
) -> anyhow::Result<(Vec<Skill>, u64)> {
    let mut query = Entity::find().filter(Column::IsActive.eq(true));

    if let Some(group) = group {
        query = query.filter(Column::SkillGroup.eq(group.as_str()));
    }
    if let Some(needle) = search {
        query = query.filter(
            Condition::any()
                .add(Column::NameEn.contains(needle))
                .add(Column::NameRu.contains(needle))
                .add(Column::NameHe.contains(needle)),
        );
    }

    query = match sort_by {
        Some("level") => {
            if sort_desc {
                query.order_by_desc(Column::Level)
            } else {
                query.order_by_asc(Column::Level)
            }
        }
        Some("position") => {
            if sort_desc {
                query.order_by_desc(Column::Position)
            } else {
                query.order_by_asc(Column::Position)
            }
        }
        _ => query
            .order_by_asc(Column::SkillGroup)
            .order_by_asc(Column::Position),
    };

    let paginator = query.paginate(conn(), page_size);
    let total = paginator.num_items().await?;
    let models = paginator.fetch_page(page).await?;
    Ok((models.into_iter().map(Into::into).collect(), total))
}

pub async fn get_by_slug(slug: &str) -> anyhow::Result<Option<Skill>> {
    let model = Entity::find()
        .filter(Column::Slug.eq(slug))
        .one(conn())
        .await?;
    Ok(model.map(Into::into))
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Skill>> {
    let model = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(model.map(Into::into))
}

pub async fn insert(skill: &Skill) -> anyhow::Result<Uuid> {
    to_active(skill).insert(conn()).await?;
    Ok(skill.id.value())
}

pub async fn update(skill: &Skill) -> anyhow::Result<()> {
    let mut active = to_active(skill);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn delete_by_id(id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}
