use chrono::Utc;
use contracts::domain::common::{AggregateId, Localized, Timestamps};
use contracts::domain::portfolio::technology::{Technology, TechnologyId};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};
use uuid::Uuid;

use crate::domain::portfolio_project::repository as project_repository;
use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "portfolio_technology")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description_en: String,
    pub description_ru: String,
    pub description_he: String,
    pub icon: String,
    pub color: String,
    pub website: String,
    pub version: String,
    pub position: i32,
    pub is_active: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Technology {
    fn from(m: Model) -> Self {
        Technology {
            id: TechnologyId::new(Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4())),
            slug: m.slug,
            name: m.name,
            description: Localized::with(m.description_en, m.description_ru, m.description_he),
            icon: m.icon,
            color: m.color,
            website: m.website,
            version: m.version,
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

fn to_active(technology: &Technology) -> ActiveModel {
    ActiveModel {
        id: Set(technology.id.as_string()),
        slug: Set(technology.slug.clone()),
        name: Set(technology.name.clone()),
        description_en: Set(technology.description.en.clone()),
        description_ru: Set(technology.description.ru.clone()),
        description_he: Set(technology.description.he.clone()),
        icon: Set(technology.icon.clone()),
        color: Set(technology.color.clone()),
        website: Set(technology.website.clone()),
        version: Set(technology.version.clone()),
        position: Set(technology.position),
        is_active: Set(technology.is_active),
        created_at: Set(Some(technology.timestamps.created_at)),
        updated_at: Set(Some(technology.timestamps.updated_at)),
    }
}

pub async fn list_active(
    search: Option<&str>,
    page: u64,
    page_size: u64,
) -> anyhow::Result<(Vec<Technology>, u64)> {
    let mut query = Entity::find()
        .filter(Column::IsActive.eq(true))
        .order_by_asc(Column::Position)
        .order_by_asc(Column::Name);

    if let Some(needle) = search {
        query = query.filter(Column::Name.contains(needle));
    }

    let paginator = query.paginate(conn(), page_size);
    let total = paginator.num_items().await?;
    let models = paginator.fetch_page(page).await?;
    Ok((models.into_iter().map(Into::into).collect(), total))
}

pub async fn get_active_by_slug(slug: &str) -> anyhow::Result<Option<Technology>> {
    let model = Entity::find()
        .filter(Column::Slug.eq(slug))
        .filter(Column::IsActive.eq(true))
        .one(conn())
        .await?;
    Ok(model.map(Into::into))
}

pub async fn get_by_slug(slug: &str) -> anyhow::Result<Option<Technology>> {
    let model = Entity::find()
        .filter(Column::Slug.eq(slug))
        .one(conn())
        .await?;
    Ok(model.map(Into::into))
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Technology>> {
    let model = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(model.map(Into::into))
}

pub async fn insert(technology: &Technology) -> anyhow::Result<Uuid> {
    to_active(technology).insert(conn()).await?;
    Ok(technology.id.value())
}

pub async fn update(technology: &Technology) -> anyhow::Result<()> {
    let mut active = to_active(technology);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn delete_by_id(id: Uuid) -> anyhow::Result<bool> {
    let id = id.to_string();
    project_repository::technology_link::Entity::delete_many()
        .filter(project_repository::technology_link::Column::TechnologyId.eq(id.clone()))
        .exec(conn())
        .await?;
    let result = Entity::delete_by_id(id).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}
