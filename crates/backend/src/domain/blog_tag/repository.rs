use std::collections::{HashMap, HashSet};

use chrono::Utc;
use contracts::domain::blog::tag::{Tag, TagId};
use contracts::domain::common::{AggregateId, Localized, Timestamps};
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, QueryOrder, QuerySelect, Set};
use uuid::Uuid;

use crate::domain::blog_post::repository as post_repository;
use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_tag")]
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
    pub color: String,
    pub is_active: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Tag {
    fn from(m: Model) -> Self {
        Tag {
            id: TagId::new(Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4())),
            slug: m.slug,
            name: Localized::with(m.name_en, m.name_ru, m.name_he),
            description: Localized::with(m.description_en, m.description_ru, m.description_he),
            color: m.color,
            posts_count: 0,
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

fn to_active(tag: &Tag) -> ActiveModel {
    ActiveModel {
        id: Set(tag.id.as_string()),
        slug: Set(tag.slug.clone()),
        name_en: Set(tag.name.en.clone()),
        name_ru: Set(tag.name.ru.clone()),
        name_he: Set(tag.name.he.clone()),
        description_en: Set(tag.description.en.clone()),
        description_ru: Set(tag.description.ru.clone()),
        description_he: Set(tag.description.he.clone()),
        color: Set(tag.color.clone()),
        is_active: Set(tag.is_active),
        created_at: Set(Some(tag.timestamps.created_at)),
        updated_at: Set(Some(tag.timestamps.updated_at)),
    }
}

pub async fn list_active(
    search: Option<&str>,
    page: u64,
    page_size: u64,
) -> anyhow::Result<(Vec<Tag>, u64)> {
    let mut query = Entity::find()
        .filter(Column::IsActive.eq(true))
        .order_by_asc(Column::NameEn);

    if let Some(needle) = search {
        query = query.filter(
            Condition::any()
                .add(Column::NameEn.contains(needle))
                .add(Column::NameRu.contains(needle))
                .add(Column::NameHe.contains(needle)),
        );
    }

    let paginator = query.paginate(conn(), page_size);
    let total = paginator.num_items().await?;
    let models = paginator.fetch_page(page).await?;
    Ok((models.into_iter().map(Into::into).collect(), total))
}

pub async fn get_active_by_slug(slug: &str) -> anyhow::Result<Option<Tag>> {
    let model = Entity::find()
        .filter(Column::Slug.eq(slug))
        .filter(Column::IsActive.eq(true))
        .one(conn())
        .await?;
    Ok(model.map(Into::into))
}

pub async fn get_by_slug(slug: &str) -> anyhow::Result<Option<Tag>> {
    let model = Entity::find()
        .filter(Column::Slug.eq(slug))
        .one(conn())
        .await?;
    Ok(model.map(Into::into))
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Tag>> {
    let model = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(model.map(Into::into))
}

pub async fn insert(tag: &Tag) -> anyhow::Result<Uuid> {
    to_active(tag).insert(conn()).await?;
    Ok(tag.id.value())
}

pub async fn update(tag: &Tag) -> anyhow::Result<()> {
    let mut active = to_active(tag);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn delete_by_id(id: Uuid) -> anyhow::Result<bool> {
    let id = id.to_string();
    post_repository::tag_link::Entity::delete_many()
        .filter(post_repository::tag_link::Column::TagId.eq(id.clone()))
        .exec(conn())
        .await?;
    let result = Entity::delete_by_id(id).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}

pub async fn count_active() -> anyhow::Result<u64> {
    Ok(Entity::find()
        .filter(Column::IsActive.eq(true))
        .count(conn())
        .await?)
}

/// Подсчёт опубликованных постов для страницы тегов
pub async fn attach_posts_count(tags: &mut [Tag]) -> anyhow::Result<()> {
    if tags.is_empty() {
        return Ok(());
    }
    let ids: Vec<String> = tags.iter().map(|t| t.id.as_string()).collect();

    let links = post_repository::tag_link::Entity::find()
        .filter(post_repository::tag_link::Column::TagId.is_in(ids))
        .all(conn())
        .await?;
    if links.is_empty() {
        return Ok(());
    }

    let post_ids: HashSet<String> = links.iter().map(|l| l.post_id.clone()).collect();
    let published: HashSet<String> = post_repository::Entity::find()
        .select_only()
        .column(post_repository::Column::Id)
        .filter(post_repository::Column::Id.is_in(post_ids))
        .filter(post_repository::Column::Status.eq("published"))
        .filter(post_repository::Column::IsActive.eq(true))
        .into_tuple::<String>()
        .all(conn())
        .await?
        .into_iter()
        .collect();

    let mut counts: HashMap<String, i64> = HashMap::new();
    for link in &links {
        if published.contains(&link.post_id) {
            *counts.entry(link.tag_id.clone()).or_insert(0) += 1;
        }
    }
    for tag in tags {
        tag.posts_count = counts.get(&tag.id.as_string()).copied().unwrap_or(0);
    }
    Ok(())
}
