use std::collections::HashMap;

use chrono::Utc;
use contracts::domain::common::{
    AggregateId, Featured, Localized, Publication, PublishStatus, Seo, Timestamps,
};
use contracts::domain::portfolio::category::CategoryRef;
use contracts::domain::portfolio::project::{Project, ProjectId};
use contracts::domain::portfolio::technology::TechnologyRef;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{Condition, QueryOrder, Set};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "portfolio_project")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub slug: String,
    pub title_en: String,
    pub title_ru: String,
    pub title_he: String,
    pub subtitle_en: String,
    pub subtitle_ru: String,
    pub subtitle_he: String,
    pub description_en: String,
    pub description_ru: String,
    pub description_he: String,
    pub content_en: String,
    pub content_ru: String,
    pub content_he: String,
    pub meta_title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub status: String,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
    pub is_featured: bool,
    pub featured_order: i32,
    pub views_count: i64,
    pub client_name: String,
    pub client_website: String,
    pub project_url: String,
    pub github_url: String,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub is_ongoing: bool,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Связка проект — категория
pub mod category_link {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "portfolio_project_category")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub project_id: String,
        #[sea_orm(primary_key, auto_increment = false)]
        pub category_id: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Связка проект — технология
pub mod technology_link {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "portfolio_project_technology")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub project_id: String,
        #[sea_orm(primary_key, auto_increment = false)]
        pub technology_id: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl From<Model> for Project {
    fn from(m: Model) -> Self {
        Project {
            id: ProjectId::new(Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4())),
            slug: m.slug,
            title: Localized::with(m.title_en, m.title_ru, m.title_he),
            subtitle: Localized::with(m.subtitle_en, m.subtitle_ru, m.subtitle_he),
            description: Localized::with(m.description_en, m.description_ru, m.description_he),
            content: Localized::with(m.content_en, m.content_ru, m.content_he),
            seo: Seo {
                meta_title: m.meta_title,
                meta_description: m.meta_description,
                meta_keywords: m.meta_keywords,
            },
            publication: Publication {
                status: PublishStatus::from_str(&m.status).unwrap_or_default(),
                published_at: m.published_at,
            },
            featured: Featured {
                is_featured: m.is_featured,
                featured_order: m.featured_order,
            },
            views_count: m.views_count,
            client_name: m.client_name,
            client_website: m.client_website,
            project_url: m.project_url,
            github_url: m.github_url,
            start_date: m.start_date,
            end_date: m.end_date,
            is_ongoing: m.is_ongoing,
            sort_order: m.sort_order,
            is_active: m.is_active,
            categories: Vec::new(),
            technologies: Vec::new(),
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

fn to_active(project: &Project) -> ActiveModel {
    ActiveModel {
        id: Set(project.id.as_string()),
        slug: Set(project.slug.clone()),
        title_en: Set(project.title.en.clone()),
        title_ru: Set(project.title.ru.clone()),
        title_he: Set(project.title.he.clone()),
        subtitle_en: Set(project.subtitle.en.clone()),
        subtitle_ru: Set(project.subtitle.ru.clone()),
        subtitle_he: Set(project.subtitle.he.clone()),
        description_en: Set(project.description.en.clone()),
        description_ru: Set(project.description.ru.clone()),
        description_he: Set(project.description.he.clone()),
        content_en: Set(project.content.en.clone()),
        content_ru: Set(project.content.ru.clone()),
        content_he: Set(project.content.he.clone()),
        meta_title: Set(project.seo.meta_title.clone()),
        meta_description: Set(project.seo.meta_description.clone()),
        meta_keywords: Set(project.seo.meta_keywords.clone()),
        status: Set(project.publication.status.as_str().to_string()),
        published_at: Set(project.publication.published_at),
        is_featured: Set(project.featured.is_featured),
        featured_order: Set(project.featured.featured_order),
        views_count: Set(project.views_count),
        client_name: Set(project.client_name.clone()),
        client_website: Set(project.client_website.clone()),
        project_url: Set(project.project_url.clone()),
        github_url: Set(project.github_url.clone()),
        start_date: Set(project.start_date),
        end_date: Set(project.end_date),
        is_ongoing: Set(project.is_ongoing),
        sort_order: Set(project.sort_order),
        is_active: Set(project.is_active),
        created_at: Set(Some(project.timestamps.created_at)),
        updated_at: Set(Some(project.timestamps.updated_at)),
    }
}

/// Параметры публичной выборки проектов
#[derive(Debug, Clone, Default)]
pub struct ProjectListQuery {
    pub category_id: Option<String>,
    pub technology_id: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_desc: Option<bool>,
    pub page: u64,
    pub page_size: u64,
}

pub async fn list_published(query: ProjectListQuery) -> anyhow::Result<(Vec<Project>, u64)> {
    let mut find = Entity::find()
        .filter(Column::Status.eq(PublishStatus::Published.as_str()))
        .filter(Column::IsActive.eq(true));

    if let Some(category_id) = &query.category_id {
        let links = category_link::Entity::find()
            .filter(category_link::Column::CategoryId.eq(category_id.clone()))
            .all(conn())
            .await?;
        if links.is_empty() {
            return Ok((Vec::new(), 0));
        }
        let project_ids: Vec<String> = links.into_iter().map(|l| l.project_id).collect();
        find = find.filter(Column::Id.is_in(project_ids));
    }

    if let Some(technology_id) = &query.technology_id {
        let links = technology_link::Entity::find()
            .filter(technology_link::Column::TechnologyId.eq(technology_id.clone()))
            .all(conn())
            .await?;
        if links.is_empty() {
            return Ok((Vec::new(), 0));
        }
        let project_ids: Vec<String> = links.into_iter().map(|l| l.project_id).collect();
        find = find.filter(Column::Id.is_in(project_ids));
    }

    if let Some(featured) = query.featured {
        find = find.filter(Column::IsFeatured.eq(featured));
    }

    if let Some(needle) = &query.search {
        find = find.filter(
            Condition::any()
                .add(Column::TitleEn.contains(needle))
                .add(Column::TitleRu.contains(needle))
                .add(Column::TitleHe.contains(needle))
                .add(Column::DescriptionEn.contains(needle)),
        );
    }

    // Allowlist сортировки; по умолчанию свежие публикации выше,
    // при равенстве — ручной порядок
    match query.sort_by.as_deref() {
        Some("sort_order") => {
            find = if query.sort_desc.unwrap_or(false) {
                find.order_by_desc(Column::SortOrder)
            } else {
                find.order_by_asc(Column::SortOrder)
            };
        }
        _ => {
            find = if query.sort_desc.unwrap_or(true) {
                find.order_by_desc(Column::PublishedAt)
            } else {
                find.order_by_asc(Column::PublishedAt)
            };
            find = find.order_by_asc(Column::SortOrder);
        }
    }

    let paginator = find.paginate(conn(), query.page_size.max(1));
    let total = paginator.num_items().await?;
    let models = paginator.fetch_page(query.page).await?;

    let mut projects: Vec<Project> = models.into_iter().map(Into::into).collect();
    attach_refs(&mut projects).await?;
    Ok((projects, total))
}

/// Черновики и архив не видны и по прямому slug
pub async fn get_published_by_slug(slug: &str) -> anyhow::Result<Option<Project>> {
    let model = Entity::find()
        .filter(Column::Slug.eq(slug))
        .filter(Column::Status.eq(PublishStatus::Published.as_str()))
        .filter(Column::IsActive.eq(true))
        .one(conn())
        .await?;
    match model {
        Some(model) => {
            let mut projects = vec![model.into()];
            attach_refs(&mut projects).await?;
            Ok(projects.pop())
        }
        None => Ok(None),
    }
}

pub async fn get_by_slug(slug: &str) -> anyhow::Result<Option<Project>> {
    let model = Entity::find()
        .filter(Column::Slug.eq(slug))
        .one(conn())
        .await?;
    Ok(model.map(Into::into))
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Project>> {
    let model = Entity::find_by_id(id.to_string()).one(conn()).await?;
    match model {
        Some(model) => {
            let mut projects = vec![model.into()];
            attach_refs(&mut projects).await?;
            Ok(projects.pop())
        }
        None => Ok(None),
    }
}

/// Атомарный инкремент счётчика просмотров на стороне стора
pub async fn increment_views(id: &str) -> anyhow::Result<()> {
    Entity::update_many()
        .col_expr(Column::ViewsCount, Expr::col(Column::ViewsCount).add(1))
        .filter(Column::Id.eq(id))
        .exec(conn())
        .await?;
    Ok(())
}

pub async fn insert(project: &Project) -> anyhow::Result<Uuid> {
    to_active(project).insert(conn()).await?;
    Ok(project.id.value())
}

/// views_count не пишется: счётчик меняется только атомарным инкрементом
pub async fn update(project: &Project) -> anyhow::Result<()> {
    let mut active = to_active(project);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.views_count = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn delete_by_id(id: Uuid) -> anyhow::Result<bool> {
    let id = id.to_string();
    category_link::Entity::delete_many()
        .filter(category_link::Column::ProjectId.eq(id.clone()))
        .exec(conn())
        .await?;
    technology_link::Entity::delete_many()
        .filter(technology_link::Column::ProjectId.eq(id.clone()))
        .exec(conn())
        .await?;
    let result = Entity::delete_by_id(id).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}

pub async fn set_categories(project_id: &str, category_ids: &[String]) -> anyhow::Result<()> {
    category_link::Entity::delete_many()
        .filter(category_link::Column::ProjectId.eq(project_id))
        .exec(conn())
        .await?;
    let mut seen = std::collections::HashSet::new();
    let links: Vec<category_link::ActiveModel> = category_ids
        .iter()
        .filter(|id| seen.insert((*id).clone()))
        .map(|id| category_link::ActiveModel {
            project_id: Set(project_id.to_string()),
            category_id: Set(id.clone()),
        })
        .collect();
    if !links.is_empty() {
        category_link::Entity::insert_many(links).exec(conn()).await?;
    }
    Ok(())
}

pub async fn set_technologies(project_id: &str, technology_ids: &[String]) -> anyhow::Result<()> {
    technology_link::Entity::delete_many()
        .filter(technology_link::Column::ProjectId.eq(project_id))
        .exec(conn())
        .await?;
    let mut seen = std::collections::HashSet::new();
    let links: Vec<technology_link::ActiveModel> = technology_ids
        .iter()
        .filter(|id| seen.insert((*id).clone()))
        .map(|id| technology_link::ActiveModel {
            project_id: Set(project_id.to_string()),
            technology_id: Set(id.clone()),
        })
        .collect();
    if !links.is_empty() {
        technology_link::Entity::insert_many(links)
            .exec(conn())
            .await?;
    }
    Ok(())
}

/// Категории и технологии страницы проектов без N+1
async fn attach_refs(projects: &mut [Project]) -> anyhow::Result<()> {
    if projects.is_empty() {
        return Ok(());
    }
    let project_ids: Vec<String> = projects.iter().map(|p| p.id.as_string()).collect();

    let category_links = category_link::Entity::find()
        .filter(category_link::Column::ProjectId.is_in(project_ids.clone()))
        .all(conn())
        .await?;
    let technology_links = technology_link::Entity::find()
        .filter(technology_link::Column::ProjectId.is_in(project_ids))
        .all(conn())
        .await?;

    let category_ids: Vec<String> =
        category_links.iter().map(|l| l.category_id.clone()).collect();
    let technology_ids: Vec<String> = technology_links
        .iter()
        .map(|l| l.technology_id.clone())
        .collect();

    let categories: HashMap<String, CategoryRef> = if category_ids.is_empty() {
        HashMap::new()
    } else {
        crate::domain::portfolio_category::repository::Entity::find()
            .filter(crate::domain::portfolio_category::repository::Column::Id.is_in(category_ids))
            .all(conn())
            .await?
            .into_iter()
            .map(|m| {
                (
                    m.id.clone(),
                    CategoryRef {
                        id: m.id,
                        slug: m.slug,
                        name: Localized::with(m.name_en, m.name_ru, m.name_he),
                    },
                )
            })
            .collect()
    };

    let technologies: HashMap<String, TechnologyRef> = if technology_ids.is_empty() {
        HashMap::new()
    } else {
        crate::domain::portfolio_technology::repository::Entity::find()
            .filter(
                crate::domain::portfolio_technology::repository::Column::Id.is_in(technology_ids),
            )
            .all(conn())
            .await?
            .into_iter()
            .map(|m| {
                (
                    m.id.clone(),
                    TechnologyRef {
                        id: m.id,
                        slug: m.slug,
                        name: m.name,
                    },
                )
            })
            .collect()
    };

    let mut categories_by_project: HashMap<String, Vec<CategoryRef>> = HashMap::new();
    for link in category_links {
        if let Some(category) = categories.get(&link.category_id) {
            categories_by_project
                .entry(link.project_id)
                .or_default()
                .push(category.clone());
        }
    }
    let mut technologies_by_project: HashMap<String, Vec<TechnologyRef>> = HashMap::new();
    for link in technology_links {
        if let Some(technology) = technologies.get(&link.technology_id) {
            technologies_by_project
                .entry(link.project_id)
                .or_default()
                .push(technology.clone());
        }
    }

    for project in projects {
        let id = project.id.as_string();
        project.categories = categories_by_project.remove(&id).unwrap_or_default();
        project.technologies = technologies_by_project.remove(&id).unwrap_or_default();
    }
    Ok(())
}
