use std::collections::HashMap;

use chrono::Utc;
use contracts::domain::blog::category::CategoryRef;
use contracts::domain::blog::post::{Post, PostId};
use contracts::domain::blog::tag::TagRef;
use contracts::domain::common::{
    AggregateId, Featured, Localized, Publication, PublishStatus, Seo, Timestamps,
};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{Condition, DatabaseBackend, QueryOrder, Set, Statement};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_post")]
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
    pub excerpt_en: String,
    pub excerpt_ru: String,
    pub excerpt_he: String,
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
    pub read_time: i32,
    pub allow_comments: bool,
    pub is_active: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Связка пост — категория
pub mod category_link {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "blog_post_category")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub post_id: String,
        #[sea_orm(primary_key, auto_increment = false)]
        pub category_id: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Связка пост — тег
pub mod tag_link {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "blog_post_tag")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub post_id: String,
        #[sea_orm(primary_key, auto_increment = false)]
        pub tag_id: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl From<Model> for Post {
    fn from(m: Model) -> Self {
        Post {
            id: PostId::new(Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4())),
            slug: m.slug,
            title: Localized::with(m.title_en, m.title_ru, m.title_he),
            subtitle: Localized::with(m.subtitle_en, m.subtitle_ru, m.subtitle_he),
            excerpt: Localized::with(m.excerpt_en, m.excerpt_ru, m.excerpt_he),
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
            read_time: m.read_time,
            allow_comments: m.allow_comments,
            is_active: m.is_active,
            categories: Vec::new(),
            tags: Vec::new(),
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

fn to_active(post: &Post) -> ActiveModel {
    ActiveModel {
        id: Set(post.id.as_string()),
        slug: Set(post.slug.clone()),
        title_en: Set(post.title.en.clone()),
        title_ru: Set(post.title.ru.clone()),
        title_he: Set(post.title.he.clone()),
        subtitle_en: Set(post.subtitle.en.clone()),
        subtitle_ru: Set(post.subtitle.ru.clone()),
        subtitle_he: Set(post.subtitle.he.clone()),
        excerpt_en: Set(post.excerpt.en.clone()),
        excerpt_ru: Set(post.excerpt.ru.clone()),
        excerpt_he: Set(post.excerpt.he.clone()),
        content_en: Set(post.content.en.clone()),
        content_ru: Set(post.content.ru.clone()),
        content_he: Set(post.content.he.clone()),
        meta_title: Set(post.seo.meta_title.clone()),
        meta_description: Set(post.seo.meta_description.clone()),
        meta_keywords: Set(post.seo.meta_keywords.clone()),
        status: Set(post.publication.status.as_str().to_string()),
        published_at: Set(post.publication.published_at),
        is_featured: Set(post.featured.is_featured),
        featured_order: Set(post.featured.featured_order),
        views_count: Set(post.views_count),
        read_time: Set(post.read_time),
        allow_comments: Set(post.allow_comments),
        is_active: Set(post.is_active),
        created_at: Set(Some(post.timestamps.created_at)),
        updated_at: Set(Some(post.timestamps.updated_at)),
    }
}

/// Параметры публичной выборки постов
#[derive(Debug, Clone, Default)]
pub struct PostListQuery {
    pub category_id: Option<String>,
    pub tag_id: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_desc: Option<bool>,
    pub page: u64,
    pub page_size: u64,
}

pub async fn list_published(query: PostListQuery) -> anyhow::Result<(Vec<Post>, u64)> {
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
        let post_ids: Vec<String> = links.into_iter().map(|l| l.post_id).collect();
        find = find.filter(Column::Id.is_in(post_ids));
    }

    if let Some(tag_id) = &query.tag_id {
        let links = tag_link::Entity::find()
            .filter(tag_link::Column::TagId.eq(tag_id.clone()))
            .all(conn())
            .await?;
        if links.is_empty() {
            return Ok((Vec::new(), 0));
        }
        let post_ids: Vec<String> = links.into_iter().map(|l| l.post_id).collect();
        find = find.filter(Column::Id.is_in(post_ids));
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
                .add(Column::ExcerptEn.contains(needle))
                .add(Column::ExcerptRu.contains(needle))
                .add(Column::ExcerptHe.contains(needle)),
        );
    }

    // Allowlist сортировки; всё остальное приводится к published_at
    let sort_column = match query.sort_by.as_deref() {
        Some("views_count") => Column::ViewsCount,
        Some("created_at") => Column::CreatedAt,
        _ => Column::PublishedAt,
    };
    find = if query.sort_desc.unwrap_or(true) {
        find.order_by_desc(sort_column)
    } else {
        find.order_by_asc(sort_column)
    };

    let paginator = find.paginate(conn(), query.page_size.max(1));
    let total = paginator.num_items().await?;
    let models = paginator.fetch_page(query.page).await?;

    let mut posts: Vec<Post> = models.into_iter().map(Into::into).collect();
    attach_refs(&mut posts).await?;
    Ok((posts, total))
}

/// Видимость публичной выдачи решается здесь, на границе запроса:
/// черновики и архив не возвращаются и по прямому slug.
pub async fn get_published_by_slug(slug: &str) -> anyhow::Result<Option<Post>> {
    let model = Entity::find()
        .filter(Column::Slug.eq(slug))
        .filter(Column::Status.eq(PublishStatus::Published.as_str()))
        .filter(Column::IsActive.eq(true))
        .one(conn())
        .await?;
    match model {
        Some(model) => {
            let mut posts = vec![model.into()];
            attach_refs(&mut posts).await?;
            Ok(posts.pop())
        }
        None => Ok(None),
    }
}

pub async fn get_by_slug(slug: &str) -> anyhow::Result<Option<Post>> {
    let model = Entity::find()
        .filter(Column::Slug.eq(slug))
        .one(conn())
        .await?;
    Ok(model.map(Into::into))
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Post>> {
    let model = Entity::find_by_id(id.to_string()).one(conn()).await?;
    match model {
        Some(model) => {
            let mut posts = vec![model.into()];
            attach_refs(&mut posts).await?;
            Ok(posts.pop())
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

pub async fn insert(post: &Post) -> anyhow::Result<Uuid> {
    to_active(post).insert(conn()).await?;
    Ok(post.id.value())
}

/// Обновление записи. views_count не пишется: счётчик принадлежит стору
/// и меняется только атомарным инкрементом.
pub async fn update(post: &Post) -> anyhow::Result<()> {
    let mut active = to_active(post);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.views_count = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn delete_by_id(id: Uuid) -> anyhow::Result<bool> {
    let id = id.to_string();
    category_link::Entity::delete_many()
        .filter(category_link::Column::PostId.eq(id.clone()))
        .exec(conn())
        .await?;
    tag_link::Entity::delete_many()
        .filter(tag_link::Column::PostId.eq(id.clone()))
        .exec(conn())
        .await?;
    let result = Entity::delete_by_id(id).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}

pub async fn set_categories(post_id: &str, category_ids: &[String]) -> anyhow::Result<()> {
    category_link::Entity::delete_many()
        .filter(category_link::Column::PostId.eq(post_id))
        .exec(conn())
        .await?;
    let mut seen = std::collections::HashSet::new();
    let links: Vec<category_link::ActiveModel> = category_ids
        .iter()
        .filter(|id| seen.insert((*id).clone()))
        .map(|id| category_link::ActiveModel {
            post_id: Set(post_id.to_string()),
            category_id: Set(id.clone()),
        })
        .collect();
    if !links.is_empty() {
        category_link::Entity::insert_many(links).exec(conn()).await?;
    }
    Ok(())
}

pub async fn set_tags(post_id: &str, tag_ids: &[String]) -> anyhow::Result<()> {
    tag_link::Entity::delete_many()
        .filter(tag_link::Column::PostId.eq(post_id))
        .exec(conn())
        .await?;
    let mut seen = std::collections::HashSet::new();
    let links: Vec<tag_link::ActiveModel> = tag_ids
        .iter()
        .filter(|id| seen.insert((*id).clone()))
        .map(|id| tag_link::ActiveModel {
            post_id: Set(post_id.to_string()),
            tag_id: Set(id.clone()),
        })
        .collect();
    if !links.is_empty() {
        tag_link::Entity::insert_many(links).exec(conn()).await?;
    }
    Ok(())
}

pub async fn count_published() -> anyhow::Result<u64> {
    Ok(Entity::find()
        .filter(Column::Status.eq(PublishStatus::Published.as_str()))
        .filter(Column::IsActive.eq(true))
        .count(conn())
        .await?)
}

pub async fn count_featured_published() -> anyhow::Result<u64> {
    Ok(Entity::find()
        .filter(Column::Status.eq(PublishStatus::Published.as_str()))
        .filter(Column::IsActive.eq(true))
        .filter(Column::IsFeatured.eq(true))
        .count(conn())
        .await?)
}

pub async fn total_views() -> anyhow::Result<i64> {
    let row = conn()
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT COALESCE(SUM(views_count), 0) AS total FROM blog_post \
             WHERE status = 'published' AND is_active = 1"
                .to_string(),
        ))
        .await?;
    Ok(row
        .map(|r| r.try_get::<i64>("", "total").unwrap_or(0))
        .unwrap_or(0))
}

/// Подтягивает категории и теги для страницы постов двумя запросами
/// на связь вместо N+1
async fn attach_refs(posts: &mut [Post]) -> anyhow::Result<()> {
    if posts.is_empty() {
        return Ok(());
    }
    let post_ids: Vec<String> = posts.iter().map(|p| p.id.as_string()).collect();

    let category_links = category_link::Entity::find()
        .filter(category_link::Column::PostId.is_in(post_ids.clone()))
        .all(conn())
        .await?;
    let tag_links = tag_link::Entity::find()
        .filter(tag_link::Column::PostId.is_in(post_ids))
        .all(conn())
        .await?;

    let category_ids: Vec<String> = category_links.iter().map(|l| l.category_id.clone()).collect();
    let tag_ids: Vec<String> = tag_links.iter().map(|l| l.tag_id.clone()).collect();

    let categories: HashMap<String, CategoryRef> = if category_ids.is_empty() {
        HashMap::new()
    } else {
        crate::domain::blog_category::repository::Entity::find()
            .filter(crate::domain::blog_category::repository::Column::Id.is_in(category_ids))
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

    let tags: HashMap<String, TagRef> = if tag_ids.is_empty() {
        HashMap::new()
    } else {
        crate::domain::blog_tag::repository::Entity::find()
            .filter(crate::domain::blog_tag::repository::Column::Id.is_in(tag_ids))
            .all(conn())
            .await?
            .into_iter()
            .map(|m| {
                (
                    m.id.clone(),
                    TagRef {
                        id: m.id,
                        slug: m.slug,
                        name: Localized::with(m.name_en, m.name_ru, m.name_he),
                    },
                )
            })
            .collect()
    };

    let mut categories_by_post: HashMap<String, Vec<CategoryRef>> = HashMap::new();
    for link in category_links {
        if let Some(category) = categories.get(&link.category_id) {
            categories_by_post
                .entry(link.post_id)
                .or_default()
                .push(category.clone());
        }
    }
    let mut tags_by_post: HashMap<String, Vec<TagRef>> = HashMap::new();
    for link in tag_links {
        if let Some(tag) = tags.get(&link.tag_id) {
            tags_by_post.entry(link.post_id).or_default().push(tag.clone());
        }
    }

    for post in posts {
        let id = post.id.as_string();
        post.categories = categories_by_post.remove(&id).unwrap_or_default();
        post.tags = tags_by_post.remove(&id).unwrap_or_default();
    }
    Ok(())
}
