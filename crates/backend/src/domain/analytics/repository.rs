use chrono::Utc;
use contracts::domain::analytics::facts::{Event, PageView, Visitor, VisitorSession};
use contracts::domain::common::Timestamps;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{QueryOrder, Set};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

/// Посетитель
pub mod visitor {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "analytics_visitor")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub visitor_key: String,
        pub first_visit_at: Option<chrono::DateTime<chrono::Utc>>,
        pub last_visit_at: Option<chrono::DateTime<chrono::Utc>>,
        pub visits_count: i64,
        pub ip_address: Option<String>,
        pub user_agent: String,
        pub language: String,
        pub referrer: String,
        pub is_bot: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Сессия посетителя
pub mod session {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "analytics_session")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub session_key: String,
        pub visitor_key: String,
        pub started_at: Option<chrono::DateTime<chrono::Utc>>,
        pub ended_at: Option<chrono::DateTime<chrono::Utc>>,
        pub entry_page: String,
        pub exit_page: String,
        pub pages_viewed: i64,
        pub is_bounce: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Просмотр страницы
pub mod page_view {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "analytics_page_view")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub path: String,
        pub query: String,
        pub referrer: String,
        pub language: String,
        pub visitor_key: String,
        pub session_key: String,
        pub ip_address: Option<String>,
        pub user_agent: String,
        pub is_bot: bool,
        pub is_mobile: bool,
        pub duration: i64,
        pub created_at: Option<chrono::DateTime<chrono::Utc>>,
        pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Событие
pub mod event {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "analytics_event")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub name: String,
        pub category: String,
        pub data: Option<String>,
        pub path: String,
        pub visitor_key: String,
        pub session_key: String,
        pub ip_address: Option<String>,
        pub user_agent: String,
        pub created_at: Option<chrono::DateTime<chrono::Utc>>,
        pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

impl From<visitor::Model> for Visitor {
    fn from(m: visitor::Model) -> Self {
        Visitor {
            id: m.id,
            visitor_key: m.visitor_key,
            first_visit_at: m.first_visit_at.unwrap_or_else(Utc::now),
            last_visit_at: m.last_visit_at.unwrap_or_else(Utc::now),
            visits_count: m.visits_count,
            ip_address: m.ip_address,
            user_agent: m.user_agent,
            language: m.language,
            referrer: m.referrer,
            is_bot: m.is_bot,
        }
    }
}

impl From<session::Model> for VisitorSession {
    fn from(m: session::Model) -> Self {
        VisitorSession {
            id: m.id,
            session_key: m.session_key,
            visitor_key: m.visitor_key,
            started_at: m.started_at.unwrap_or_else(Utc::now),
            ended_at: m.ended_at,
            entry_page: m.entry_page,
            exit_page: m.exit_page,
            pages_viewed: m.pages_viewed,
            is_bounce: m.is_bounce,
        }
    }
}

impl From<page_view::Model> for PageView {
    fn from(m: page_view::Model) -> Self {
        PageView {
            id: m.id,
            path: m.path,
            query: m.query,
            referrer: m.referrer,
            language: m.language,
            visitor_key: m.visitor_key,
            session_key: m.session_key,
            ip_address: m.ip_address,
            user_agent: m.user_agent,
            is_bot: m.is_bot,
            is_mobile: m.is_mobile,
            duration: m.duration,
            timestamps: Timestamps {
                created_at: m.created_at.unwrap_or_else(Utc::now),
                updated_at: m.updated_at.unwrap_or_else(Utc::now),
            },
        }
    }
}

impl From<event::Model> for Event {
    fn from(m: event::Model) -> Self {
        Event {
            id: m.id,
            name: m.name,
            category: m.category,
            data: m
                .data
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok()),
            path: m.path,
            visitor_key: m.visitor_key,
            session_key: m.session_key,
            ip_address: m.ip_address,
            user_agent: m.user_agent,
            timestamps: Timestamps {
                created_at: m.created_at.unwrap_or_else(Utc::now),
                updated_at: m.updated_at.unwrap_or_else(Utc::now),
            },
        }
    }
}

/// Атрибуты посетителя при первом знакомстве
#[derive(Debug, Clone, Default)]
pub struct VisitorAttrs {
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub language: String,
    pub referrer: String,
    pub is_bot: bool,
}

/// Повторная идентификация: атомарный инкремент визитов и сдвиг
/// last_visit_at. Первая — вставка новой записи; проигравший гонку
/// insert откатывается на инкремент.
pub async fn touch_or_create_visitor(key: &str, attrs: &VisitorAttrs) -> anyhow::Result<()> {
    let touched = visitor::Entity::update_many()
        .col_expr(
            visitor::Column::VisitsCount,
            Expr::col(visitor::Column::VisitsCount).add(1),
        )
        .col_expr(visitor::Column::LastVisitAt, Expr::value(Utc::now()))
        .filter(visitor::Column::VisitorKey.eq(key))
        .exec(conn())
        .await?;
    if touched.rows_affected > 0 {
        return Ok(());
    }

    let now = Utc::now();
    let inserted = visitor::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        visitor_key: Set(key.to_string()),
        first_visit_at: Set(Some(now)),
        last_visit_at: Set(Some(now)),
        visits_count: Set(1),
        ip_address: Set(attrs.ip_address.clone()),
        user_agent: Set(attrs.user_agent.clone()),
        language: Set(attrs.language.clone()),
        referrer: Set(attrs.referrer.clone()),
        is_bot: Set(attrs.is_bot),
    }
    .insert(conn())
    .await;

    if inserted.is_err() {
        // Гонка на unique(visitor_key): запись уже появилась
        visitor::Entity::update_many()
            .col_expr(
                visitor::Column::VisitsCount,
                Expr::col(visitor::Column::VisitsCount).add(1),
            )
            .col_expr(visitor::Column::LastVisitAt, Expr::value(Utc::now()))
            .filter(visitor::Column::VisitorKey.eq(key))
            .exec(conn())
            .await?;
    }
    Ok(())
}

/// Сессия: первая страница создаёт запись, каждая следующая двигает
/// exit_page и снимает флаг отказа
pub async fn record_session_page(
    session_key: &str,
    visitor_key: &str,
    path: &str,
) -> anyhow::Result<()> {
    let updated = session::Entity::update_many()
        .col_expr(
            session::Column::PagesViewed,
            Expr::col(session::Column::PagesViewed).add(1),
        )
        .col_expr(session::Column::ExitPage, Expr::value(path))
        .col_expr(session::Column::EndedAt, Expr::value(Utc::now()))
        .col_expr(session::Column::IsBounce, Expr::value(false))
        .filter(session::Column::SessionKey.eq(session_key))
        .exec(conn())
        .await?;
    if updated.rows_affected > 0 {
        return Ok(());
    }

    let inserted = session::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        session_key: Set(session_key.to_string()),
        visitor_key: Set(visitor_key.to_string()),
        started_at: Set(Some(Utc::now())),
        ended_at: Set(None),
        entry_page: Set(path.to_string()),
        exit_page: Set(String::new()),
        pages_viewed: Set(1),
        is_bounce: Set(true),
    }
    .insert(conn())
    .await;

    if inserted.is_err() {
        session::Entity::update_many()
            .col_expr(
                session::Column::PagesViewed,
                Expr::col(session::Column::PagesViewed).add(1),
            )
            .col_expr(session::Column::ExitPage, Expr::value(path))
            .col_expr(session::Column::EndedAt, Expr::value(Utc::now()))
            .col_expr(session::Column::IsBounce, Expr::value(false))
            .filter(session::Column::SessionKey.eq(session_key))
            .exec(conn())
            .await?;
    }
    Ok(())
}

pub async fn insert_page_view(view: &PageView) -> anyhow::Result<()> {
    page_view::ActiveModel {
        id: Set(view.id.clone()),
        path: Set(view.path.clone()),
        query: Set(view.query.clone()),
        referrer: Set(view.referrer.clone()),
        language: Set(view.language.clone()),
        visitor_key: Set(view.visitor_key.clone()),
        session_key: Set(view.session_key.clone()),
        ip_address: Set(view.ip_address.clone()),
        user_agent: Set(view.user_agent.clone()),
        is_bot: Set(view.is_bot),
        is_mobile: Set(view.is_mobile),
        duration: Set(view.duration),
        created_at: Set(Some(view.timestamps.created_at)),
        updated_at: Set(Some(view.timestamps.updated_at)),
    }
    .insert(conn())
    .await?;
    Ok(())
}

pub async fn insert_event(event: &Event) -> anyhow::Result<()> {
    event::ActiveModel {
        id: Set(event.id.clone()),
        name: Set(event.name.clone()),
        category: Set(event.category.clone()),
        data: Set(event.data.as_ref().map(|v| v.to_string())),
        path: Set(event.path.clone()),
        visitor_key: Set(event.visitor_key.clone()),
        session_key: Set(event.session_key.clone()),
        ip_address: Set(event.ip_address.clone()),
        user_agent: Set(event.user_agent.clone()),
        created_at: Set(Some(event.timestamps.created_at)),
        updated_at: Set(Some(event.timestamps.updated_at)),
    }
    .insert(conn())
    .await?;
    Ok(())
}

pub async fn get_session_by_key(key: &str) -> anyhow::Result<Option<VisitorSession>> {
    let model = session::Entity::find()
        .filter(session::Column::SessionKey.eq(key))
        .one(conn())
        .await?;
    Ok(model.map(Into::into))
}

pub async fn get_visitor_by_key(key: &str) -> anyhow::Result<Option<Visitor>> {
    let model = visitor::Entity::find()
        .filter(visitor::Column::VisitorKey.eq(key))
        .one(conn())
        .await?;
    Ok(model.map(Into::into))
}

pub async fn list_visitors(
    is_bot: Option<bool>,
    page: u64,
    page_size: u64,
) -> anyhow::Result<(Vec<Visitor>, u64)> {
    let mut query = visitor::Entity::find().order_by_desc(visitor::Column::LastVisitAt);
    if let Some(is_bot) = is_bot {
        query = query.filter(visitor::Column::IsBot.eq(is_bot));
    }

    let paginator = query.paginate(conn(), page_size);
    let total = paginator.num_items().await?;
    let models = paginator.fetch_page(page).await?;
    Ok((models.into_iter().map(Into::into).collect(), total))
}

pub async fn list_page_views(
    path: Option<&str>,
    is_bot: Option<bool>,
    is_mobile: Option<bool>,
    page: u64,
    page_size: u64,
) -> anyhow::Result<(Vec<PageView>, u64)> {
    let mut query = page_view::Entity::find().order_by_desc(page_view::Column::CreatedAt);
    if let Some(path) = path {
        query = query.filter(page_view::Column::Path.eq(path));
    }
    if let Some(is_bot) = is_bot {
        query = query.filter(page_view::Column::IsBot.eq(is_bot));
    }
    if let Some(is_mobile) = is_mobile {
        query = query.filter(page_view::Column::IsMobile.eq(is_mobile));
    }

    let paginator = query.paginate(conn(), page_size);
    let total = paginator.num_items().await?;
    let models = paginator.fetch_page(page).await?;
    Ok((models.into_iter().map(Into::into).collect(), total))
}

pub async fn list_events(
    name: Option<&str>,
    category: Option<&str>,
    page: u64,
    page_size: u64,
) -> anyhow::Result<(Vec<Event>, u64)> {
    let mut query = event::Entity::find().order_by_desc(event::Column::CreatedAt);
    if let Some(name) = name {
        query = query.filter(event::Column::Name.eq(name));
    }
    if let Some(category) = category {
        query = query.filter(event::Column::Category.eq(category));
    }

    let paginator = query.paginate(conn(), page_size);
    let total = paginator.num_items().await?;
    let models = paginator.fetch_page(page).await?;
    Ok((models.into_iter().map(Into::into).collect(), total))
}
