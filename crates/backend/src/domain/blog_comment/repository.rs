use chrono::Utc;
use contracts::domain::blog::comment::{Comment, CommentId};
use contracts::domain::common::{AggregateId, Timestamps};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_comment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub post_id: String,
    pub parent_id: Option<String>,
    pub author_name: String,
    pub author_email: String,
    pub author_website: String,
    pub content: String,
    pub is_approved: bool,
    pub is_active: bool,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Comment {
    fn from(m: Model) -> Self {
        Comment {
            id: CommentId::new(Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4())),
            post_id: m.post_id,
            parent_id: m.parent_id,
            author_name: m.author_name,
            author_email: m.author_email,
            author_website: m.author_website,
            content: m.content,
            is_approved: m.is_approved,
            is_active: m.is_active,
            ip_address: m.ip_address,
            user_agent: m.user_agent,
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

fn to_active(comment: &Comment) -> ActiveModel {
    ActiveModel {
        id: Set(comment.id.as_string()),
        post_id: Set(comment.post_id.clone()),
        parent_id: Set(comment.parent_id.clone()),
        author_name: Set(comment.author_name.clone()),
        author_email: Set(comment.author_email.clone()),
        author_website: Set(comment.author_website.clone()),
        content: Set(comment.content.clone()),
        is_approved: Set(comment.is_approved),
        is_active: Set(comment.is_active),
        ip_address: Set(comment.ip_address.clone()),
        user_agent: Set(comment.user_agent.clone()),
        created_at: Set(Some(comment.timestamps.created_at)),
        updated_at: Set(Some(comment.timestamps.updated_at)),
    }
}

/// Видимые комментарии поста: активные и одобренные, старые раньше
pub async fn list_visible_for_post(post_id: &str) -> anyhow::Result<Vec<Comment>> {
    let models = Entity::find()
        .filter(Column::PostId.eq(post_id))
        .filter(Column::IsActive.eq(true))
        .filter(Column::IsApproved.eq(true))
        .order_by_asc(Column::CreatedAt)
        .all(conn())
        .await?;
    Ok(models.into_iter().map(Into::into).collect())
}

/// Очередь модерации и общий админ-список
pub async fn list_admin(
    pending_only: bool,
    page: u64,
    page_size: u64,
) -> anyhow::Result<(Vec<Comment>, u64)> {
    let mut query = Entity::find()
        .filter(Column::IsActive.eq(true))
        .order_by_desc(Column::CreatedAt);
    if pending_only {
        query = query.filter(Column::IsApproved.eq(false));
    }

    let paginator = query.paginate(conn(), page_size);
    let total = paginator.num_items().await?;
    let models = paginator.fetch_page(page).await?;
    Ok((models.into_iter().map(Into::into).collect(), total))
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Comment>> {
    let model = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(model.map(Into::into))
}

pub async fn insert(comment: &Comment) -> anyhow::Result<Uuid> {
    to_active(comment).insert(conn()).await?;
    Ok(comment.id.value())
}

pub async fn set_approved(id: Uuid, approved: bool) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsApproved, Expr::value(approved))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

/// Мягкая деактивация: комментарий и всё его поддерево исчезают из выдачи
pub async fn set_active(id: Uuid, active: bool) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsActive, Expr::value(active))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn count_approved() -> anyhow::Result<u64> {
    Ok(Entity::find()
        .filter(Column::IsActive.eq(true))
        .filter(Column::IsApproved.eq(true))
        .count(conn())
        .await?)
}
