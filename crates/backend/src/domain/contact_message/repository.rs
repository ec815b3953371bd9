use chrono::Utc;
use contracts::domain::common::{AggregateId, Timestamps};
use contracts::domain::contacts::message::{ContactMessage, ContactMessageId, ContactStatus};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "contact_message")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub is_read: bool,
    pub read_at: Option<chrono::DateTime<chrono::Utc>>,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ContactMessage {
    fn from(m: Model) -> Self {
        ContactMessage {
            id: ContactMessageId::new(Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4())),
            name: m.name,
            email: m.email,
            subject: m.subject,
            message: m.message,
            status: ContactStatus::from_str(&m.status).unwrap_or_default(),
            is_read: m.is_read,
            read_at: m.read_at,
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

fn to_active(message: &ContactMessage) -> ActiveModel {
    ActiveModel {
        id: Set(message.id.as_string()),
        name: Set(message.name.clone()),
        email: Set(message.email.clone()),
        subject: Set(message.subject.clone()),
        message: Set(message.message.clone()),
        status: Set(message.status.as_str().to_string()),
        is_read: Set(message.is_read),
        read_at: Set(message.read_at),
        ip_address: Set(message.ip_address.clone()),
        user_agent: Set(message.user_agent.clone()),
        created_at: Set(Some(message.timestamps.created_at)),
        updated_at: Set(Some(message.timestamps.updated_at)),
    }
}

pub async fn insert(message: &ContactMessage) -> anyhow::Result<Uuid> {
    to_active(message).insert(conn()).await?;
    Ok(message.id.value())
}

pub async fn update(message: &ContactMessage) -> anyhow::Result<()> {
    let mut active = to_active(message);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<ContactMessage>> {
    let model = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(model.map(Into::into))
}

pub async fn list(
    status: Option<ContactStatus>,
    is_read: Option<bool>,
    page: u64,
    page_size: u64,
) -> anyhow::Result<(Vec<ContactMessage>, u64)> {
    let mut query = Entity::find().order_by_desc(Column::CreatedAt);
    if let Some(status) = status {
        query = query.filter(Column::Status.eq(status.as_str()));
    }
    if let Some(is_read) = is_read {
        query = query.filter(Column::IsRead.eq(is_read));
    }

    let paginator = query.paginate(conn(), page_size);
    let total = paginator.num_items().await?;
    let models = paginator.fetch_page(page).await?;
    Ok((models.into_iter().map(Into::into).collect(), total))
}
