use chrono::Utc;
use contracts::domain::blog::subscription::{Subscription, SubscriptionId};
use contracts::domain::common::{AggregateId, Language, Timestamps};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_subscription")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub email: String,
    pub name: String,
    pub language: String,
    pub is_active: bool,
    pub confirmed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub token: String,
    pub ip_address: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Subscription {
    fn from(m: Model) -> Self {
        Subscription {
            id: SubscriptionId::new(Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4())),
            email: m.email,
            name: m.name,
            language: Language::from_code(&m.language).unwrap_or(Language::FALLBACK),
            is_active: m.is_active,
            confirmed_at: m.confirmed_at,
            token: m.token,
            ip_address: m.ip_address,
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

/// Точное совпадение email — в том виде, в каком он сохранён
pub async fn find_by_email(email: &str) -> anyhow::Result<Option<Subscription>> {
    let model = Entity::find()
        .filter(Column::Email.eq(email))
        .one(conn())
        .await?;
    Ok(model.map(Into::into))
}

pub async fn insert(subscription: &Subscription) -> anyhow::Result<Uuid> {
    let active = ActiveModel {
        id: Set(subscription.id.as_string()),
        email: Set(subscription.email.clone()),
        name: Set(subscription.name.clone()),
        language: Set(subscription.language.as_str().to_string()),
        is_active: Set(subscription.is_active),
        confirmed_at: Set(subscription.confirmed_at),
        token: Set(subscription.token.clone()),
        ip_address: Set(subscription.ip_address.clone()),
        created_at: Set(Some(subscription.timestamps.created_at)),
        updated_at: Set(Some(subscription.timestamps.updated_at)),
    };
    active.insert(conn()).await?;
    Ok(subscription.id.value())
}

pub async fn list_active(page: u64, page_size: u64) -> anyhow::Result<(Vec<Subscription>, u64)> {
    let paginator = Entity::find()
        .filter(Column::IsActive.eq(true))
        .order_by_desc(Column::CreatedAt)
        .paginate(conn(), page_size);
    let total = paginator.num_items().await?;
    let models = paginator.fetch_page(page).await?;
    Ok((models.into_iter().map(Into::into).collect(), total))
}

pub async fn count_active() -> anyhow::Result<u64> {
    Ok(Entity::find()
        .filter(Column::IsActive.eq(true))
        .count(conn())
        .await?)
}
