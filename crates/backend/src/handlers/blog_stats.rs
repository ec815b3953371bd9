use axum::Json;
use serde_json::json;

use crate::domain::{blog_category, blog_comment, blog_post, blog_subscription, blog_tag};
use crate::shared::error::AppError;

/// GET /api/blog/stats — агрегаты по публичной части блога
pub async fn stats() -> Result<Json<serde_json::Value>, AppError> {
    let total_posts = blog_post::repository::count_published().await?;
    let featured_posts = blog_post::repository::count_featured_published().await?;
    let total_views = blog_post::repository::total_views().await?;
    let total_categories = blog_category::repository::count_active().await?;
    let total_tags = blog_tag::repository::count_active().await?;
    let total_comments = blog_comment::repository::count_approved().await?;
    let total_subscriptions = blog_subscription::repository::count_active().await?;

    Ok(Json(json!({
        "total_posts": total_posts,
        "total_categories": total_categories,
        "total_tags": total_tags,
        "featured_posts": featured_posts,
        "total_views": total_views,
        "total_comments": total_comments,
        "total_subscriptions": total_subscriptions,
    })))
}
