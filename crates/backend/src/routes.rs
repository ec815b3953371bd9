use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;

/// Конфигурация всех роутов приложения.
///
/// Роуты под /api/admin монтируются без in-process авторизации:
/// доступ к ним ограничивает обратный прокси деплоймента.
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // BLOG (PUBLIC)
        // ========================================
        .route("/api/blog/categories", get(handlers::blog_category::list))
        .route(
            "/api/blog/categories/:slug",
            get(handlers::blog_category::get_by_slug),
        )
        .route("/api/blog/tags", get(handlers::blog_tag::list))
        .route("/api/blog/tags/:slug", get(handlers::blog_tag::get_by_slug))
        .route("/api/blog/posts", get(handlers::blog_post::list))
        .route("/api/blog/posts/featured", get(handlers::blog_post::featured))
        .route("/api/blog/posts/:slug", get(handlers::blog_post::get_by_slug))
        .route(
            "/api/blog/posts/:slug/comments",
            get(handlers::blog_post::comments),
        )
        .route("/api/blog/stats", get(handlers::blog_stats::stats))
        .route("/api/blog/comments", post(handlers::blog_comment::submit))
        .route(
            "/api/blog/subscriptions",
            post(handlers::blog_subscription::subscribe),
        )
        // ========================================
        // PORTFOLIO (PUBLIC)
        // ========================================
        .route(
            "/api/portfolio/categories",
            get(handlers::portfolio_category::list),
        )
        .route(
            "/api/portfolio/categories/:slug",
            get(handlers::portfolio_category::get_by_slug),
        )
        .route(
            "/api/portfolio/technologies",
            get(handlers::portfolio_technology::list),
        )
        .route(
            "/api/portfolio/technologies/:slug",
            get(handlers::portfolio_technology::get_by_slug),
        )
        .route("/api/portfolio/skills", get(handlers::portfolio_skill::list))
        .route(
            "/api/portfolio/projects",
            get(handlers::portfolio_project::list),
        )
        .route(
            "/api/portfolio/projects/featured",
            get(handlers::portfolio_project::featured),
        )
        .route(
            "/api/portfolio/projects/:slug",
            get(handlers::portfolio_project::get_by_slug),
        )
        // ========================================
        // CONTACTS / ANALYTICS (PUBLIC WRITES)
        // ========================================
        .route(
            "/api/contacts/messages",
            post(handlers::contact_message::submit),
        )
        .route(
            "/api/analytics/pageviews",
            post(handlers::analytics::track_page_view),
        )
        .route(
            "/api/analytics/events",
            post(handlers::analytics::track_event),
        )
        // ========================================
        // ADMIN: BLOG CONTENT
        // ========================================
        .route(
            "/api/admin/blog/categories",
            post(handlers::blog_category::upsert),
        )
        .route(
            "/api/admin/blog/categories/:id",
            axum::routing::delete(handlers::blog_category::delete),
        )
        .route("/api/admin/blog/tags", post(handlers::blog_tag::upsert))
        .route(
            "/api/admin/blog/tags/:id",
            axum::routing::delete(handlers::blog_tag::delete),
        )
        .route("/api/admin/blog/posts", post(handlers::blog_post::upsert))
        .route(
            "/api/admin/blog/posts/:id",
            axum::routing::delete(handlers::blog_post::delete),
        )
        .route(
            "/api/admin/blog/posts/:id/status",
            post(handlers::blog_post::set_status),
        )
        // ========================================
        // ADMIN: MODERATION / SUBSCRIPTIONS
        // ========================================
        .route(
            "/api/admin/blog/comments",
            get(handlers::blog_comment::list_admin),
        )
        .route(
            "/api/admin/blog/comments/:id/approve",
            post(handlers::blog_comment::approve),
        )
        .route(
            "/api/admin/blog/comments/:id/reject",
            post(handlers::blog_comment::reject),
        )
        .route(
            "/api/admin/blog/subscriptions",
            get(handlers::blog_subscription::list_admin),
        )
        // ========================================
        // ADMIN: PORTFOLIO CONTENT
        // ========================================
        .route(
            "/api/admin/portfolio/categories",
            post(handlers::portfolio_category::upsert),
        )
        .route(
            "/api/admin/portfolio/categories/:id",
            axum::routing::delete(handlers::portfolio_category::delete),
        )
        .route(
            "/api/admin/portfolio/technologies",
            post(handlers::portfolio_technology::upsert),
        )
        .route(
            "/api/admin/portfolio/technologies/:id",
            axum::routing::delete(handlers::portfolio_technology::delete),
        )
        .route(
            "/api/admin/portfolio/projects",
            post(handlers::portfolio_project::upsert),
        )
        .route(
            "/api/admin/portfolio/projects/:id",
            axum::routing::delete(handlers::portfolio_project::delete),
        )
        .route(
            "/api/admin/portfolio/projects/:id/status",
            post(handlers::portfolio_project::set_status),
        )
        .route(
            "/api/admin/portfolio/skills",
            post(handlers::portfolio_skill::upsert),
        )
        .route(
            "/api/admin/portfolio/skills/:id",
            axum::routing::delete(handlers::portfolio_skill::delete),
        )
        // ========================================
        // ADMIN: CONTACTS / ANALYTICS
        // ========================================
        .route(
            "/api/admin/contacts/messages",
            get(handlers::contact_message::list_admin),
        )
        .route(
            "/api/admin/contacts/messages/:id/read",
            post(handlers::contact_message::mark_read),
        )
        .route(
            "/api/admin/contacts/messages/:id/status",
            post(handlers::contact_message::set_status),
        )
        .route(
            "/api/admin/analytics/visitors",
            get(handlers::analytics::list_visitors),
        )
        .route(
            "/api/admin/analytics/pageviews",
            get(handlers::analytics::list_page_views),
        )
        .route(
            "/api/admin/analytics/events",
            get(handlers::analytics::list_events),
        )
}
