use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Bootstrap схемы: выполняется на старте, повторный запуск безвреден
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS blog_category (
        id TEXT PRIMARY KEY NOT NULL,
        slug TEXT NOT NULL UNIQUE,
        name_en TEXT NOT NULL DEFAULT '',
        name_ru TEXT NOT NULL DEFAULT '',
        name_he TEXT NOT NULL DEFAULT '',
        description_en TEXT NOT NULL DEFAULT '',
        description_ru TEXT NOT NULL DEFAULT '',
        description_he TEXT NOT NULL DEFAULT '',
        icon TEXT NOT NULL DEFAULT '',
        color TEXT NOT NULL DEFAULT '',
        parent_id TEXT,
        sort_order INTEGER NOT NULL DEFAULT 0,
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT,
        updated_at TEXT
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS blog_tag (
        id TEXT PRIMARY KEY NOT NULL,
        slug TEXT NOT NULL UNIQUE,
        name_en TEXT NOT NULL DEFAULT '',
        name_ru TEXT NOT NULL DEFAULT '',
        name_he TEXT NOT NULL DEFAULT '',
        description_en TEXT NOT NULL DEFAULT '',
        description_ru TEXT NOT NULL DEFAULT '',
        description_he TEXT NOT NULL DEFAULT '',
        color TEXT NOT NULL DEFAULT '',
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT,
        updated_at TEXT
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS blog_post (
        id TEXT PRIMARY KEY NOT NULL,
        slug TEXT NOT NULL UNIQUE,
        title_en TEXT NOT NULL DEFAULT '',
        title_ru TEXT NOT NULL DEFAULT '',
        title_he TEXT NOT NULL DEFAULT '',
        subtitle_en TEXT NOT NULL DEFAULT '',
        subtitle_ru TEXT NOT NULL DEFAULT '',
        subtitle_he TEXT NOT NULL DEFAULT '',
        excerpt_en TEXT NOT NULL DEFAULT '',
        excerpt_ru TEXT NOT NULL DEFAULT '',
        excerpt_he TEXT NOT NULL DEFAULT '',
        content_en TEXT NOT NULL DEFAULT '',
        content_ru TEXT NOT NULL DEFAULT '',
        content_he TEXT NOT NULL DEFAULT '',
        meta_title TEXT NOT NULL DEFAULT '',
        meta_description TEXT NOT NULL DEFAULT '',
        meta_keywords TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL DEFAULT 'draft',
        published_at TEXT,
        is_featured INTEGER NOT NULL DEFAULT 0,
        featured_order INTEGER NOT NULL DEFAULT 0,
        views_count INTEGER NOT NULL DEFAULT 0,
        read_time INTEGER NOT NULL DEFAULT 0,
        allow_comments INTEGER NOT NULL DEFAULT 1,
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT,
        updated_at TEXT
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS blog_post_category (
        post_id TEXT NOT NULL,
        category_id TEXT NOT NULL,
        PRIMARY KEY (post_id, category_id)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS blog_post_tag (
        post_id TEXT NOT NULL,
        tag_id TEXT NOT NULL,
        PRIMARY KEY (post_id, tag_id)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS blog_comment (
        id TEXT PRIMARY KEY NOT NULL,
        post_id TEXT NOT NULL,
        parent_id TEXT,
        author_name TEXT NOT NULL,
        author_email TEXT NOT NULL,
        author_website TEXT NOT NULL DEFAULT '',
        content TEXT NOT NULL,
        is_approved INTEGER NOT NULL DEFAULT 0,
        is_active INTEGER NOT NULL DEFAULT 1,
        ip_address TEXT,
        user_agent TEXT NOT NULL DEFAULT '',
        created_at TEXT,
        updated_at TEXT
    );
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_blog_comment_post ON blog_comment (post_id);
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS blog_subscription (
        id TEXT PRIMARY KEY NOT NULL,
        email TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL DEFAULT '',
        language TEXT NOT NULL DEFAULT 'en',
        is_active INTEGER NOT NULL DEFAULT 1,
        confirmed_at TEXT,
        token TEXT NOT NULL DEFAULT '',
        ip_address TEXT,
        created_at TEXT,
        updated_at TEXT
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS portfolio_category (
        id TEXT PRIMARY KEY NOT NULL,
        slug TEXT NOT NULL UNIQUE,
        name_en TEXT NOT NULL DEFAULT '',
        name_ru TEXT NOT NULL DEFAULT '',
        name_he TEXT NOT NULL DEFAULT '',
        description_en TEXT NOT NULL DEFAULT '',
        description_ru TEXT NOT NULL DEFAULT '',
        description_he TEXT NOT NULL DEFAULT '',
        icon TEXT NOT NULL DEFAULT '',
        color TEXT NOT NULL DEFAULT '',
        position INTEGER NOT NULL DEFAULT 0,
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT,
        updated_at TEXT
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS portfolio_technology (
        id TEXT PRIMARY KEY NOT NULL,
        slug TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL DEFAULT '',
        description_en TEXT NOT NULL DEFAULT '',
        description_ru TEXT NOT NULL DEFAULT '',
        description_he TEXT NOT NULL DEFAULT '',
        icon TEXT NOT NULL DEFAULT '',
        color TEXT NOT NULL DEFAULT '',
        website TEXT NOT NULL DEFAULT '',
        version TEXT NOT NULL DEFAULT '',
        position INTEGER NOT NULL DEFAULT 0,
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT,
        updated_at TEXT
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS portfolio_project (
        id TEXT PRIMARY KEY NOT NULL,
        slug TEXT NOT NULL UNIQUE,
        title_en TEXT NOT NULL DEFAULT '',
        title_ru TEXT NOT NULL DEFAULT '',
        title_he TEXT NOT NULL DEFAULT '',
        subtitle_en TEXT NOT NULL DEFAULT '',
        subtitle_ru TEXT NOT NULL DEFAULT '',
        subtitle_he TEXT NOT NULL DEFAULT '',
        description_en TEXT NOT NULL DEFAULT '',
        description_ru TEXT NOT NULL DEFAULT '',
        description_he TEXT NOT NULL DEFAULT '',
        content_en TEXT NOT NULL DEFAULT '',
        content_ru TEXT NOT NULL DEFAULT '',
        content_he TEXT NOT NULL DEFAULT '',
        meta_title TEXT NOT NULL DEFAULT '',
        meta_description TEXT NOT NULL DEFAULT '',
        meta_keywords TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL DEFAULT 'draft',
        published_at TEXT,
        is_featured INTEGER NOT NULL DEFAULT 0,
        featured_order INTEGER NOT NULL DEFAULT 0,
        views_count INTEGER NOT NULL DEFAULT 0,
        client_name TEXT NOT NULL DEFAULT '',
        client_website TEXT NOT NULL DEFAULT '',
        project_url TEXT NOT NULL DEFAULT '',
        github_url TEXT NOT NULL DEFAULT '',
        start_date TEXT,
        end_date TEXT,
        is_ongoing INTEGER NOT NULL DEFAULT 0,
        sort_order INTEGER NOT NULL DEFAULT 0,
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT,
        updated_at TEXT
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS portfolio_project_category (
        project_id TEXT NOT NULL,
        category_id TEXT NOT NULL,
        PRIMARY KEY (project_id, category_id)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS portfolio_project_technology (
        project_id TEXT NOT NULL,
        technology_id TEXT NOT NULL,
        PRIMARY KEY (project_id, technology_id)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS portfolio_skill (
        id TEXT PRIMARY KEY NOT NULL,
        slug TEXT NOT NULL UNIQUE,
        name_en TEXT NOT NULL DEFAULT '',
        name_ru TEXT NOT NULL DEFAULT '',
        name_he TEXT NOT NULL DEFAULT '',
        description_en TEXT NOT NULL DEFAULT '',
        description_ru TEXT NOT NULL DEFAULT '',
        description_he TEXT NOT NULL DEFAULT '',
        icon TEXT NOT NULL DEFAULT '',
        level INTEGER NOT NULL DEFAULT 0,
        skill_group TEXT NOT NULL DEFAULT 'other',
        years_experience INTEGER NOT NULL DEFAULT 0,
        position INTEGER NOT NULL DEFAULT 0,
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT,
        updated_at TEXT
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS contact_message (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        subject TEXT NOT NULL,
        message TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'new',
        is_read INTEGER NOT NULL DEFAULT 0,
        read_at TEXT,
        ip_address TEXT,
        user_agent TEXT NOT NULL DEFAULT '',
        created_at TEXT,
        updated_at TEXT
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS analytics_visitor (
        id TEXT PRIMARY KEY NOT NULL,
        visitor_key TEXT NOT NULL UNIQUE,
        first_visit_at TEXT,
        last_visit_at TEXT,
        visits_count INTEGER NOT NULL DEFAULT 1,
        ip_address TEXT,
        user_agent TEXT NOT NULL DEFAULT '',
        language TEXT NOT NULL DEFAULT '',
        referrer TEXT NOT NULL DEFAULT '',
        is_bot INTEGER NOT NULL DEFAULT 0
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS analytics_session (
        id TEXT PRIMARY KEY NOT NULL,
        session_key TEXT NOT NULL UNIQUE,
        visitor_key TEXT NOT NULL,
        started_at TEXT,
        ended_at TEXT,
        entry_page TEXT NOT NULL DEFAULT '',
        exit_page TEXT NOT NULL DEFAULT '',
        pages_viewed INTEGER NOT NULL DEFAULT 0,
        is_bounce INTEGER NOT NULL DEFAULT 1
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS analytics_page_view (
        id TEXT PRIMARY KEY NOT NULL,
        path TEXT NOT NULL,
        query TEXT NOT NULL DEFAULT '',
        referrer TEXT NOT NULL DEFAULT '',
        language TEXT NOT NULL DEFAULT '',
        visitor_key TEXT NOT NULL,
        session_key TEXT NOT NULL DEFAULT '',
        ip_address TEXT,
        user_agent TEXT NOT NULL DEFAULT '',
        is_bot INTEGER NOT NULL DEFAULT 0,
        is_mobile INTEGER NOT NULL DEFAULT 0,
        duration INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS analytics_event (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        category TEXT NOT NULL DEFAULT '',
        data TEXT,
        path TEXT NOT NULL DEFAULT '',
        visitor_key TEXT NOT NULL,
        session_key TEXT NOT NULL DEFAULT '',
        ip_address TEXT,
        user_agent TEXT NOT NULL DEFAULT '',
        created_at TEXT,
        updated_at TEXT
    );
    "#,
];

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/portfolio.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    for ddl in SCHEMA {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            ddl.to_string(),
        ))
        .await?;
    }
    tracing::info!("Database schema ready at {}", normalized);

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

#[cfg(test)]
pub mod test_support {
    use super::*;

    static INIT: tokio::sync::OnceCell<()> = tokio::sync::OnceCell::const_new();

    /// Общая файловая БД на процесс тестов; схема поднимается обычным
    /// bootstrap-ом. Тесты изолируются уникальными slug/email.
    pub async fn init_test_db() {
        INIT.get_or_init(|| async {
            let path = format!("target/test/portfolio-test-{}.db", std::process::id());
            let _ = std::fs::remove_file(&path);
            initialize_database(Some(&path))
                .await
                .expect("test database bootstrap");
        })
        .await;
    }
}
