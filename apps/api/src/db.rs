use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

/// Creates the SQLite connection pool and bootstraps the collections.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Opening SQLite store...");

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    init_schema(&pool).await?;

    info!("SQLite store ready");
    Ok(pool)
}

/// Three independent collections, each a document column plus the fields the
/// dashboard sorts or filters on. There is no migration layer; existence is
/// the whole schema contract.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    const SCHEMA: &[&str] = &[
        "CREATE TABLE IF NOT EXISTS profiles (
            id        TEXT PRIMARY KEY,
            timestamp INTEGER NOT NULL,
            doc       TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS leads (
            id        TEXT PRIMARY KEY,
            status    TEXT NOT NULL,
            timestamp INTEGER NOT NULL,
            doc       TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_leads_timestamp ON leads (timestamp)",
        "CREATE TABLE IF NOT EXISTS news (
            id        TEXT PRIMARY KEY,
            kind      TEXT NOT NULL,
            timestamp INTEGER NOT NULL,
            doc       TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_news_timestamp ON news (timestamp)",
    ];

    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
