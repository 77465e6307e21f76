use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

use crate::error::{Error, QueryError};

// No unique index on users.username: uniqueness is checked before insert.
const SCHEMA: &[&str] = &[
    "
    CREATE TABLE IF NOT EXISTS users (
        id          UUID PRIMARY KEY,
        created_at  TIMESTAMPTZ NOT NULL,
        updated_at  TIMESTAMPTZ NOT NULL,
        deleted_at  TIMESTAMPTZ,
        username    TEXT NOT NULL,
        password    TEXT NOT NULL,
        is_admin    BOOLEAN NOT NULL DEFAULT FALSE
    )",
    "CREATE INDEX IF NOT EXISTS users_username_idx ON users (username)",
    "
    CREATE TABLE IF NOT EXISTS recipes (
        id            UUID PRIMARY KEY,
        username      TEXT NOT NULL,
        name          TEXT NOT NULL,
        ingredients   TEXT[] NOT NULL DEFAULT '{}',
        instructions  TEXT[] NOT NULL DEFAULT '{}',
        tags          TEXT[] NOT NULL DEFAULT '{}',
        published_at  TIMESTAMPTZ NOT NULL,
        is_private    BOOLEAN NOT NULL DEFAULT FALSE
    )",
    "CREATE INDEX IF NOT EXISTS recipes_username_idx ON recipes (username)",
];

pub async fn connect(database_url: &str) -> Result<Pool<Postgres>, Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(QueryError::from)?;

    log::info!("Connected to Postgres");
    Ok(pool)
}

/// Creates the tables if they are missing. Safe to run on every start.
pub async fn ensure_schema(pool: &Pool<Postgres>) -> Result<(), Error> {
    for statement in SCHEMA {
        sqlx::query(*statement)
            .execute(pool)
            .await
            .map_err(QueryError::from)?;
    }

    Ok(())
}
