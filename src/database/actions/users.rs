use crate::{
    error::{Error, QueryError},
    schema::User,
};

use sqlx::{Pool, Postgres};

pub async fn get_user(pool: &Pool<Postgres>, username: &str) -> Result<Option<User>, Error> {
    let row: Option<User> = sqlx::query_as("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
        .map_err(QueryError::from)?;

    Ok(row)
}

pub async fn username_exists(pool: &Pool<Postgres>, username: &str) -> Result<bool, Error> {
    let row: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
        .bind(username)
        .fetch_one(pool)
        .await
        .map_err(QueryError::from)?;

    Ok(row.0)
}

/// Inserts a user. `user.password` is expected to be the hashed version of their password
pub async fn create_user(pool: &Pool<Postgres>, user: &User) -> Result<(), Error> {
    sqlx::query(
        "
        INSERT INTO users (id, created_at, updated_at, deleted_at, username, password, is_admin)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
    ",
    )
    .bind(user.id)
    .bind(user.created_at)
    .bind(user.updated_at)
    .bind(user.deleted_at)
    .bind(&user.username)
    .bind(&user.password)
    .bind(user.is_admin)
    .execute(pool)
    .await
    .map_err(QueryError::from)?;

    Ok(())
}
