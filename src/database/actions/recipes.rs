use crate::{
    error::{Error, QueryError},
    schema::{Recipe, RecipeDraft},
};

use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_recipe(pool: &Pool<Postgres>, recipe: &Recipe) -> Result<(), Error> {
    sqlx::query(
        "
        INSERT INTO recipes (id, username, name, ingredients, instructions, tags, published_at, is_private)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
    ",
    )
    .bind(recipe.id)
    .bind(&recipe.username)
    .bind(&recipe.name)
    .bind(&recipe.ingredients)
    .bind(&recipe.instructions)
    .bind(&recipe.tags)
    .bind(recipe.published_at)
    .bind(recipe.is_private)
    .execute(pool)
    .await
    .map_err(QueryError::from)?;

    Ok(())
}

pub async fn get_recipe(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Recipe>, Error> {
    let row: Option<Recipe> = sqlx::query_as("SELECT * FROM recipes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(QueryError::from)?;

    Ok(row)
}

pub async fn list_public_recipes(pool: &Pool<Postgres>) -> Result<Vec<Recipe>, Error> {
    let rows: Vec<Recipe> =
        sqlx::query_as("SELECT * FROM recipes WHERE NOT is_private ORDER BY published_at")
            .fetch_all(pool)
            .await
            .map_err(QueryError::from)?;

    Ok(rows)
}

pub async fn list_user_recipes(pool: &Pool<Postgres>, username: &str) -> Result<Vec<Recipe>, Error> {
    let rows: Vec<Recipe> =
        sqlx::query_as("SELECT * FROM recipes WHERE username = $1 ORDER BY published_at")
            .bind(username)
            .fetch_all(pool)
            .await
            .map_err(QueryError::from)?;

    Ok(rows)
}

/// Overwrites the editable fields. Returns `false` when no recipe has the id.
pub async fn update_recipe(
    pool: &Pool<Postgres>,
    id: Uuid,
    draft: &RecipeDraft,
) -> Result<bool, Error> {
    let query = sqlx::query(
        "
        UPDATE recipes
        SET name = $2, ingredients = $3, instructions = $4, tags = $5, is_private = $6
        WHERE id = $1
    ",
    )
    .bind(id)
    .bind(&draft.name)
    .bind(&draft.ingredients)
    .bind(&draft.instructions)
    .bind(&draft.tags)
    .bind(draft.is_private)
    .execute(pool)
    .await
    .map_err(QueryError::from)?;

    Ok(query.rows_affected() > 0)
}

pub async fn delete_recipe(pool: &Pool<Postgres>, id: Uuid) -> Result<bool, Error> {
    let query = sqlx::query("DELETE FROM recipes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(QueryError::from)?;

    Ok(query.rows_affected() > 0)
}
