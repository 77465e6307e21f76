use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    actions::{recipes, users},
    error::Error,
    schema::{Recipe, RecipeDraft, User},
};

/// Storage port for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<(), Error>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, Error>;
    async fn username_exists(&self, username: &str) -> Result<bool, Error>;
}

/// Storage port for recipes.
///
/// `update` and `delete` report `false` when no recipe has the given id.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn create(&self, recipe: &Recipe) -> Result<(), Error>;
    async fn find_one(&self, id: Uuid) -> Result<Option<Recipe>, Error>;
    async fn fetch_public(&self) -> Result<Vec<Recipe>, Error>;
    async fn fetch_by_owner(&self, username: &str) -> Result<Vec<Recipe>, Error>;
    async fn update(&self, id: Uuid, draft: &RecipeDraft) -> Result<bool, Error>;
    async fn delete(&self, id: Uuid) -> Result<bool, Error>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: Pool<Postgres>,
}

impl PgUserRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> Result<(), Error> {
        users::create_user(&self.pool, user).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        users::get_user(&self.pool, username).await
    }

    async fn username_exists(&self, username: &str) -> Result<bool, Error> {
        users::username_exists(&self.pool, username).await
    }
}

#[derive(Clone)]
pub struct PgRecipeRepository {
    pool: Pool<Postgres>,
}

impl PgRecipeRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeRepository for PgRecipeRepository {
    async fn create(&self, recipe: &Recipe) -> Result<(), Error> {
        recipes::create_recipe(&self.pool, recipe).await
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<Recipe>, Error> {
        recipes::get_recipe(&self.pool, id).await
    }

    async fn fetch_public(&self) -> Result<Vec<Recipe>, Error> {
        recipes::list_public_recipes(&self.pool).await
    }

    async fn fetch_by_owner(&self, username: &str) -> Result<Vec<Recipe>, Error> {
        recipes::list_user_recipes(&self.pool, username).await
    }

    async fn update(&self, id: Uuid, draft: &RecipeDraft) -> Result<bool, Error> {
        recipes::update_recipe(&self.pool, id, draft).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, Error> {
        recipes::delete_recipe(&self.pool, id).await
    }
}
