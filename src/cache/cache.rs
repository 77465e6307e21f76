use std::fmt::{self, Display};

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, FromRedisValue, ToRedisArgs};
use redis_macros::{FromRedisValue, ToRedisArgs};
use serde::{Deserialize, Serialize};

use crate::{
    constants::RECIPE_LIST_CACHE_KEY,
    error::{CacheError, Error},
    schema::Recipe,
};

// Caching - keys

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheKey {
    /// Every public recipe, in store order.
    PublicRecipes,
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::PublicRecipes => f.write_str(RECIPE_LIST_CACHE_KEY),
        }
    }
}

// Caching - values

/// Cached payload for [`CacheKey::PublicRecipes`], stored as JSON.
#[derive(Serialize, Deserialize, FromRedisValue, ToRedisArgs, Clone, Debug, PartialEq)]
pub struct RecipeList {
    pub recipes: Vec<Recipe>,
}

/// The cache used by the list read path.
///
/// Entries never expire. They are removed by [`RecipeCache::invalidate`].
#[async_trait]
pub trait RecipeCache: Send + Sync {
    async fn get_recipes(&self) -> Result<Option<Vec<Recipe>>, Error>;
    async fn set_recipes(&self, recipes: &[Recipe]) -> Result<(), Error>;
    async fn invalidate(&self) -> Result<(), Error>;
}

#[derive(Clone)]
pub struct RedisRecipeCache {
    connection: MultiplexedConnection,
}

impl RedisRecipeCache {
    pub fn new(connection: MultiplexedConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl RecipeCache for RedisRecipeCache {
    async fn get_recipes(&self) -> Result<Option<Vec<Recipe>>, Error> {
        let mut cache = self.connection.clone();
        let value: Option<RecipeList> =
            get_cache_value(CacheKey::PublicRecipes.to_string(), &mut cache).await?;

        Ok(value.map(|list| list.recipes))
    }

    async fn set_recipes(&self, recipes: &[Recipe]) -> Result<(), Error> {
        let mut cache = self.connection.clone();
        let value = RecipeList {
            recipes: recipes.to_vec(),
        };

        set_cache_value(CacheKey::PublicRecipes.to_string(), value, &mut cache).await
    }

    async fn invalidate(&self) -> Result<(), Error> {
        let mut cache = self.connection.clone();
        log::debug!("> Invalidating {}", CacheKey::PublicRecipes);

        delete_cache_value(CacheKey::PublicRecipes.to_string(), &mut cache).await
    }
}

/// Opens a multiplexed connection. `password` overrides one given in the uri.
pub async fn connect_redis(
    uri: &str,
    password: Option<&str>,
) -> Result<MultiplexedConnection, Error> {
    let mut info = redis::IntoConnectionInfo::into_connection_info(uri)
        .map_err(|e| Error::from(CacheError::from(e)))?;
    if let Some(password) = password {
        info.redis.password = Some(password.to_owned());
    }

    let client = redis::Client::open(info).map_err(|e| Error::from(CacheError::from(e)))?;
    let connection = client
        .get_multiplexed_async_connection()
        .await
        .map_err(|e| Error::from(CacheError::from(e)))?;

    log::info!("Connected to Redis");
    Ok(connection)
}

// Cache - raw handlers

pub async fn set_cache_value<K: ToRedisArgs + Send + Sync, V: ToRedisArgs + Send + Sync>(
    key: K,
    value: V,
    cache: &mut MultiplexedConnection,
) -> Result<(), Error> {
    let _: () = cache.set(key, value).await.map_err(CacheError::from)?;

    Ok(())
}

pub async fn delete_cache_value<K: ToRedisArgs + Send + Sync>(
    key: K,
    cache: &mut MultiplexedConnection,
) -> Result<(), Error> {
    let _: () = cache.del(key).await.map_err(CacheError::from)?;

    Ok(())
}

pub async fn get_cache_value<K: ToRedisArgs + Send + Sync, V: FromRedisValue>(
    key: K,
    cache: &mut MultiplexedConnection,
) -> Result<Option<V>, Error> {
    let value: Option<V> = cache.get(key).await.map_err(CacheError::from)?;

    Ok(value)
}
