use std::{net::SocketAddr, sync::Arc};

use smilecook::{
    api::{routes, AppState},
    config::Config,
    connection,
    jwt::Tokens,
    repository::{PgRecipeRepository, PgUserRepository},
    service::{RecipeService, UserService},
    RedisRecipeCache,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;

    let pool = connection::connect(&config.database_url).await?;
    connection::ensure_schema(&pool).await?;

    let redis =
        smilecook::connect_redis(&config.redis_uri, config.redis_password.as_deref()).await?;

    let state = AppState::new(
        UserService::new(Arc::new(PgUserRepository::new(pool.clone()))),
        RecipeService::new(
            Arc::new(PgRecipeRepository::new(pool)),
            Arc::new(RedisRecipeCache::new(redis)),
        ),
        Tokens::new(&config.jwt_secret)?,
    );

    let address = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    log::info!("Listening on {address}");

    warp::serve(routes(state)).run(address).await;

    Ok(())
}
