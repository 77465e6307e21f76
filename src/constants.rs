/// Lifetime of a token issued on sign-in, in seconds.
pub const SIGN_IN_TOKEN_LIFETIME: i64 = 10 * 60;
/// Lifetime of a token issued on refresh, in seconds.
pub const REFRESH_TOKEN_LIFETIME: i64 = 5 * 60;
/// A token may only be refreshed once it has this many seconds left or less.
pub const REFRESH_WINDOW: i64 = 30;

pub const RECIPE_LIST_CACHE_KEY: &str = "recipes";

pub const MAX_BODY_BYTES: u64 = 16 * 1024;

/// Read only in the local environment, relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = "config/localConfig.json";

pub const DEFAULT_SERVER_PORT: u16 = 8080;
pub const DEFAULT_REDIS_URI: &str = "redis://127.0.0.1:6379";
pub const DEVELOPMENT_JWT_SECRET: &str = "smilecook-development-secret";
