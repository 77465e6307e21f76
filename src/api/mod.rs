//! HTTP surface: warp filters, handlers and error rendering.

mod auth;
mod recipes;
mod rejection;


use std::convert::Infallible;

use serde::de::DeserializeOwned;
use warp::{reject::Rejection, Filter, Reply};

use crate::{
    constants::MAX_BODY_BYTES,
    jwt::Tokens,
    service::{RecipeService, UserService},
};

pub use rejection::{handle_rejection, ErrorBody};

/// Long-lived handles shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub recipes: RecipeService,
    pub tokens: Tokens,
}

impl AppState {
    pub fn new(users: UserService, recipes: RecipeService, tokens: Tokens) -> Self {
        Self {
            users,
            recipes,
            tokens,
        }
    }
}

/// Every route, with rejections rendered as `{"error": ...}` and request logging.
pub fn routes(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    auth::routes(state.clone())
        .or(recipes::routes(state))
        .recover(handle_rejection)
        .with(warp::log("smilecook::api"))
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn json_body<T: DeserializeOwned + Send>() -> impl Filter<Extract = (T,), Error = Rejection> + Clone
{
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
}
