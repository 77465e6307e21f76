use serde::Deserialize;
use serde_json::json;
use warp::{http::StatusCode, reject::Rejection, Filter, Reply};

use crate::{jwt::Claims, middleware::with_session};

use super::{json_body, with_state, AppState};

#[derive(Debug, Deserialize)]
struct Credentials {
    username: String,
    password: String,
}

pub fn routes(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let sign_up = warp::path!("signup")
        .and(warp::post())
        .and(json_body())
        .and(with_state(state.clone()))
        .and_then(sign_up);

    let sign_in = warp::path!("signin")
        .and(warp::post())
        .and(json_body())
        .and(with_state(state.clone()))
        .and_then(sign_in);

    let refresh = warp::path!("refresh")
        .and(warp::post())
        .and(with_session(state.tokens.clone()))
        .and(with_state(state))
        .and_then(refresh);

    sign_up.or(sign_in).or(refresh)
}

async fn sign_up(request: Credentials, state: AppState) -> Result<impl Reply, Rejection> {
    state
        .users
        .sign_up(&request.username, &request.password)
        .await?;

    Ok(warp::reply::with_status(
        warp::reply::json(&json!({ "message": "signup successful" })),
        StatusCode::CREATED,
    ))
}

async fn sign_in(request: Credentials, state: AppState) -> Result<impl Reply, Rejection> {
    let user = state
        .users
        .authenticate(&request.username, &request.password)
        .await?;
    let issued = state.tokens.sign_in(&user.username)?;

    log::info!("{} signed in", user.username);
    Ok(warp::reply::json(&issued))
}

async fn refresh(claims: Claims, state: AppState) -> Result<impl Reply, Rejection> {
    let issued = state.tokens.refresh(&claims)?;

    log::debug!("> Refreshed token for {}", claims.username);
    Ok(warp::reply::json(&issued))
}
