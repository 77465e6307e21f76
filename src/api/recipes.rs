use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use warp::{http::StatusCode, reject::Rejection, Filter, Reply};

use crate::{jwt::Claims, middleware::with_session, schema::RecipeDraft};

use super::{json_body, with_state, AppState};

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    tag: String,
}

pub fn routes(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let session = with_session(state.tokens.clone());

    let list = warp::path!("recipes")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(list_recipes);

    let search = warp::path!("recipes" / "search")
        .and(warp::get())
        .and(warp::query::<SearchQuery>())
        .and(with_state(state.clone()))
        .and_then(search_recipes);

    let create = warp::path!("recipes")
        .and(warp::post())
        .and(session.clone())
        .and(json_body())
        .and(with_state(state.clone()))
        .and_then(create_recipe);

    let get_one = warp::path!("recipes" / Uuid)
        .and(warp::get())
        .and(session.clone())
        .and(with_state(state.clone()))
        .and_then(get_recipe);

    let update = warp::path!("recipes" / Uuid)
        .and(warp::put())
        .and(session.clone())
        .and(json_body())
        .and(with_state(state.clone()))
        .and_then(update_recipe);

    let delete = warp::path!("recipes" / Uuid)
        .and(warp::delete())
        .and(session.clone())
        .and(with_state(state.clone()))
        .and_then(delete_recipe);

    let mine = warp::path!("users" / "me" / "recipes")
        .and(warp::get())
        .and(session)
        .and(with_state(state))
        .and_then(list_own_recipes);

    list.or(search)
        .or(create)
        .or(get_one)
        .or(update)
        .or(delete)
        .or(mine)
}

async fn list_recipes(state: AppState) -> Result<impl Reply, Rejection> {
    let recipes = state.recipes.list_public().await?;
    Ok(warp::reply::json(&recipes))
}

async fn search_recipes(query: SearchQuery, state: AppState) -> Result<impl Reply, Rejection> {
    let recipes = state.recipes.search_by_tag(&query.tag).await?;
    Ok(warp::reply::json(&recipes))
}

async fn create_recipe(
    claims: Claims,
    draft: RecipeDraft,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    let recipe = state.recipes.create(&claims.username, draft).await?;

    log::info!("{} created recipe {}", claims.username, recipe.id);
    Ok(warp::reply::json(&recipe))
}

async fn get_recipe(id: Uuid, claims: Claims, state: AppState) -> Result<impl Reply, Rejection> {
    let recipe = state.recipes.get(&claims.username, id).await?;
    Ok(warp::reply::json(&recipe))
}

async fn update_recipe(
    id: Uuid,
    claims: Claims,
    draft: RecipeDraft,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    state.recipes.update(&claims.username, id, draft).await?;

    log::info!("{} updated recipe {id}", claims.username);
    Ok(warp::reply::json(
        &json!({ "message": "Recipe has been updated" }),
    ))
}

async fn delete_recipe(id: Uuid, claims: Claims, state: AppState) -> Result<impl Reply, Rejection> {
    state.recipes.delete(&claims.username, id).await?;

    log::info!("{} deleted recipe {id}", claims.username);
    Ok(warp::reply::with_status(warp::reply(), StatusCode::NO_CONTENT))
}

async fn list_own_recipes(claims: Claims, state: AppState) -> Result<impl Reply, Rejection> {
    let recipes = state.recipes.list_owned(&claims.username).await?;
    Ok(warp::reply::json(&recipes))
}
