use warp::{reject::Rejection, Filter};

use crate::error::Error;

use super::jwt::{Claims, Tokens};

/// Accepts both `Bearer <token>` and a bare token.
fn bearer_token(header: &str) -> &str {
    let header = header.trim();
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .unwrap_or(header)
        .trim()
}

/// Requires a valid, unexpired token in the `Authorization` header.
pub fn with_session(
    tokens: Tokens,
) -> impl Filter<Extract = (Claims,), Error = Rejection> + Clone {
    warp::header::optional::<String>("authorization").and_then(
        move |header: Option<String>| {
            let tokens = tokens.clone();
            async move {
                let header = header
                    .ok_or_else(|| warp::reject::custom(Error::unauthorized("Missing token")))?;

                let token = bearer_token(&header);
                if token.is_empty() {
                    return Err(warp::reject::custom(Error::unauthorized("Missing token")));
                }

                tokens.verify(token).map_err(|e| {
                    log::debug!("> Rejected token: {e}");
                    warp::reject::custom(e)
                })
            }
        },
    )
}
