//! Business rules between the HTTP handlers and the repositories.

mod recipes;
mod users;

pub use recipes::RecipeService;
pub use users::UserService;
