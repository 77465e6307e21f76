use std::sync::Arc;

use uuid::Uuid;

use crate::{
    cache::cache::RecipeCache,
    error::Error,
    repository::RecipeRepository,
    schema::{Recipe, RecipeDraft},
};

#[derive(Clone)]
pub struct RecipeService {
    recipes: Arc<dyn RecipeRepository>,
    cache: Arc<dyn RecipeCache>,
}

impl RecipeService {
    pub fn new(recipes: Arc<dyn RecipeRepository>, cache: Arc<dyn RecipeCache>) -> Self {
        Self { recipes, cache }
    }

    pub async fn create(&self, owner: &str, draft: RecipeDraft) -> Result<Recipe, Error> {
        validate(&draft)?;

        let recipe = Recipe::publish(owner.to_owned(), draft);
        self.recipes.create(&recipe).await?;
        self.invalidate().await;

        Ok(recipe)
    }

    /// A private recipe of someone else is reported as missing.
    pub async fn get(&self, viewer: &str, id: Uuid) -> Result<Recipe, Error> {
        match self.recipes.find_one(id).await? {
            Some(recipe) if recipe.is_visible_to(viewer) => Ok(recipe),
            _ => Err(not_found(id)),
        }
    }

    /// Public recipes, served from the cache when possible.
    pub async fn list_public(&self) -> Result<Vec<Recipe>, Error> {
        match self.cache.get_recipes().await {
            Ok(Some(recipes)) => {
                log::debug!("> Found recipes in cache");
                return Ok(recipes);
            }
            Ok(None) => log::debug!("> Recipes not cached, fetching from store"),
            Err(e) => log::warn!("Failed to read recipes from cache, fetching from store: {e}"),
        }

        let recipes = self.recipes.fetch_public().await?;
        if let Err(e) = self.cache.set_recipes(&recipes).await {
            log::error!("Failed to cache recipes: {e}");
        }

        Ok(recipes)
    }

    pub async fn search_by_tag(&self, tag: &str) -> Result<Vec<Recipe>, Error> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(Error::invalid_request("Missing tag"));
        }

        let recipes = self.list_public().await?;
        Ok(recipes.into_iter().filter(|r| r.has_tag(tag)).collect())
    }

    /// Every recipe of `owner`, private ones included. Not cached.
    pub async fn list_owned(&self, owner: &str) -> Result<Vec<Recipe>, Error> {
        self.recipes.fetch_by_owner(owner).await
    }

    pub async fn update(&self, editor: &str, id: Uuid, draft: RecipeDraft) -> Result<(), Error> {
        validate(&draft)?;
        self.check_owner(editor, id).await?;

        if !self.recipes.update(id, &draft).await? {
            return Err(not_found(id));
        }
        self.invalidate().await;

        Ok(())
    }

    pub async fn delete(&self, editor: &str, id: Uuid) -> Result<(), Error> {
        self.check_owner(editor, id).await?;

        if !self.recipes.delete(id).await? {
            return Err(not_found(id));
        }
        self.invalidate().await;

        Ok(())
    }

    async fn check_owner(&self, editor: &str, id: Uuid) -> Result<Recipe, Error> {
        let recipe = self.recipes.find_one(id).await?.ok_or_else(|| not_found(id))?;

        if !recipe.is_owned_by(editor) {
            log::info!("{editor} tried to modify recipe {id} owned by {}", recipe.username);
            return Err(Error::forbidden("You are not the owner of this recipe"));
        }
        Ok(recipe)
    }

    // A failed delete leaves a stale list behind; the write itself already succeeded.
    async fn invalidate(&self) {
        if let Err(e) = self.cache.invalidate().await {
            log::error!("Failed to invalidate cached recipes: {e}");
        }
    }
}

fn validate(draft: &RecipeDraft) -> Result<(), Error> {
    if draft.name.trim().is_empty() {
        return Err(Error::invalid_request("Recipe name is required"));
    }
    Ok(())
}

fn not_found(id: Uuid) -> Error {
    Error::not_found(format!("No recipe found with id: {id}"))
}
