//! In-memory doubles for the repository and cache ports.

use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::AppState,
    cache::cache::RecipeCache,
    error::Error,
    jwt::Tokens,
    repository::{RecipeRepository, UserRepository},
    schema::{Recipe, RecipeDraft, User},
    service::{RecipeService, UserService},
};

pub const TEST_SECRET: &str = "test-secret";

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn stored(&self, username: &str) -> Option<User> {
        let users = self.users.lock().unwrap();
        users.iter().find(|u| u.username == username).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), Error> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, Error> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().any(|u| u.username == username))
    }
}

#[derive(Default)]
pub struct InMemoryRecipeRepository {
    recipes: Mutex<Vec<Recipe>>,
    public_fetches: AtomicUsize,
}

impl InMemoryRecipeRepository {
    pub fn public_fetches(&self) -> usize {
        self.public_fetches.load(Ordering::SeqCst)
    }

    pub fn insert(&self, recipe: Recipe) {
        self.recipes.lock().unwrap().push(recipe);
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn create(&self, recipe: &Recipe) -> Result<(), Error> {
        self.insert(recipe.clone());
        Ok(())
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<Recipe>, Error> {
        let recipes = self.recipes.lock().unwrap();
        Ok(recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn fetch_public(&self) -> Result<Vec<Recipe>, Error> {
        self.public_fetches.fetch_add(1, Ordering::SeqCst);
        let recipes = self.recipes.lock().unwrap();
        Ok(recipes.iter().filter(|r| !r.is_private).cloned().collect())
    }

    async fn fetch_by_owner(&self, username: &str) -> Result<Vec<Recipe>, Error> {
        let recipes = self.recipes.lock().unwrap();
        Ok(recipes
            .iter()
            .filter(|r| r.is_owned_by(username))
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, draft: &RecipeDraft) -> Result<bool, Error> {
        let mut recipes = self.recipes.lock().unwrap();
        match recipes.iter_mut().find(|r| r.id == id) {
            Some(recipe) => {
                recipe.name = draft.name.clone();
                recipe.ingredients = draft.ingredients.clone();
                recipe.instructions = draft.instructions.clone();
                recipe.tags = draft.tags.clone();
                recipe.is_private = draft.is_private;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, Error> {
        let mut recipes = self.recipes.lock().unwrap();
        let before = recipes.len();
        recipes.retain(|r| r.id != id);
        Ok(recipes.len() < before)
    }
}

/// Cache double. When `broken` is set every call fails like an unreachable redis.
#[derive(Default)]
pub struct InMemoryRecipeCache {
    value: Mutex<Option<Vec<Recipe>>>,
    broken: AtomicBool,
    invalidations: AtomicUsize,
}

impl InMemoryRecipeCache {
    pub fn cached(&self) -> Option<Vec<Recipe>> {
        self.value.lock().unwrap().clone()
    }

    pub fn invalidations(&self) -> usize {
        self.invalidations.load(Ordering::SeqCst)
    }

    pub fn break_connection(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), Error> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(Error::internal("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl RecipeCache for InMemoryRecipeCache {
    async fn get_recipes(&self) -> Result<Option<Vec<Recipe>>, Error> {
        self.check()?;
        Ok(self.cached())
    }

    async fn set_recipes(&self, recipes: &[Recipe]) -> Result<(), Error> {
        self.check()?;
        *self.value.lock().unwrap() = Some(recipes.to_vec());
        Ok(())
    }

    async fn invalidate(&self) -> Result<(), Error> {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        *self.value.lock().unwrap() = None;
        Ok(())
    }
}

/// Everything a handler test needs, with handles on the doubles.
pub struct TestApp {
    pub state: AppState,
    pub users: Arc<InMemoryUserRepository>,
    pub recipes: Arc<InMemoryRecipeRepository>,
    pub cache: Arc<InMemoryRecipeCache>,
}

impl TestApp {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let recipes = Arc::new(InMemoryRecipeRepository::default());
        let cache = Arc::new(InMemoryRecipeCache::default());

        let state = AppState::new(
            UserService::new(users.clone()),
            RecipeService::new(recipes.clone(), cache.clone()),
            Tokens::new(TEST_SECRET).unwrap(),
        );

        Self {
            state,
            users,
            recipes,
            cache,
        }
    }
}

pub fn draft(name: &str, tags: &[&str], is_private: bool) -> RecipeDraft {
    RecipeDraft {
        name: name.to_owned(),
        ingredients: vec![String::from("salt")],
        instructions: vec![String::from("mix")],
        tags: tags.iter().map(|t| t.to_string()).collect(),
        is_private,
    }
}
