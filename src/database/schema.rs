use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub username: String,
    /// argon2 PHC string, never serialized
    #[serde(skip_serializing, default)]
    pub password: String,
    pub is_admin: bool,
}

impl User {
    /// A fresh, non-admin account. `password` must already be hashed.
    pub fn new(username: String, password: String) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
            username,
            password,
            is_admin: false,
        }
    }
}

#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub tags: Vec<String>,
    pub published_at: DateTime<Utc>,
    pub is_private: bool,
}

impl Recipe {
    pub fn publish(username: String, draft: RecipeDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            name: draft.name,
            ingredients: draft.ingredients,
            instructions: draft.instructions,
            tags: draft.tags,
            published_at: Utc::now(),
            is_private: draft.is_private,
        }
    }

    pub fn is_owned_by(&self, username: &str) -> bool {
        self.username == username
    }

    pub fn is_visible_to(&self, username: &str) -> bool {
        !self.is_private || self.is_owned_by(username)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}

/// The client-editable part of a recipe, as sent on create and update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_private: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(tags: &[&str], is_private: bool) -> RecipeDraft {
        RecipeDraft {
            name: String::from("Pad thai"),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            is_private,
            ..Default::default()
        }
    }

    #[test]
    fn recipe_serializes_with_camel_case_fields() {
        let recipe = Recipe::publish(String::from("alice"), draft(&[], true));
        let json = serde_json::to_value(&recipe).unwrap();

        assert_eq!(json["isPrivate"], true);
        assert_eq!(json["username"], "alice");
        assert!(json.get("publishedAt").is_some());
    }

    #[test]
    fn user_password_is_never_serialized() {
        let user = User::new(String::from("alice"), String::from("$argon2id$hash"));
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("password").is_none());
        assert_eq!(json["is_admin"], false);
    }

    #[test]
    fn private_recipe_is_only_visible_to_owner() {
        let recipe = Recipe::publish(String::from("alice"), draft(&[], true));

        assert!(recipe.is_visible_to("alice"));
        assert!(!recipe.is_visible_to("bob"));
    }

    #[test]
    fn tag_match_ignores_case() {
        let recipe = Recipe::publish(String::from("alice"), draft(&["Vegetarian"], false));

        assert!(recipe.has_tag("vegetarian"));
        assert!(!recipe.has_tag("vegan"));
    }

    #[test]
    fn draft_fields_default_when_missing() {
        let draft: RecipeDraft = serde_json::from_str(r#"{"name":"Toast"}"#).unwrap();

        assert_eq!(draft.name, "Toast");
        assert!(draft.tags.is_empty());
        assert!(!draft.is_private);
    }
}
