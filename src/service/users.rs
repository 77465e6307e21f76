use std::sync::Arc;

use crate::{
    cryptography::{hash_password, verify_password},
    error::Error,
    repository::UserRepository,
    schema::User,
};

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Registers a new, non-admin user.
    ///
    /// Uniqueness is a check-then-insert, so two concurrent sign-ups for the
    /// same name can both succeed.
    pub async fn sign_up(&self, username: &str, password: &str) -> Result<User, Error> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(Error::invalid_request("Username and password are required"));
        }

        if self.users.username_exists(username).await? {
            return Err(Error::invalid_request("Username already exists"));
        }

        let user = User::new(username.to_owned(), hash_password(password)?);
        self.users.create(&user).await?;

        log::info!("Registered user {}", user.username);
        Ok(user)
    }

    /// Unknown user and wrong password are indistinguishable to the caller.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, Error> {
        let invalid = || Error::unauthorized("Invalid username or password");

        let user = self
            .users
            .find_by_username(username.trim())
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(password, &user.password)? {
            return Err(invalid());
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryUserRepository;

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryUserRepository::default()))
    }

    #[tokio::test]
    async fn sign_up_stores_a_hashed_password() {
        let service = service();

        let user = service.sign_up("alice", "hunter2").await.unwrap();

        assert_ne!(user.password, "hunter2");
        assert!(!user.is_admin);
        assert!(verify_password("hunter2", &user.password).unwrap());
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let service = service();
        service.sign_up("alice", "hunter2").await.unwrap();

        assert_eq!(
            service.sign_up("alice", "other").await,
            Err(Error::invalid_request("Username already exists"))
        );
    }

    #[tokio::test]
    async fn blank_credentials_are_rejected() {
        let service = service();

        assert!(matches!(
            service.sign_up("  ", "hunter2").await,
            Err(Error::InvalidRequest(_))
        ));
        assert!(matches!(
            service.sign_up("alice", "").await,
            Err(Error::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn authenticate_checks_the_password() {
        let service = service();
        service.sign_up("alice", "hunter2").await.unwrap();

        assert_eq!(
            service.authenticate("alice", "hunter2").await.unwrap().username,
            "alice"
        );
        assert_eq!(
            service.authenticate("alice", "wrong").await,
            Err(Error::unauthorized("Invalid username or password"))
        );
        assert_eq!(
            service.authenticate("bob", "hunter2").await,
            Err(Error::unauthorized("Invalid username or password"))
        );
    }
}
