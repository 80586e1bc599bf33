use async_trait::async_trait;

use super::users_model::{NewUser, User, UserUpdate};
use crate::users::Result;

/// Trait defining the contract for user service operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn create(&self, new_user: NewUser) -> Result<User>;
    fn retrieve(&self, user_id: &str) -> Result<User>;
    fn retrieve_by_email(&self, email: &str) -> Result<User>;
    fn list(&self) -> Result<Vec<User>>;
    fn filter(&self, query: &str) -> Result<Vec<User>>;
    async fn update(&self, user_id: String, update: UserUpdate) -> Result<User>;
    async fn change_password(
        &self,
        user_id: String,
        old_password: String,
        new_password: String,
    ) -> Result<()>;
    fn delete(&self, user_id: &str) -> Result<()>;
}
