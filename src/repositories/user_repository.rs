use std::sync::Arc;

use mongodb::{bson::doc, Collection, Database};
use tracing::info;

use crate::{error::AppError, models::user::User};

pub struct UserRepository {
    users: Collection<User>,
}

impl UserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            users: db.collection::<User>("users"),
        }
    }

    /// Keyed on username so a repeat visitor logs back into the same
    /// identity.
    pub async fn get_or_create(&self, username: &str) -> Result<User, AppError> {
        if let Some(user) = self.users.find_one(doc! { "username": username }).await? {
            return Ok(user);
        }
        let user = User::new(username);
        self.users.insert_one(&user).await?;
        info!(username, user_id = %user.user_id, "new user created");
        Ok(user)
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.find_one(doc! { "_id": user_id }).await?)
    }
}
