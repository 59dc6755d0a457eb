use uuid::Uuid;

use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::users::UserError;
use crate::domain::users::user::User;

pub struct GetUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> GetUser<'a, R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, UserError> {
        self.repo
            .find_by_id(user_id)
            .await
            .map_err(UserError::Storage)?
            .ok_or(UserError::NotFound)
    }
}
