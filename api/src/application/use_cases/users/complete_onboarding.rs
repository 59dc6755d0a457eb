use uuid::Uuid;

use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::users::UserError;
use crate::domain::users::user::User;

pub struct CompleteOnboarding<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> CompleteOnboarding<'a, R> {
    /// `as_admin` is the "I run a choir" onboarding choice.
    pub async fn execute(&self, user_id: Uuid, as_admin: bool) -> Result<User, UserError> {
        let mut user = self
            .repo
            .find_by_id(user_id)
            .await
            .map_err(UserError::Storage)?
            .ok_or(UserError::NotFound)?;
        user.complete_onboarding();
        if as_admin {
            user.promote_to_admin();
        }
        if !self
            .repo
            .save_profile(&user)
            .await
            .map_err(UserError::Storage)?
        {
            return Err(UserError::NotFound);
        }
        tracing::info!(user_id = %user.id, role = user.role.as_str(), "onboarding_completed");
        Ok(user)
    }
}
