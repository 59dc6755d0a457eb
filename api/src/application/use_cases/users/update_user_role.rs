use uuid::Uuid;

use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::users::UserError;
use crate::domain::users::user::{User, UserRole};

/// Platform-level role change, separate from choir membership roles.
pub struct UpdateUserRole<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> UpdateUserRole<'a, R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        role: UserRole,
        requester_id: Uuid,
    ) -> Result<User, UserError> {
        let requester = self
            .repo
            .find_by_id(requester_id)
            .await
            .map_err(UserError::Storage)?
            .ok_or(UserError::NotFound)?;
        if requester.role != UserRole::SuperAdmin {
            return Err(UserError::Forbidden);
        }
        let mut user = self
            .repo
            .find_by_id(user_id)
            .await
            .map_err(UserError::Storage)?
            .ok_or(UserError::NotFound)?;
        match role {
            UserRole::ChoirAdmin => user.promote_to_admin(),
            UserRole::General => user.demote_to_general(),
            UserRole::SuperAdmin => return Err(UserError::InvalidRole(role.as_str())),
        }
        if !self
            .repo
            .save_profile(&user)
            .await
            .map_err(UserError::Storage)?
        {
            return Err(UserError::NotFound);
        }
        tracing::info!(
            user_id = %user.id,
            role = user.role.as_str(),
            requester_id = %requester.id,
            "user_role_updated"
        );
        Ok(user)
    }
}
