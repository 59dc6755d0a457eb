use uuid::Uuid;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::choirs::{ChoirError, name_write_error};
use crate::domain::choirs::choir::Choir;
use crate::domain::services::choir_uniqueness::ChoirUniquenessChecker;

pub struct CreateChoir<'a, U, C, Q>
where
    U: UserRepository + ?Sized,
    C: ChoirRepository + ?Sized,
    Q: ChoirUniquenessChecker + ?Sized,
{
    pub users: &'a U,
    pub choirs: &'a C,
    pub uniqueness: &'a Q,
}

impl<'a, U, C, Q> CreateChoir<'a, U, C, Q>
where
    U: UserRepository + ?Sized,
    C: ChoirRepository + ?Sized,
    Q: ChoirUniquenessChecker + ?Sized,
{
    pub async fn execute(
        &self,
        name: &str,
        description: Option<String>,
        admin_id: Uuid,
    ) -> Result<Choir, ChoirError> {
        let mut admin = self
            .users
            .find_by_id(admin_id)
            .await
            .map_err(ChoirError::Storage)?
            .ok_or(ChoirError::UserNotFound)?;
        admin.promote_to_admin();
        let choir = Choir::create(name, description, admin.clone())?;
        if !self
            .uniqueness
            .is_unique(&choir.name)
            .await
            .map_err(ChoirError::Storage)?
        {
            return Err(ChoirError::DuplicateName(choir.name));
        }
        self.choirs
            .insert_choir(&choir)
            .await
            .map_err(|e| name_write_error(&choir.name, e))?;
        if let Err(e) = self.users.save_profile(&admin).await {
            tracing::warn!(user_id = %admin.id, error = ?e, "admin_promotion_failed");
        }
        tracing::info!(choir_id = %choir.id, admin_id = %admin.id, "choir_created");
        Ok(choir)
    }
}
