use uuid::Uuid;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::choirs::{
    ChoirError, ensure_admin, load_choir, settle_admin_role,
};

pub struct DeleteChoir<'a, U, C>
where
    U: UserRepository + ?Sized,
    C: ChoirRepository + ?Sized,
{
    pub users: &'a U,
    pub choirs: &'a C,
}

impl<'a, U, C> DeleteChoir<'a, U, C>
where
    U: UserRepository + ?Sized,
    C: ChoirRepository + ?Sized,
{
    pub async fn execute(&self, choir_id: Uuid, requester_id: Uuid) -> Result<(), ChoirError> {
        let choir = load_choir(self.choirs, choir_id).await?;
        ensure_admin(&choir, requester_id, "delete the choir")?;
        if !self
            .choirs
            .delete_choir(choir.id)
            .await
            .map_err(ChoirError::Storage)?
        {
            return Err(ChoirError::NotFound);
        }
        tracing::info!(choir_id = %choir.id, "choir_deleted");
        let admins = choir.members.iter().filter(|m| m.is_admin).map(|m| m.user.id);
        for user_id in admins {
            settle_admin_role(self.users, self.choirs, user_id).await;
        }
        Ok(())
    }
}
