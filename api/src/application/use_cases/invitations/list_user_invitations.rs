use uuid::Uuid;

use crate::application::dto::invitations::InvitationDto;
use crate::application::ports::invitation_repository::InvitationRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::invitations::InvitationError;

/// Pending invitations addressed to the user's email.
pub struct ListUserInvitations<'a, U, I>
where
    U: UserRepository + ?Sized,
    I: InvitationRepository + ?Sized,
{
    pub users: &'a U,
    pub invitations: &'a I,
}

impl<'a, U, I> ListUserInvitations<'a, U, I>
where
    U: UserRepository + ?Sized,
    I: InvitationRepository + ?Sized,
{
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<InvitationDto>, InvitationError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(InvitationError::Storage)?
            .ok_or(InvitationError::UserNotFound)?;
        let rows = self
            .invitations
            .list_pending_for_email(&user.email)
            .await
            .map_err(InvitationError::Storage)?;
        Ok(rows.into_iter().map(InvitationDto::from).collect())
    }
}
