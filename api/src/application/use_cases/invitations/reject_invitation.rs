use uuid::Uuid;

use crate::application::ports::invitation_repository::InvitationRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::invitations::{InvitationError, pending_for_user};
use crate::domain::invitations::invitation::Invitation;

pub struct RejectInvitation<'a, U, I>
where
    U: UserRepository + ?Sized,
    I: InvitationRepository + ?Sized,
{
    pub users: &'a U,
    pub invitations: &'a I,
}

impl<'a, U, I> RejectInvitation<'a, U, I>
where
    U: UserRepository + ?Sized,
    I: InvitationRepository + ?Sized,
{
    pub async fn execute(&self, token: &str, user_id: Uuid) -> Result<Invitation, InvitationError> {
        let (mut invitation, _) =
            pending_for_user(self.users, self.invitations, token, user_id).await?;
        if !self
            .invitations
            .reject(invitation.id)
            .await
            .map_err(InvitationError::Storage)?
        {
            return Err(InvitationError::NotFound);
        }
        invitation.reject();
        tracing::info!(invitation_id = %invitation.id, "invitation_rejected");
        Ok(invitation)
    }
}
