use uuid::Uuid;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::ports::invitation_repository::InvitationRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::invitations::{InvitationError, pending_for_user};
use crate::domain::invitations::invitation::Invitation;

pub struct AcceptInvitation<'a, U, C, I>
where
    U: UserRepository + ?Sized,
    C: ChoirRepository + ?Sized,
    I: InvitationRepository + ?Sized,
{
    pub users: &'a U,
    pub choirs: &'a C,
    pub invitations: &'a I,
}

impl<'a, U, C, I> AcceptInvitation<'a, U, C, I>
where
    U: UserRepository + ?Sized,
    C: ChoirRepository + ?Sized,
    I: InvitationRepository + ?Sized,
{
    pub async fn execute(&self, token: &str, user_id: Uuid) -> Result<Invitation, InvitationError> {
        let (mut invitation, user) =
            pending_for_user(self.users, self.invitations, token, user_id).await?;
        let already_member = self
            .choirs
            .is_member(invitation.choir_id, user.id)
            .await
            .map_err(InvitationError::Storage)?;
        // A concurrent accept or reject got there first
        if !self
            .invitations
            .accept(invitation.id, user.id)
            .await
            .map_err(InvitationError::Storage)?
        {
            return Err(InvitationError::NotFound);
        }
        invitation.accept();
        tracing::info!(
            choir_id = %invitation.choir_id,
            user_id = %user.id,
            already_member,
            "invitation_accepted"
        );
        Ok(invitation)
    }
}
