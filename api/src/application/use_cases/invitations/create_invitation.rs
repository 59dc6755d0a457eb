use uuid::Uuid;

use crate::application::dto::invitations::InvitationDto;
use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::ports::conflict::is_unique_violation;
use crate::application::ports::invitation_repository::{InvitationRepository, InvitationRow};
use crate::application::use_cases::invitations::InvitationError;
use crate::domain::invitations::invitation::Invitation;
use crate::domain::services::invitation_policy::InvitationPolicy;
use crate::domain::users::email::normalize_email;

pub struct CreateInvitation<'a, C, I, P>
where
    C: ChoirRepository + ?Sized,
    I: InvitationRepository + ?Sized,
    P: InvitationPolicy + ?Sized,
{
    pub choirs: &'a C,
    pub invitations: &'a I,
    pub policy: &'a P,
}

impl<'a, C, I, P> CreateInvitation<'a, C, I, P>
where
    C: ChoirRepository + ?Sized,
    I: InvitationRepository + ?Sized,
    P: InvitationPolicy + ?Sized,
{
    pub async fn execute(
        &self,
        choir_id: Uuid,
        email: &str,
        inviter_id: Uuid,
    ) -> Result<InvitationDto, InvitationError> {
        let email = normalize_email(email)?;
        let choir = self
            .choirs
            .find_by_id(choir_id)
            .await
            .map_err(InvitationError::Storage)?
            .ok_or(InvitationError::ChoirNotFound)?;
        if !choir.is_admin(inviter_id) {
            return Err(InvitationError::Forbidden {
                action: "invite members",
            });
        }
        if !self
            .policy
            .can_be_created(choir.id, &email)
            .await
            .map_err(InvitationError::Storage)?
        {
            return Err(InvitationError::NotAllowed);
        }
        let invitation = Invitation::create(choir.id, &email)?;
        self.invitations
            .insert_invitation(&invitation)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    InvitationError::NotAllowed
                } else {
                    InvitationError::Storage(e)
                }
            })?;
        tracing::info!(choir_id = %choir.id, invitation_id = %invitation.id, "invitation_created");
        Ok(InvitationRow {
            invitation,
            choir_name: choir.name,
        }
        .into())
    }
}
