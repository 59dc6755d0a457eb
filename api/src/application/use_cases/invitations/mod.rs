pub mod accept_invitation;
pub mod create_invitation;
pub mod invite_links;
pub mod list_choir_invitations;
pub mod list_user_invitations;
pub mod reject_invitation;

use uuid::Uuid;

use crate::application::ports::invitation_repository::InvitationRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::errors::DomainError;
use crate::domain::invitations::invitation::Invitation;
use crate::domain::users::user::User;

#[derive(thiserror::Error, Debug)]
pub enum InvitationError {
    #[error("invitation not found")]
    NotFound,
    #[error("choir not found")]
    ChoirNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("only the choir admin can {action}")]
    Forbidden { action: &'static str },
    #[error("this email cannot be invited to the choir")]
    NotAllowed,
    #[error("invitation was sent to a different email")]
    EmailMismatch,
    #[error(transparent)]
    Invalid(#[from] DomainError),
    #[error("invitation storage failed")]
    Storage(#[source] anyhow::Error),
}

/// Loads the pending invitation for `token` and checks it was addressed to `user_id`.
async fn pending_for_user<U, I>(
    users: &U,
    invitations: &I,
    token: &str,
    user_id: Uuid,
) -> Result<(Invitation, User), InvitationError>
where
    U: UserRepository + ?Sized,
    I: InvitationRepository + ?Sized,
{
    let invitation = invitations
        .find_pending_by_token(token.trim())
        .await
        .map_err(InvitationError::Storage)?
        .ok_or(InvitationError::NotFound)?;
    let user = users
        .find_by_id(user_id)
        .await
        .map_err(InvitationError::Storage)?
        .ok_or(InvitationError::UserNotFound)?;
    if !invitation.is_for(&user.email) {
        return Err(InvitationError::EmailMismatch);
    }
    Ok((invitation, user))
}
