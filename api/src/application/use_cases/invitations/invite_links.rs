use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::ports::invite_link_repository::InviteLinkRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::invitations::InvitationError;
use crate::domain::choirs::choir::Choir;
use crate::domain::errors::DomainError;
use crate::domain::invitations::invite_link::InviteLink;

async fn administered_choir<C: ChoirRepository + ?Sized>(
    choirs: &C,
    choir_id: Uuid,
    user_id: Uuid,
    action: &'static str,
) -> Result<Choir, InvitationError> {
    let choir = choirs
        .find_by_id(choir_id)
        .await
        .map_err(InvitationError::Storage)?
        .ok_or(InvitationError::ChoirNotFound)?;
    if !choir.is_admin(user_id) {
        return Err(InvitationError::Forbidden { action });
    }
    Ok(choir)
}

pub struct CreateInviteLink<'a, C, L>
where
    C: ChoirRepository + ?Sized,
    L: InviteLinkRepository + ?Sized,
{
    pub choirs: &'a C,
    pub links: &'a L,
}

impl<'a, C, L> CreateInviteLink<'a, C, L>
where
    C: ChoirRepository + ?Sized,
    L: InviteLinkRepository + ?Sized,
{
    pub async fn execute(
        &self,
        choir_id: Uuid,
        expires_at: Option<DateTime<Utc>>,
        max_uses: Option<i32>,
        requester_id: Uuid,
    ) -> Result<InviteLink, InvitationError> {
        let choir =
            administered_choir(self.choirs, choir_id, requester_id, "create invite links").await?;
        let link = InviteLink::create(choir.id, requester_id, expires_at, max_uses, Utc::now())?;
        self.links
            .insert_link(&link)
            .await
            .map_err(InvitationError::Storage)?;
        tracing::info!(choir_id = %choir.id, link_id = %link.id, "invite_link_created");
        Ok(link)
    }
}

/// Joins the link's choir as a regular member.
pub struct AcceptInviteLink<'a, U, C, L>
where
    U: UserRepository + ?Sized,
    C: ChoirRepository + ?Sized,
    L: InviteLinkRepository + ?Sized,
{
    pub users: &'a U,
    pub choirs: &'a C,
    pub links: &'a L,
}

impl<'a, U, C, L> AcceptInviteLink<'a, U, C, L>
where
    U: UserRepository + ?Sized,
    C: ChoirRepository + ?Sized,
    L: InviteLinkRepository + ?Sized,
{
    pub async fn execute(&self, token: &str, user_id: Uuid) -> Result<InviteLink, InvitationError> {
        let mut link = self
            .links
            .find_by_token(token.trim())
            .await
            .map_err(InvitationError::Storage)?
            .ok_or(InvitationError::NotFound)?;
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(InvitationError::Storage)?
            .ok_or(InvitationError::UserNotFound)?;
        let now = Utc::now();
        link.check_usable(now)?;
        if self
            .choirs
            .is_member(link.choir_id, user.id)
            .await
            .map_err(InvitationError::Storage)?
        {
            return Err(DomainError::AlreadyMember.into());
        }
        if !self
            .links
            .redeem(link.id, user.id, now)
            .await
            .map_err(InvitationError::Storage)?
        {
            // Used up or deactivated since it was read
            let current = self
                .links
                .find_by_id(link.id)
                .await
                .map_err(InvitationError::Storage)?
                .ok_or(InvitationError::NotFound)?;
            current.check_usable(now)?;
            return Err(DomainError::LinkExhausted.into());
        }
        link.redeem(now)?;
        tracing::info!(
            choir_id = %link.choir_id,
            user_id = %user.id,
            link_id = %link.id,
            "invite_link_accepted"
        );
        Ok(link)
    }
}

pub struct ListInviteLinks<'a, C, L>
where
    C: ChoirRepository + ?Sized,
    L: InviteLinkRepository + ?Sized,
{
    pub choirs: &'a C,
    pub links: &'a L,
}

impl<'a, C, L> ListInviteLinks<'a, C, L>
where
    C: ChoirRepository + ?Sized,
    L: InviteLinkRepository + ?Sized,
{
    pub async fn execute(
        &self,
        choir_id: Uuid,
        requester_id: Uuid,
    ) -> Result<Vec<InviteLink>, InvitationError> {
        let choir =
            administered_choir(self.choirs, choir_id, requester_id, "view invite links").await?;
        self.links
            .list_for_choir(choir.id)
            .await
            .map_err(InvitationError::Storage)
    }
}

pub struct DeactivateInviteLink<'a, C, L>
where
    C: ChoirRepository + ?Sized,
    L: InviteLinkRepository + ?Sized,
{
    pub choirs: &'a C,
    pub links: &'a L,
}

impl<'a, C, L> DeactivateInviteLink<'a, C, L>
where
    C: ChoirRepository + ?Sized,
    L: InviteLinkRepository + ?Sized,
{
    pub async fn execute(&self, link_id: Uuid, requester_id: Uuid) -> Result<(), InvitationError> {
        let link = self
            .links
            .find_by_id(link_id)
            .await
            .map_err(InvitationError::Storage)?
            .ok_or(InvitationError::NotFound)?;
        administered_choir(self.choirs, link.choir_id, requester_id, "deactivate invite links")
            .await?;
        if !self
            .links
            .deactivate(link.id)
            .await
            .map_err(InvitationError::Storage)?
        {
            return Err(InvitationError::NotFound);
        }
        tracing::info!(choir_id = %link.choir_id, link_id = %link.id, "invite_link_deactivated");
        Ok(())
    }
}
