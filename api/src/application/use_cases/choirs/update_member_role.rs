use uuid::Uuid;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::choirs::{ChoirError, load_choir, settle_admin_role};
use crate::domain::choirs::choir::ChoirMember;
use crate::domain::errors::DomainError;
use crate::domain::users::user::UserRole;

/// Makes a member a co-admin (`ChoirAdmin`) or a plain singer (`General`).
pub struct UpdateMemberRole<'a, U, C>
where
    U: UserRepository + ?Sized,
    C: ChoirRepository + ?Sized,
{
    pub users: &'a U,
    pub choirs: &'a C,
}

impl<'a, U, C> UpdateMemberRole<'a, U, C>
where
    U: UserRepository + ?Sized,
    C: ChoirRepository + ?Sized,
{
    pub async fn execute(
        &self,
        choir_id: Uuid,
        member_id: Uuid,
        role: UserRole,
        requester_id: Uuid,
    ) -> Result<ChoirMember, ChoirError> {
        let is_admin = match role {
            UserRole::ChoirAdmin => true,
            UserRole::General => false,
            UserRole::SuperAdmin => return Err(ChoirError::InvalidRole(role.as_str())),
        };
        let mut choir = load_choir(self.choirs, choir_id).await?;
        let mut member = choir
            .set_member_admin(member_id, is_admin, requester_id)?
            .clone();
        if !self
            .choirs
            .set_member_admin(choir.id, member_id, is_admin)
            .await
            .map_err(ChoirError::Storage)?
        {
            return Err(DomainError::MemberNotFound.into());
        }

        if is_admin {
            member.user.promote_to_admin();
            if let Err(e) = self.users.save_profile(&member.user).await {
                tracing::warn!(user_id = %member_id, error = ?e, "admin_promotion_failed");
            }
        } else {
            settle_admin_role(self.users, self.choirs, member_id).await;
            if let Ok(Some(user)) = self.users.find_by_id(member_id).await {
                member.user = user;
            }
        }
        tracing::info!(
            choir_id = %choir.id,
            member_id = %member_id,
            is_admin,
            "member_role_updated"
        );
        Ok(member)
    }
}
