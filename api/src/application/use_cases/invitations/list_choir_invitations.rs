use uuid::Uuid;

use crate::application::dto::invitations::InvitationDto;
use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::ports::invitation_repository::InvitationRepository;
use crate::application::use_cases::invitations::InvitationError;

pub struct ListChoirInvitations<'a, C, I>
where
    C: ChoirRepository + ?Sized,
    I: InvitationRepository + ?Sized,
{
    pub choirs: &'a C,
    pub invitations: &'a I,
}

impl<'a, C, I> ListChoirInvitations<'a, C, I>
where
    C: ChoirRepository + ?Sized,
    I: InvitationRepository + ?Sized,
{
    pub async fn execute(
        &self,
        choir_id: Uuid,
        requester_id: Uuid,
    ) -> Result<Vec<InvitationDto>, InvitationError> {
        let choir = self
            .choirs
            .find_by_id(choir_id)
            .await
            .map_err(InvitationError::Storage)?
            .ok_or(InvitationError::ChoirNotFound)?;
        if !choir.is_admin(requester_id) {
            return Err(InvitationError::Forbidden {
                action: "view invitations",
            });
        }
        let rows = self
            .invitations
            .list_for_choir(choir.id)
            .await
            .map_err(InvitationError::Storage)?;
        Ok(rows.into_iter().map(InvitationDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::invitations::invitation::Invitation;
    use crate::test_support::InMemoryStore;

    #[tokio::test]
    async fn admin_sees_every_status() {
        let store = InMemoryStore::new();
        let admin = store.seed_user("Rosa");
        let choir = store.seed_choir("Polifonia", &admin);
        let mut accepted = Invitation::create(choir.id, "a@example.com").unwrap();
        accepted.accept();
        store.insert_invitation(&accepted).await.unwrap();
        store
            .insert_invitation(&Invitation::create(choir.id, "b@example.com").unwrap())
            .await
            .unwrap();
        let uc = ListChoirInvitations {
            choirs: &store,
            invitations: &store,
        };

        assert_eq!(uc.execute(choir.id, admin.id).await.unwrap().len(), 2);
        assert!(matches!(
            uc.execute(choir.id, Uuid::new_v4()).await,
            Err(InvitationError::Forbidden { .. })
        ));
    }
}
