use uuid::Uuid;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::use_cases::choirs::{ChoirError, load_choir};
use crate::domain::choirs::choir::ChoirMember;

pub struct RemoveMember<'a, R: ChoirRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ChoirRepository + ?Sized> RemoveMember<'a, R> {
    pub async fn execute(
        &self,
        choir_id: Uuid,
        member_id: Uuid,
        requester_id: Uuid,
    ) -> Result<ChoirMember, ChoirError> {
        let mut choir = load_choir(self.repo, choir_id).await?;
        let removed = choir.remove_member(member_id, requester_id)?;
        self.repo
            .remove_member(choir.id, member_id)
            .await
            .map_err(ChoirError::Storage)?;
        tracing::info!(choir_id = %choir.id, member_id = %member_id, "member_removed");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use crate::test_support::InMemoryStore;

    #[tokio::test]
    async fn admin_removes_member_but_not_self() {
        let store = InMemoryStore::new();
        let admin = store.seed_user("Nuria");
        let singer = store.seed_user("Hugo");
        let choir = store.seed_choir("Capella", &admin);
        store.add_member(choir.id, singer.id, false).await.unwrap();
        let uc = RemoveMember { repo: &store };

        assert!(matches!(
            uc.execute(choir.id, admin.id, singer.id).await,
            Err(ChoirError::Forbidden { .. })
        ));
        assert!(matches!(
            uc.execute(choir.id, admin.id, admin.id).await,
            Err(ChoirError::Invalid(DomainError::AdminRemoval))
        ));

        let removed = uc.execute(choir.id, singer.id, admin.id).await.unwrap();
        assert_eq!(removed.user.id, singer.id);
        assert!(!store.is_member(choir.id, singer.id).await.unwrap());
        assert!(matches!(
            uc.execute(choir.id, singer.id, admin.id).await,
            Err(ChoirError::Invalid(DomainError::MemberNotFound))
        ));
    }
}
