use uuid::Uuid;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::use_cases::choirs::ChoirError;
use crate::domain::choirs::choir::Choir;

pub struct ListUserChoirs<'a, R: ChoirRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ChoirRepository + ?Sized> ListUserChoirs<'a, R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<Choir>, ChoirError> {
        self.repo
            .list_for_member(user_id)
            .await
            .map_err(ChoirError::Storage)
    }
}
