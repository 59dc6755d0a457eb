use uuid::Uuid;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::use_cases::choirs::{ChoirError, load_choir};
use crate::domain::choirs::choir::Choir;

pub struct GetChoir<'a, R: ChoirRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ChoirRepository + ?Sized> GetChoir<'a, R> {
    pub async fn execute(&self, choir_id: Uuid) -> Result<Choir, ChoirError> {
        load_choir(self.repo, choir_id).await
    }
}
