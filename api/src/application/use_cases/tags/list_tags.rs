use crate::application::dto::tags::TagItemDto;
use crate::application::ports::tag_repository::TagRepository;

pub struct ListTags<'a, R: TagRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TagRepository + ?Sized> ListTags<'a, R> {
    pub async fn execute(&self, filter: Option<String>) -> anyhow::Result<Vec<TagItemDto>> {
        let filter = filter
            .map(|f| f.trim().to_lowercase())
            .filter(|f| !f.is_empty());
        let rows = self.repo.list_tags(filter).await?;
        Ok(rows
            .into_iter()
            .map(|(name, count)| TagItemDto { name, count })
            .collect())
    }
}
