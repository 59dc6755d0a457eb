use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagItemDto {
    pub name: String,
    pub count: i64,
}
