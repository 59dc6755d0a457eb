pub mod list_tags;
