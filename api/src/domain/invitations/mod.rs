pub mod invitation;
pub mod invite_link;
