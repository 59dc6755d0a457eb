pub mod choir_uniqueness;
pub mod invitation_policy;
