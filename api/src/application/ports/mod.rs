pub mod choir_repository;
pub mod choir_song_repository;
pub mod conflict;
pub mod invitation_repository;
pub mod invite_link_repository;
pub mod playlist_repository;
pub mod song_repository;
pub mod tag_repository;
pub mod token_issuer;
pub mod user_repository;
