pub mod choir_repository_sqlx;
pub mod choir_song_repository_sqlx;
pub mod invitation_repository_sqlx;
pub mod invite_link_repository_sqlx;
pub mod playlist_repository_sqlx;
pub mod song_repository_sqlx;
pub mod tag_repository_sqlx;
pub mod user_repository_sqlx;
