pub mod choir_song;
pub mod song;
pub mod tag;
