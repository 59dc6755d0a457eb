use std::sync::Arc;

use sqlx::PgPool;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::ports::choir_song_repository::ChoirSongRepository;
use crate::application::ports::invitation_repository::InvitationRepository;
use crate::application::ports::invite_link_repository::InviteLinkRepository;
use crate::application::ports::playlist_repository::PlaylistRepository;
use crate::application::ports::song_repository::SongRepository;
use crate::application::ports::tag_repository::TagRepository;
use crate::application::ports::token_issuer::TokenIssuer;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;
use crate::domain::services::choir_uniqueness::ChoirUniquenessChecker;
use crate::domain::services::invitation_policy::InvitationPolicy;
use crate::infrastructure::auth::jwt::JwtTokenService;
use crate::infrastructure::db::repositories::choir_repository_sqlx::SqlxChoirRepository;
use crate::infrastructure::db::repositories::choir_song_repository_sqlx::SqlxChoirSongRepository;
use crate::infrastructure::db::repositories::invitation_repository_sqlx::SqlxInvitationRepository;
use crate::infrastructure::db::repositories::invite_link_repository_sqlx::SqlxInviteLinkRepository;
use crate::infrastructure::db::repositories::playlist_repository_sqlx::SqlxPlaylistRepository;
use crate::infrastructure::db::repositories::song_repository_sqlx::SqlxSongRepository;
use crate::infrastructure::db::repositories::tag_repository_sqlx::SqlxTagRepository;
use crate::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use crate::infrastructure::policies::choir_uniqueness::StoreChoirUniquenessChecker;
use crate::infrastructure::policies::invitation_policy::StoreInvitationPolicy;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    choir_repo: Arc<dyn ChoirRepository>,
    song_repo: Arc<dyn SongRepository>,
    choir_song_repo: Arc<dyn ChoirSongRepository>,
    playlist_repo: Arc<dyn PlaylistRepository>,
    invitation_repo: Arc<dyn InvitationRepository>,
    invite_link_repo: Arc<dyn InviteLinkRepository>,
    tag_repo: Arc<dyn TagRepository>,
    choir_uniqueness: Arc<dyn ChoirUniquenessChecker>,
    invitation_policy: Arc<dyn InvitationPolicy>,
    token_issuer: Arc<dyn TokenIssuer>,
}

impl AppServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        choir_repo: Arc<dyn ChoirRepository>,
        song_repo: Arc<dyn SongRepository>,
        choir_song_repo: Arc<dyn ChoirSongRepository>,
        playlist_repo: Arc<dyn PlaylistRepository>,
        invitation_repo: Arc<dyn InvitationRepository>,
        invite_link_repo: Arc<dyn InviteLinkRepository>,
        tag_repo: Arc<dyn TagRepository>,
        choir_uniqueness: Arc<dyn ChoirUniquenessChecker>,
        invitation_policy: Arc<dyn InvitationPolicy>,
        token_issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            user_repo,
            choir_repo,
            song_repo,
            choir_song_repo,
            playlist_repo,
            invitation_repo,
            invite_link_repo,
            tag_repo,
            choir_uniqueness,
            invitation_policy,
            token_issuer,
        }
    }

    /// Postgres-backed adapters for every port; policies query the same repositories.
    pub fn postgres(pool: PgPool, cfg: &Config) -> Self {
        let choir_repo: Arc<dyn ChoirRepository> = Arc::new(SqlxChoirRepository::new(pool.clone()));
        let invitation_repo: Arc<dyn InvitationRepository> =
            Arc::new(SqlxInvitationRepository::new(pool.clone()));
        Self::new(
            Arc::new(SqlxUserRepository::new(pool.clone())),
            choir_repo.clone(),
            Arc::new(SqlxSongRepository::new(pool.clone())),
            Arc::new(SqlxChoirSongRepository::new(pool.clone())),
            Arc::new(SqlxPlaylistRepository::new(pool.clone())),
            invitation_repo.clone(),
            Arc::new(SqlxInviteLinkRepository::new(pool.clone())),
            Arc::new(SqlxTagRepository::new(pool)),
            Arc::new(StoreChoirUniquenessChecker::new(choir_repo)),
            Arc::new(StoreInvitationPolicy::new(invitation_repo)),
            Arc::new(JwtTokenService::from_config(cfg)),
        )
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn choir_repo(&self) -> Arc<dyn ChoirRepository> {
        self.services.choir_repo.clone()
    }

    pub fn song_repo(&self) -> Arc<dyn SongRepository> {
        self.services.song_repo.clone()
    }

    pub fn choir_song_repo(&self) -> Arc<dyn ChoirSongRepository> {
        self.services.choir_song_repo.clone()
    }

    pub fn playlist_repo(&self) -> Arc<dyn PlaylistRepository> {
        self.services.playlist_repo.clone()
    }

    pub fn invitation_repo(&self) -> Arc<dyn InvitationRepository> {
        self.services.invitation_repo.clone()
    }

    pub fn invite_link_repo(&self) -> Arc<dyn InviteLinkRepository> {
        self.services.invite_link_repo.clone()
    }

    pub fn tag_repo(&self) -> Arc<dyn TagRepository> {
        self.services.tag_repo.clone()
    }

    pub fn choir_uniqueness(&self) -> Arc<dyn ChoirUniquenessChecker> {
        self.services.choir_uniqueness.clone()
    }

    pub fn invitation_policy(&self) -> Arc<dyn InvitationPolicy> {
        self.services.invitation_policy.clone()
    }

    pub fn token_issuer(&self) -> Arc<dyn TokenIssuer> {
        self.services.token_issuer.clone()
    }
}
