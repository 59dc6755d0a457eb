//! In-memory implementations of every port, for use-case and policy tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::application::ports::choir_repository::ChoirRepository;
use crate::application::ports::choir_song_repository::ChoirSongRepository;
use crate::application::ports::conflict::UniqueViolation;
use crate::application::ports::invitation_repository::{
    InvitationEligibility, InvitationRepository, InvitationRow,
};
use crate::application::ports::invite_link_repository::InviteLinkRepository;
use crate::application::ports::playlist_repository::{PlaylistRepository, PlaylistSummaryRow};
use crate::application::ports::song_repository::{SongRepository, SongSearch};
use crate::application::ports::tag_repository::TagRepository;
use crate::application::ports::token_issuer::{IssuedToken, TokenClaims, TokenIssuer};
use crate::application::ports::user_repository::UserRepository;
use crate::domain::choirs::choir::{Choir, ChoirMember, choir_name_key};
use crate::domain::invitations::invitation::Invitation;
use crate::domain::invitations::invite_link::InviteLink;
use crate::domain::playlists::playlist::Playlist;
use crate::domain::songs::choir_song::ChoirSong;
use crate::domain::songs::song::Song;
use crate::domain::songs::tag::Tag;
use crate::domain::users::email::same_email;
use crate::domain::users::user::{User, UserRole};

struct ChoirRecord {
    id: Uuid,
    name: String,
    description: Option<String>,
    admin_user_id: Uuid,
    created_at: DateTime<Utc>,
    members: Vec<(Uuid, bool)>,
}

struct ChoirSongMeta {
    choir_id: Uuid,
    key: Option<String>,
    notes: Option<String>,
    base_song_id: Option<Uuid>,
}

struct PlaylistRecord {
    id: Uuid,
    choir_id: Uuid,
    name: String,
    description: Option<String>,
    created_by: Uuid,
    created_at: DateTime<Utc>,
    songs: Vec<Uuid>,
}

#[derive(Default)]
struct State {
    users: HashMap<Uuid, User>,
    choirs: HashMap<Uuid, ChoirRecord>,
    invitations: Vec<Invitation>,
    invite_links: Vec<InviteLink>,
    songs: HashMap<Uuid, Song>,
    choir_songs: HashMap<Uuid, ChoirSongMeta>,
    tags: HashMap<String, Tag>,
    playlists: HashMap<Uuid, PlaylistRecord>,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    offline: Mutex<bool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every port call fails like an unreachable database.
    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock().unwrap() = offline;
    }

    pub fn seed_user(&self, name: &str) -> User {
        let email = format!("{}@choir.test", name.to_lowercase().replace(' ', "."));
        let user = User::create(Some(&format!("ext-{}", name)), name, &email).unwrap();
        self.state
            .lock()
            .unwrap()
            .users
            .insert(user.id, user.clone());
        user
    }

    pub fn seed_choir(&self, name: &str, admin: &User) -> Choir {
        let choir = Choir::create(name, None, admin.clone()).unwrap();
        self.put_choir(&choir);
        choir
    }

    pub fn seed_song(&self, title: &str, creator: Option<Uuid>) -> Song {
        let song = Song::create(
            crate::domain::songs::song::SongDraft {
                title: title.into(),
                ..Default::default()
            },
            creator,
        )
        .unwrap();
        self.state
            .lock()
            .unwrap()
            .songs
            .insert(song.id, song.clone());
        song
    }

    pub fn user(&self, id: Uuid) -> Option<User> {
        self.state.lock().unwrap().users.get(&id).cloned()
    }

    pub fn invitations(&self) -> Vec<Invitation> {
        self.state.lock().unwrap().invitations.clone()
    }

    pub fn invite_link(&self, id: Uuid) -> Option<InviteLink> {
        let st = self.state.lock().unwrap();
        st.invite_links.iter().find(|l| l.id == id).cloned()
    }

    fn check(&self) -> anyhow::Result<()> {
        if *self.offline.lock().unwrap() {
            anyhow::bail!("store unavailable");
        }
        Ok(())
    }

    fn put_choir(&self, choir: &Choir) {
        let mut st = self.state.lock().unwrap();
        for m in &choir.members {
            st.users.entry(m.user.id).or_insert_with(|| m.user.clone());
        }
        st.choirs.insert(
            choir.id,
            ChoirRecord {
                id: choir.id,
                name: choir.name.clone(),
                description: choir.description.clone(),
                admin_user_id: choir.admin_user_id,
                created_at: choir.created_at,
                members: choir
                    .members
                    .iter()
                    .map(|m| (m.user.id, m.is_admin))
                    .collect(),
            },
        );
    }
}

impl State {
    fn choir(&self, rec: &ChoirRecord) -> Choir {
        Choir {
            id: rec.id,
            name: rec.name.clone(),
            description: rec.description.clone(),
            admin_user_id: rec.admin_user_id,
            members: rec
                .members
                .iter()
                .filter_map(|(uid, is_admin)| {
                    self.users.get(uid).map(|u| ChoirMember {
                        user: u.clone(),
                        is_admin: *is_admin,
                    })
                })
                .collect(),
            created_at: rec.created_at,
        }
    }

    fn choir_song(&self, id: Uuid) -> Option<ChoirSong> {
        let meta = self.choir_songs.get(&id)?;
        Some(ChoirSong {
            song: self.songs.get(&id)?.clone(),
            choir_id: meta.choir_id,
            key: meta.key.clone(),
            notes: meta.notes.clone(),
            base_song_id: meta.base_song_id,
        })
    }

    fn row(&self, inv: &Invitation) -> InvitationRow {
        InvitationRow {
            invitation: inv.clone(),
            choir_name: self
                .choirs
                .get(&inv.choir_id)
                .map(|c| c.name.clone())
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert_user(&self, user: &User) -> anyhow::Result<()> {
        self.check()?;
        self.state
            .lock()
            .unwrap()
            .users
            .insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        self.check()?;
        Ok(self.user(id))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        self.check()?;
        let st = self.state.lock().unwrap();
        Ok(st.users.values().find(|u| same_email(&u.email, email)).cloned())
    }

    async fn find_by_external_id(&self, external_id: &str) -> anyhow::Result<Option<User>> {
        self.check()?;
        let st = self.state.lock().unwrap();
        Ok(st
            .users
            .values()
            .find(|u| u.external_id.as_deref() == Some(external_id))
            .cloned())
    }

    async fn save_profile(&self, user: &User) -> anyhow::Result<bool> {
        self.check()?;
        let mut st = self.state.lock().unwrap();
        match st.users.get_mut(&user.id) {
            Some(stored) => {
                stored.role = user.role;
                stored.has_completed_onboarding = user.has_completed_onboarding;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl ChoirRepository for InMemoryStore {
    async fn insert_choir(&self, choir: &Choir) -> anyhow::Result<()> {
        self.check()?;
        let key = choir_name_key(&choir.name);
        if self
            .state
            .lock()
            .unwrap()
            .choirs
            .values()
            .any(|c| choir_name_key(&c.name) == key)
        {
            return Err(UniqueViolation::on("choirs_name_lower_idx").into());
        }
        self.put_choir(choir);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Choir>> {
        self.check()?;
        let st = self.state.lock().unwrap();
        Ok(st.choirs.get(&id).map(|rec| st.choir(rec)))
    }

    async fn list_for_member(&self, user_id: Uuid) -> anyhow::Result<Vec<Choir>> {
        self.check()?;
        let st = self.state.lock().unwrap();
        let mut out: Vec<Choir> = st
            .choirs
            .values()
            .filter(|c| c.members.iter().any(|(uid, _)| *uid == user_id))
            .map(|rec| st.choir(rec))
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    async fn update_details(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> anyhow::Result<bool> {
        self.check()?;
        let mut st = self.state.lock().unwrap();
        let key = choir_name_key(name);
        if st
            .choirs
            .values()
            .any(|c| c.id != id && choir_name_key(&c.name) == key)
        {
            return Err(UniqueViolation::on("choirs_name_lower_idx").into());
        }
        match st.choirs.get_mut(&id) {
            Some(rec) => {
                rec.name = name.to_string();
                rec.description = description.map(str::to_string);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_choir(&self, id: Uuid) -> anyhow::Result<bool> {
        self.check()?;
        let mut st = self.state.lock().unwrap();
        st.invitations.retain(|i| i.choir_id != id);
        st.playlists.retain(|_, p| p.choir_id != id);
        Ok(st.choirs.remove(&id).is_some())
    }

    async fn add_member(
        &self,
        choir_id: Uuid,
        user_id: Uuid,
        is_admin: bool,
    ) -> anyhow::Result<()> {
        self.check()?;
        let mut st = self.state.lock().unwrap();
        let rec = st
            .choirs
            .get_mut(&choir_id)
            .ok_or_else(|| anyhow::anyhow!("choir not found"))?;
        if !rec.members.iter().any(|(uid, _)| *uid == user_id) {
            rec.members.push((user_id, is_admin));
        }
        Ok(())
    }

    async fn remove_member(&self, choir_id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        self.check()?;
        let mut st = self.state.lock().unwrap();
        let Some(rec) = st.choirs.get_mut(&choir_id) else {
            return Ok(false);
        };
        let before = rec.members.len();
        rec.members.retain(|(uid, _)| *uid != user_id);
        Ok(rec.members.len() != before)
    }

    async fn set_member_admin(
        &self,
        choir_id: Uuid,
        user_id: Uuid,
        is_admin: bool,
    ) -> anyhow::Result<bool> {
        self.check()?;
        let mut st = self.state.lock().unwrap();
        let Some(member) = st
            .choirs
            .get_mut(&choir_id)
            .and_then(|rec| rec.members.iter_mut().find(|(uid, _)| *uid == user_id))
        else {
            return Ok(false);
        };
        member.1 = is_admin;
        Ok(true)
    }

    async fn exists(&self, id: Uuid) -> anyhow::Result<bool> {
        self.check()?;
        Ok(self.state.lock().unwrap().choirs.contains_key(&id))
    }

    async fn is_member(&self, choir_id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        self.check()?;
        let st = self.state.lock().unwrap();
        Ok(st
            .choirs
            .get(&choir_id)
            .map(|c| c.members.iter().any(|(uid, _)| *uid == user_id))
            .unwrap_or(false))
    }

    async fn name_exists(&self, name: &str) -> anyhow::Result<bool> {
        self.check()?;
        let key = choir_name_key(name);
        let st = self.state.lock().unwrap();
        Ok(st.choirs.values().any(|c| choir_name_key(&c.name) == key))
    }

    async fn administers_any(&self, user_id: Uuid) -> anyhow::Result<bool> {
        self.check()?;
        let st = self.state.lock().unwrap();
        Ok(st.choirs.values().any(|c| {
            c.admin_user_id == user_id
                || c.members.iter().any(|(uid, admin)| *uid == user_id && *admin)
        }))
    }
}

#[async_trait]
impl InvitationRepository for InMemoryStore {
    async fn insert_invitation(&self, invitation: &Invitation) -> anyhow::Result<()> {
        self.check()?;
        let mut st = self.state.lock().unwrap();
        if invitation.is_pending()
            && st.invitations.iter().any(|i| {
                i.choir_id == invitation.choir_id && i.is_pending() && i.is_for(&invitation.email)
            })
        {
            return Err(UniqueViolation::on("invitations_one_pending_idx").into());
        }
        st.invitations.push(invitation.clone());
        Ok(())
    }

    async fn find_pending_by_token(&self, token: &str) -> anyhow::Result<Option<Invitation>> {
        self.check()?;
        let st = self.state.lock().unwrap();
        Ok(st
            .invitations
            .iter()
            .find(|i| i.token == token && i.is_pending())
            .cloned())
    }

    async fn accept(&self, id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        self.check()?;
        let mut st = self.state.lock().unwrap();
        let Some(inv) = st.invitations.iter_mut().find(|i| i.id == id) else {
            return Ok(false);
        };
        if !inv.accept() {
            return Ok(false);
        }
        let choir_id = inv.choir_id;
        if let Some(rec) = st.choirs.get_mut(&choir_id) {
            if !rec.members.iter().any(|(uid, _)| *uid == user_id) {
                rec.members.push((user_id, false));
            }
        }
        Ok(true)
    }

    async fn reject(&self, id: Uuid) -> anyhow::Result<bool> {
        self.check()?;
        let mut st = self.state.lock().unwrap();
        Ok(st
            .invitations
            .iter_mut()
            .find(|i| i.id == id)
            .map(|inv| inv.reject())
            .unwrap_or(false))
    }

    async fn list_pending_for_email(&self, email: &str) -> anyhow::Result<Vec<InvitationRow>> {
        self.check()?;
        let st = self.state.lock().unwrap();
        Ok(st
            .invitations
            .iter()
            .filter(|i| i.is_pending() && i.is_for(email))
            .map(|i| st.row(i))
            .collect())
    }

    async fn list_for_choir(&self, choir_id: Uuid) -> anyhow::Result<Vec<InvitationRow>> {
        self.check()?;
        let st = self.state.lock().unwrap();
        Ok(st
            .invitations
            .iter()
            .filter(|i| i.choir_id == choir_id)
            .map(|i| st.row(i))
            .collect())
    }

    async fn eligibility(
        &self,
        choir_id: Uuid,
        email: &str,
    ) -> anyhow::Result<InvitationEligibility> {
        self.check()?;
        let st = self.state.lock().unwrap();
        let Some(rec) = st.choirs.get(&choir_id) else {
            return Ok(InvitationEligibility::default());
        };
        let already_member = rec.members.iter().any(|(uid, _)| {
            st.users
                .get(uid)
                .map(|u| same_email(&u.email, email))
                .unwrap_or(false)
        });
        let pending_invitation = st
            .invitations
            .iter()
            .any(|i| i.choir_id == choir_id && i.is_pending() && i.is_for(email));
        Ok(InvitationEligibility {
            choir_exists: true,
            already_member,
            pending_invitation,
        })
    }
}

#[async_trait]
impl InviteLinkRepository for InMemoryStore {
    async fn insert_link(&self, link: &InviteLink) -> anyhow::Result<()> {
        self.check()?;
        self.state.lock().unwrap().invite_links.push(link.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<InviteLink>> {
        self.check()?;
        Ok(self.invite_link(id))
    }

    async fn find_by_token(&self, token: &str) -> anyhow::Result<Option<InviteLink>> {
        self.check()?;
        let st = self.state.lock().unwrap();
        Ok(st.invite_links.iter().find(|l| l.token == token).cloned())
    }

    async fn list_for_choir(&self, choir_id: Uuid) -> anyhow::Result<Vec<InviteLink>> {
        self.check()?;
        let st = self.state.lock().unwrap();
        let mut out: Vec<InviteLink> = st
            .invite_links
            .iter()
            .filter(|l| l.choir_id == choir_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn deactivate(&self, id: Uuid) -> anyhow::Result<bool> {
        self.check()?;
        let mut st = self.state.lock().unwrap();
        match st.invite_links.iter_mut().find(|l| l.id == id) {
            Some(link) => {
                link.deactivate();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn redeem(&self, id: Uuid, user_id: Uuid, now: DateTime<Utc>) -> anyhow::Result<bool> {
        self.check()?;
        let mut st = self.state.lock().unwrap();
        let Some(link) = st.invite_links.iter_mut().find(|l| l.id == id) else {
            return Ok(false);
        };
        if link.redeem(now).is_err() {
            return Ok(false);
        }
        let choir_id = link.choir_id;
        if let Some(rec) = st.choirs.get_mut(&choir_id) {
            if !rec.members.iter().any(|(uid, _)| *uid == user_id) {
                rec.members.push((user_id, false));
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl SongRepository for InMemoryStore {
    async fn insert_song(&self, song: &Song) -> anyhow::Result<()> {
        self.check()?;
        self.state
            .lock()
            .unwrap()
            .songs
            .insert(song.id, song.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Song>> {
        self.check()?;
        Ok(self.state.lock().unwrap().songs.get(&id).cloned())
    }

    async fn update_song(&self, song: &Song) -> anyhow::Result<bool> {
        self.check()?;
        let mut st = self.state.lock().unwrap();
        match st.songs.get_mut(&song.id) {
            Some(stored) => {
                let tags = std::mem::take(&mut stored.tags);
                *stored = song.clone();
                stored.tags = tags;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_song(&self, id: Uuid) -> anyhow::Result<bool> {
        self.check()?;
        let mut st = self.state.lock().unwrap();
        st.choir_songs.remove(&id);
        for p in st.playlists.values_mut() {
            p.songs.retain(|s| *s != id);
        }
        Ok(st.songs.remove(&id).is_some())
    }

    async fn search(&self, search: &SongSearch) -> anyhow::Result<Vec<Song>> {
        self.check()?;
        let st = self.state.lock().unwrap();
        let q = search.query.as_ref().map(|q| q.to_lowercase());
        let contains = |v: &Option<String>, q: &str| {
            v.as_ref()
                .map(|s| s.to_lowercase().contains(q))
                .unwrap_or(false)
        };
        let mut out: Vec<Song> = st
            .songs
            .values()
            .filter(|s| !st.choir_songs.contains_key(&s.id))
            .filter(|s| match &q {
                Some(q) => {
                    s.title.to_lowercase().contains(q.as_str())
                        || contains(&s.composer, q.as_str())
                        || contains(&s.arranger, q.as_str())
                }
                None => true,
            })
            .filter(|s| match &search.tag {
                Some(t) => s.has_tag(t),
                None => true,
            })
            .cloned()
            .collect();
        out.sort_by(|a, b| a.title.cmp(&b.title));
        out.truncate(search.limit.max(0) as usize);
        Ok(out)
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn list_tags(&self, filter: Option<String>) -> anyhow::Result<Vec<(String, i64)>> {
        self.check()?;
        let st = self.state.lock().unwrap();
        let mut counts: HashMap<String, i64> = HashMap::new();
        for song in st.songs.values() {
            for tag in &song.tags {
                *counts.entry(tag.name.clone()).or_default() += 1;
            }
        }
        let filter = filter.map(|f| f.to_lowercase());
        let mut out: Vec<(String, i64)> = counts
            .into_iter()
            .filter(|(name, _)| filter.as_ref().map(|f| name.contains(f.as_str())).unwrap_or(true))
            .collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(out)
    }

    async fn upsert_tag(&self, name: &str) -> anyhow::Result<Tag> {
        self.check()?;
        let mut st = self.state.lock().unwrap();
        let tag = st
            .tags
            .entry(name.to_string())
            .or_insert_with(|| Tag {
                id: Uuid::new_v4(),
                name: name.to_string(),
            })
            .clone();
        Ok(tag)
    }

    async fn attach_to_song(&self, song_id: Uuid, tag_id: Uuid) -> anyhow::Result<()> {
        self.check()?;
        let mut st = self.state.lock().unwrap();
        let tag = st
            .tags
            .values()
            .find(|t| t.id == tag_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("tag not found"))?;
        let song = st
            .songs
            .get_mut(&song_id)
            .ok_or_else(|| anyhow::anyhow!("song not found"))?;
        song.add_tag(tag);
        Ok(())
    }

    async fn detach_from_song(&self, song_id: Uuid, tag_id: Uuid) -> anyhow::Result<bool> {
        self.check()?;
        let mut st = self.state.lock().unwrap();
        let Some(song) = st.songs.get_mut(&song_id) else {
            return Ok(false);
        };
        let before = song.tags.len();
        song.tags.retain(|t| t.id != tag_id);
        Ok(song.tags.len() != before)
    }
}

#[async_trait]
impl ChoirSongRepository for InMemoryStore {
    async fn insert_choir_song(&self, song: &ChoirSong) -> anyhow::Result<()> {
        self.check()?;
        let mut st = self.state.lock().unwrap();
        st.songs.insert(song.id(), song.song.clone());
        st.choir_songs.insert(
            song.id(),
            ChoirSongMeta {
                choir_id: song.choir_id,
                key: song.key.clone(),
                notes: song.notes.clone(),
                base_song_id: song.base_song_id,
            },
        );
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<ChoirSong>> {
        self.check()?;
        Ok(self.state.lock().unwrap().choir_song(id))
    }

    async fn list_for_choir(&self, choir_id: Uuid) -> anyhow::Result<Vec<ChoirSong>> {
        self.check()?;
        let st = self.state.lock().unwrap();
        let mut out: Vec<ChoirSong> = st
            .choir_songs
            .iter()
            .filter(|(_, meta)| meta.choir_id == choir_id)
            .filter_map(|(id, _)| st.choir_song(*id))
            .collect();
        out.sort_by(|a, b| a.song.title.cmp(&b.song.title));
        Ok(out)
    }

    async fn update_choir_song(&self, song: &ChoirSong) -> anyhow::Result<bool> {
        self.check()?;
        let mut st = self.state.lock().unwrap();
        if !st.choir_songs.contains_key(&song.id()) {
            return Ok(false);
        }
        if let Some(stored) = st.songs.get_mut(&song.id()) {
            stored.title = song.song.title.clone();
            stored.composer = song.song.composer.clone();
            stored.arranger = song.song.arranger.clone();
            stored.lyrics = song.song.lyrics.clone();
        }
        if let Some(meta) = st.choir_songs.get_mut(&song.id()) {
            meta.key = song.key.clone();
            meta.notes = song.notes.clone();
        }
        Ok(true)
    }
}

#[async_trait]
impl PlaylistRepository for InMemoryStore {
    async fn insert_playlist(&self, playlist: &Playlist) -> anyhow::Result<()> {
        self.check()?;
        self.state.lock().unwrap().playlists.insert(
            playlist.id,
            PlaylistRecord {
                id: playlist.id,
                choir_id: playlist.choir_id,
                name: playlist.name.clone(),
                description: playlist.description.clone(),
                created_by: playlist.created_by.id,
                created_at: playlist.created_at,
                songs: playlist.song_ids(),
            },
        );
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Playlist>> {
        self.check()?;
        let st = self.state.lock().unwrap();
        let Some(rec) = st.playlists.get(&id) else {
            return Ok(None);
        };
        let created_by = st
            .users
            .get(&rec.created_by)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("playlist creator missing"))?;
        Ok(Some(Playlist {
            id: rec.id,
            choir_id: rec.choir_id,
            name: rec.name.clone(),
            description: rec.description.clone(),
            songs: rec
                .songs
                .iter()
                .filter_map(|sid| st.songs.get(sid).cloned())
                .collect(),
            created_by,
            created_at: rec.created_at,
        }))
    }

    async fn list_for_choir(&self, choir_id: Uuid) -> anyhow::Result<Vec<PlaylistSummaryRow>> {
        self.check()?;
        let st = self.state.lock().unwrap();
        let mut out: Vec<PlaylistSummaryRow> = st
            .playlists
            .values()
            .filter(|p| p.choir_id == choir_id)
            .map(|p| PlaylistSummaryRow {
                id: p.id,
                choir_id: p.choir_id,
                name: p.name.clone(),
                description: p.description.clone(),
                song_count: p.songs.len() as i64,
                created_by: p.created_by,
                created_at: p.created_at,
            })
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn update_details(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> anyhow::Result<bool> {
        self.check()?;
        let mut st = self.state.lock().unwrap();
        match st.playlists.get_mut(&id) {
            Some(p) => {
                p.name = name.to_string();
                p.description = description.map(str::to_string);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn replace_songs(
        &self,
        id: Uuid,
        expected: &[Uuid],
        song_ids: &[Uuid],
    ) -> anyhow::Result<bool> {
        self.check()?;
        let mut st = self.state.lock().unwrap();
        match st.playlists.get_mut(&id) {
            Some(p) if p.songs == expected => {
                p.songs = song_ids.to_vec();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_playlist(&self, id: Uuid) -> anyhow::Result<bool> {
        self.check()?;
        Ok(self.state.lock().unwrap().playlists.remove(&id).is_some())
    }
}

/// Unsigned, readable tokens for use-case tests.
pub struct StaticTokenIssuer;

impl TokenIssuer for StaticTokenIssuer {
    fn issue(&self, user: &User, role: UserRole) -> anyhow::Result<IssuedToken> {
        let expires_at = Utc::now() + chrono::Duration::hours(1);
        Ok(IssuedToken {
            access_token: format!("static|{}|{}|{}", user.id, user.email, role.as_str()),
            expires_at,
        })
    }

    fn validate(&self, token: &str) -> anyhow::Result<TokenClaims> {
        let parts: Vec<&str> = token.split('|').collect();
        let ["static", sub, email, role] = parts.as_slice() else {
            anyhow::bail!("malformed token");
        };
        let now = Utc::now().timestamp();
        Ok(TokenClaims {
            sub: sub.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            iss: "test".into(),
            aud: "test".into(),
            iat: now,
            exp: now + 3600,
        })
    }
}
