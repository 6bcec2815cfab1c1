//! Client-side auth session store.
//!
//! One process-wide [`AuthSession`] value behind a lock, written through to a
//! [`SessionStorage`] backend on every mutation and re-read once at startup.
//! Consumers that need to react to session changes (header attachment,
//! logout-on-401, profile display) subscribe to a watch channel instead of
//! reaching into ambient global state.

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use tokio::sync::watch;

use shoplens_core::types::{AuthSession, UserProfile};

/// Startup grace delay before the persisted snapshot is read, so restoration
/// settles before any authenticated-state decision is made.
const REHYDRATE_GRACE: Duration = Duration::from_millis(50);

/// Durable backend for the auth snapshot. Absence of a stored value means
/// anonymous state.
pub trait SessionStorage: Send + Sync {
    /// # Errors
    /// Returns an I/O error if the snapshot exists but cannot be read.
    fn load(&self) -> io::Result<Option<AuthSession>>;

    /// # Errors
    /// Returns an I/O error if the snapshot cannot be written.
    fn save(&self, session: &AuthSession) -> io::Result<()>;

    /// # Errors
    /// Returns an I/O error if the snapshot cannot be removed.
    fn clear(&self) -> io::Result<()>;
}

/// JSON-file snapshot storage, one named file holding
/// `{access_token, refresh_token, user}`.
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> io::Result<Option<AuthSession>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        // A corrupt snapshot file is treated like an absent one; forcing the
        // user back to login beats failing startup.
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e,
                    "persisted session snapshot is corrupt — treating as anonymous");
                Ok(None)
            }
        }
    }

    fn save(&self, session: &AuthSession) -> io::Result<()> {
        let json = serde_json::to_string(session).map_err(io::Error::other)?;
        std::fs::write(&self.path, json)
    }

    fn clear(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// In-memory storage for tests and mock mode.
#[derive(Default)]
pub struct MemorySessionStorage {
    inner: Mutex<Option<AuthSession>>,
}

impl MemorySessionStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_snapshot(session: AuthSession) -> Self {
        Self {
            inner: Mutex::new(Some(session)),
        }
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> io::Result<Option<AuthSession>> {
        Ok(self.inner.lock().map_err(|_| poisoned())?.clone())
    }

    fn save(&self, session: &AuthSession) -> io::Result<()> {
        *self.inner.lock().map_err(|_| poisoned())? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.inner.lock().map_err(|_| poisoned())? = None;
        Ok(())
    }
}

fn poisoned() -> io::Error {
    io::Error::other("session storage lock poisoned")
}

struct SessionInner {
    state: RwLock<AuthSession>,
    storage: Box<dyn SessionStorage>,
    notifier: watch::Sender<AuthSession>,
}

/// Shared handle to the process-wide auth session.
///
/// Cheap to clone; all clones observe the same state. Writes happen only
/// from sequential user- or completion-triggered events, last write wins.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

impl SessionStore {
    #[must_use]
    pub fn new(storage: Box<dyn SessionStorage>) -> Self {
        let (notifier, _) = watch::channel(AuthSession::default());
        Self {
            inner: Arc::new(SessionInner {
                state: RwLock::new(AuthSession::default()),
                storage,
                notifier,
            }),
        }
    }

    /// Store backed by in-memory storage; nothing survives the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemorySessionStorage::new()))
    }

    /// Restores the persisted snapshot at startup.
    ///
    /// Waits a short grace delay first so a route/page decision never races
    /// the restore. A snapshot holding an access token without a user profile
    /// is corrupt state and is cleared rather than silently carried.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the snapshot exists but cannot be read, or if
    /// clearing a corrupt snapshot fails.
    pub async fn rehydrate(&self) -> io::Result<bool> {
        tokio::time::sleep(REHYDRATE_GRACE).await;

        let Some(snapshot) = self.inner.storage.load()? else {
            return Ok(false);
        };

        if snapshot.access_token.is_some() && snapshot.user.is_none() {
            tracing::warn!("stored access token has no user profile — forcing logout");
            self.inner.storage.clear()?;
            self.replace(AuthSession::default());
            return Ok(false);
        }

        let authenticated = snapshot.is_authenticated();
        self.replace(snapshot);
        Ok(authenticated)
    }

    /// Login/signup success: user and both tokens set atomically.
    ///
    /// # Errors
    /// Returns an I/O error if the write-through to storage fails.
    pub fn set_authenticated(
        &self,
        user: UserProfile,
        access_token: String,
        refresh_token: String,
    ) -> io::Result<()> {
        self.mutate(AuthSession {
            user: Some(user),
            access_token: Some(access_token),
            refresh_token: Some(refresh_token),
        })
    }

    /// Successful refresh: both tokens replaced in place, user untouched.
    ///
    /// # Errors
    /// Returns an I/O error if the write-through to storage fails.
    pub fn rotate_tokens(&self, access_token: String, refresh_token: String) -> io::Result<()> {
        let mut next = self.snapshot();
        next.access_token = Some(access_token);
        next.refresh_token = Some(refresh_token);
        self.mutate(next)
    }

    /// Logout or unrecoverable 401: back to anonymous.
    ///
    /// # Errors
    /// Returns an I/O error if removing the persisted snapshot fails.
    pub fn clear(&self) -> io::Result<()> {
        self.inner.storage.clear()?;
        self.replace(AuthSession::default());
        Ok(())
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthSession {
        self.read(AuthSession::clone)
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.read(|s| s.access_token.clone())
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.read(|s| s.refresh_token.clone())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read(AuthSession::is_authenticated)
    }

    /// Watch channel delivering every session change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthSession> {
        self.inner.notifier.subscribe()
    }

    fn read<T>(&self, f: impl FnOnce(&AuthSession) -> T) -> T {
        match self.inner.state.read() {
            Ok(guard) => f(&guard),
            // A poisoned lock means a panic mid-read elsewhere; the session
            // value itself is plain data, so fall back to its default.
            Err(_) => f(&AuthSession::default()),
        }
    }

    fn mutate(&self, next: AuthSession) -> io::Result<()> {
        self.inner.storage.save(&next)?;
        self.replace(next);
        Ok(())
    }

    fn replace(&self, next: AuthSession) {
        if let Ok(mut guard) = self.inner.state.write() {
            *guard = next.clone();
        }
        self.inner.notifier.send_replace(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: "1".into(),
            email: "owner@example.com".into(),
            first_name: "지민".into(),
            last_name: "김".into(),
            site_name: "테스트몰".into(),
            site_type: "Cafe24".into(),
            site_url: String::new(),
            timezone: String::new(),
            business_category: String::new(),
            created_at: None,
        }
    }

    #[test]
    fn login_sets_everything_atomically() {
        let store = SessionStore::in_memory();
        store
            .set_authenticated(profile(), "access".into(), "refresh".into())
            .unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.access_token().as_deref(), Some("access"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh"));
    }

    #[test]
    fn rotate_keeps_user() {
        let store = SessionStore::in_memory();
        store
            .set_authenticated(profile(), "a1".into(), "r1".into())
            .unwrap();
        store.rotate_tokens("a2".into(), "r2".into()).unwrap();
        let snapshot = store.snapshot();
        assert_eq!(snapshot.access_token.as_deref(), Some("a2"));
        assert_eq!(snapshot.refresh_token.as_deref(), Some("r2"));
        assert!(snapshot.user.is_some(), "rotation must not drop the user");
        assert!(store.is_authenticated());
    }

    #[test]
    fn clear_returns_to_anonymous() {
        let store = SessionStore::in_memory();
        store
            .set_authenticated(profile(), "a".into(), "r".into())
            .unwrap();
        store.clear().unwrap();
        assert!(!store.is_authenticated());
        assert!(store.access_token().is_none());
    }

    #[test]
    fn subscribers_see_mutations() {
        let store = SessionStore::in_memory();
        let rx = store.subscribe();
        store
            .set_authenticated(profile(), "a".into(), "r".into())
            .unwrap();
        assert!(rx.borrow().is_authenticated());
        store.clear().unwrap();
        assert!(!rx.borrow().is_authenticated());
    }

    #[tokio::test]
    async fn rehydrates_complete_snapshot_as_authenticated() {
        let snapshot = AuthSession {
            user: Some(profile()),
            access_token: Some("a".into()),
            refresh_token: Some("r".into()),
        };
        let store = SessionStore::new(Box::new(MemorySessionStorage::with_snapshot(snapshot)));
        assert!(store.rehydrate().await.unwrap());
        assert!(store.is_authenticated());
    }

    #[tokio::test]
    async fn rehydrate_clears_dangling_token() {
        let snapshot = AuthSession {
            user: None,
            access_token: Some("dangling".into()),
            refresh_token: Some("r".into()),
        };
        let storage = Box::new(MemorySessionStorage::with_snapshot(snapshot));
        let store = SessionStore::new(storage);
        assert!(!store.rehydrate().await.unwrap());
        assert!(store.access_token().is_none(), "dangling token must be dropped");
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn rehydrate_user_without_token_is_anonymous() {
        let snapshot = AuthSession {
            user: Some(profile()),
            access_token: None,
            refresh_token: None,
        };
        let store = SessionStore::new(Box::new(MemorySessionStorage::with_snapshot(snapshot)));
        assert!(!store.rehydrate().await.unwrap());
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn rehydrate_empty_storage_is_anonymous() {
        let store = SessionStore::in_memory();
        assert!(!store.rehydrate().await.unwrap());
    }

    #[tokio::test]
    async fn file_storage_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let storage = FileSessionStorage::new(path.clone());

        assert!(storage.load().unwrap().is_none(), "missing file means anonymous");

        let session = AuthSession {
            user: Some(profile()),
            access_token: Some("a".into()),
            refresh_token: Some("r".into()),
        };
        storage.save(&session).unwrap();
        let loaded = storage.load().unwrap().expect("snapshot should exist");
        assert_eq!(loaded.access_token.as_deref(), Some("a"));
        assert!(loaded.is_authenticated());

        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_none());
        storage.clear().unwrap(); // idempotent
    }

    #[tokio::test]
    async fn file_storage_tolerates_corrupt_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();
        let storage = FileSessionStorage::new(path);
        assert!(storage.load().unwrap().is_none());
    }
}
