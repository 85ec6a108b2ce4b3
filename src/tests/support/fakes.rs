//! In-memory stand-ins for the outgoing ports, shared by service and route tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::auth::application::domain::entities::Session;
use crate::auth::application::ports::outgoing::{
    HashError, NewPasswordReset, NewSession, PasswordHasher, PasswordReset,
    PasswordResetRepository, PasswordResetRepositoryError, SessionRepository,
    SessionRepositoryError,
};
use crate::email::application::ports::outgoing::user_email_notifier::{
    UserEmailNotificationError, UserEmailNotifier,
};
use crate::shared::audit::AuditInfo;
use crate::shared::persistence::{Page, PageRequest};
use crate::user::application::domain::entities::{Role, User};
use crate::user::application::ports::outgoing::user_repository::{
    NewUser, UserChanges, UserRepository, UserRepositoryError,
};

pub fn sample_user(email: &str, password: &str, roles: Vec<Role>) -> User {
    User {
        id: Uuid::new_v4(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        phone_number: None,
        email: email.to_string(),
        password_hash: FakePasswordHasher::digest(password),
        roles,
        is_active: true,
        audit: AuditInfo::new(None),
    }
}

// ──── Users ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    failure: Mutex<Option<UserRepositoryError>>,
    sessions: Option<Arc<InMemorySessionRepository>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hard deletes cascade into `sessions`, like the `tokens` foreign key.
    pub fn with_sessions(sessions: Arc<InMemorySessionRepository>) -> Self {
        Self {
            sessions: Some(sessions),
            ..Self::default()
        }
    }

    pub fn insert(&self, user: User) -> User {
        self.users.lock().unwrap().push(user.clone());
        user
    }

    pub fn fail_with(&self, err: UserRepositoryError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    /// Row regardless of soft-delete state.
    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    fn check(&self) -> Result<(), UserRepositoryError> {
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn email_taken(users: &[User], email: &str, except: Option<Uuid>) -> bool {
        users
            .iter()
            .any(|u| u.audit.is_live() && u.email == email && Some(u.id) != except)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        let email = user.email.to_lowercase();

        if Self::email_taken(&users, &email, None) {
            return Err(UserRepositoryError::EmailAlreadyExists);
        }

        let created = User {
            id: Uuid::new_v4(),
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            email,
            password_hash: user.password_hash,
            roles: user.roles,
            is_active: user.is_active,
            audit: AuditInfo::new(user.creator_id),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError> {
        self.check()?;
        Ok(self.get(id).filter(|u| u.audit.is_live()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        self.check()?;
        let email = email.to_lowercase();
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.audit.is_live() && u.email == email)
            .cloned())
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, UserRepositoryError> {
        self.check()?;
        let mut live: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.audit.is_live())
            .cloned()
            .collect();
        live.sort_by(|a, b| b.audit.date_created.cmp(&a.audit.date_created));

        let total = live.len() as u64;
        let items = live
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(page.page_size() as usize)
            .collect();

        Ok(Page::new(items, total, page))
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<User, UserRepositoryError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id && u.audit.is_live())
            .ok_or(UserRepositoryError::UserNotFound)?;

        if let Some(v) = changes.first_name {
            user.first_name = v;
        }
        if let Some(v) = changes.last_name {
            user.last_name = v;
        }
        if let Some(v) = changes.phone_number {
            user.phone_number = v;
        }
        if let Some(v) = changes.roles {
            user.roles = v;
        }
        if let Some(v) = changes.is_active {
            user.is_active = v;
        }
        user.audit.date_updated = Some(Utc::now());

        Ok(user.clone())
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: String,
    ) -> Result<(), UserRepositoryError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id && u.audit.is_live())
            .ok_or(UserRepositoryError::UserNotFound)?;

        user.password_hash = password_hash;
        user.audit.date_updated = Some(Utc::now());
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), UserRepositoryError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id && u.audit.is_live())
            .ok_or(UserRepositoryError::UserNotFound)?;

        user.audit.is_delete = true;
        user.audit.date_delete = Some(Utc::now());
        Ok(())
    }

    async fn restore(&self, id: Uuid) -> Result<User, UserRepositoryError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        let email = users
            .iter()
            .find(|u| u.id == id && u.audit.is_delete)
            .map(|u| u.email.clone())
            .ok_or(UserRepositoryError::UserNotFound)?;

        if Self::email_taken(&users, &email, Some(id)) {
            return Err(UserRepositoryError::EmailAlreadyExists);
        }

        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(UserRepositoryError::UserNotFound)?;
        user.audit.is_delete = false;
        user.audit.date_delete = None;
        user.audit.date_updated = Some(Utc::now());
        Ok(user.clone())
    }

    async fn hard_delete(&self, id: Uuid) -> Result<(), UserRepositoryError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);

        if users.len() == before {
            return Err(UserRepositoryError::UserNotFound);
        }
        if let Some(sessions) = &self.sessions {
            sessions.remove_for_user(id);
        }
        Ok(())
    }

    async fn purge_deleted_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, UserRepositoryError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        let (purged, kept): (Vec<User>, Vec<User>) = users
            .drain(..)
            .partition(|u| u.audit.is_delete && u.audit.date_delete.is_some_and(|d| d < cutoff));
        *users = kept;

        if let Some(sessions) = &self.sessions {
            for user in &purged {
                sessions.remove_for_user(user.id);
            }
        }
        Ok(purged.len() as u64)
    }
}

// ──── Sessions ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Mutex<Vec<Session>>,
    failure: Mutex<Option<SessionRepositoryError>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_with(&self, err: SessionRepositoryError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    /// Every row, revoked ones included.
    pub fn all(&self) -> Vec<Session> {
        self.sessions.lock().unwrap().clone()
    }

    pub fn get(&self, id: Uuid) -> Option<Session> {
        self.all().into_iter().find(|s| s.id == id)
    }

    pub fn live_count_for(&self, user_id: Uuid) -> usize {
        self.all()
            .iter()
            .filter(|s| s.user_id == user_id && s.audit.is_live())
            .count()
    }

    pub fn remove_for_user(&self, user_id: Uuid) {
        self.sessions
            .lock()
            .unwrap()
            .retain(|s| s.user_id != user_id);
    }

    fn check(&self) -> Result<(), SessionRepositoryError> {
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn with_live<F>(&self, id: Uuid, f: F) -> Result<(), SessionRepositoryError>
    where
        F: FnOnce(&mut Session),
    {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions
            .iter_mut()
            .find(|s| s.id == id && s.audit.is_live())
            .ok_or(SessionRepositoryError::SessionNotFound)?;
        f(session);
        session.audit.date_updated = Some(Utc::now());
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: NewSession) -> Result<Session, SessionRepositoryError> {
        self.check()?;
        let created = Session {
            id: session.id,
            user_id: session.user_id,
            app_version: session.app_version,
            user_agent: session.user_agent,
            token_hash: session.token_hash,
            push_token: session.push_token,
            roles: session.roles,
            audit: AuditInfo::new(Some(session.user_id)),
        };
        self.sessions.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn find_live(&self, id: Uuid) -> Result<Option<Session>, SessionRepositoryError> {
        self.check()?;
        Ok(self.get(id).filter(|s| s.audit.is_live()))
    }

    async fn list_live_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Session>, SessionRepositoryError> {
        self.check()?;
        Ok(self
            .all()
            .into_iter()
            .filter(|s| s.user_id == user_id && s.audit.is_live())
            .collect())
    }

    async fn rotate_token(
        &self,
        id: Uuid,
        expected_hash: &str,
        new_hash: String,
    ) -> Result<(), SessionRepositoryError> {
        self.check()?;
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions
            .iter_mut()
            .find(|s| s.id == id && s.audit.is_live() && s.token_hash == expected_hash)
            .ok_or(SessionRepositoryError::TokenMismatch)?;
        session.token_hash = new_hash;
        Ok(())
    }

    async fn update_push_token(
        &self,
        id: Uuid,
        push_token: Option<String>,
    ) -> Result<(), SessionRepositoryError> {
        self.check()?;
        self.with_live(id, |s| s.push_token = push_token)
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), SessionRepositoryError> {
        self.check()?;
        self.with_live(id, |s| {
            s.audit.is_delete = true;
            s.audit.date_delete = Some(Utc::now());
        })
    }

    async fn soft_delete_for_user(&self, user_id: Uuid) -> Result<u64, SessionRepositoryError> {
        self.check()?;
        let now = Utc::now();
        let mut count = 0;
        for s in self
            .sessions
            .lock()
            .unwrap()
            .iter_mut()
            .filter(|s| s.user_id == user_id && s.audit.is_live())
        {
            s.audit.is_delete = true;
            s.audit.date_delete = Some(now);
            count += 1;
        }
        Ok(count)
    }

    async fn purge_deleted_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, SessionRepositoryError> {
        self.check()?;
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| !(s.audit.is_delete && s.audit.date_delete.is_some_and(|d| d < cutoff)));
        Ok((before - sessions.len()) as u64)
    }
}

// ──── Password resets ───────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryPasswordResetRepository {
    resets: Mutex<Vec<PasswordReset>>,
    failure: Mutex<Option<PasswordResetRepositoryError>>,
}

impl InMemoryPasswordResetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_with(&self, err: PasswordResetRepositoryError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn all(&self) -> Vec<PasswordReset> {
        self.resets.lock().unwrap().clone()
    }

    pub fn get(&self, id: Uuid) -> Option<PasswordReset> {
        self.all().into_iter().find(|r| r.id == id)
    }

    /// Moves the expiry, e.g. into the past.
    pub fn set_expires_at(&self, id: Uuid, expires_at: DateTime<Utc>) {
        if let Some(r) = self.resets.lock().unwrap().iter_mut().find(|r| r.id == id) {
            r.expires_at = expires_at;
        }
    }

    fn check(&self) -> Result<(), PasswordResetRepositoryError> {
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PasswordResetRepository for InMemoryPasswordResetRepository {
    async fn create(
        &self,
        reset: NewPasswordReset,
    ) -> Result<PasswordReset, PasswordResetRepositoryError> {
        self.check()?;
        let created = PasswordReset {
            id: reset.id,
            user_id: reset.user_id,
            code_hash: reset.code_hash,
            attempts: 0,
            expires_at: reset.expires_at,
            consumed_at: None,
            date_created: Utc::now(),
        };
        self.resets.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn register_attempt(
        &self,
        id: Uuid,
        max_attempts: i32,
        now: DateTime<Utc>,
    ) -> Result<Option<PasswordReset>, PasswordResetRepositoryError> {
        self.check()?;
        let mut resets = self.resets.lock().unwrap();
        Ok(resets
            .iter_mut()
            .find(|r| {
                r.id == id
                    && r.consumed_at.is_none()
                    && r.expires_at > now
                    && r.attempts < max_attempts
            })
            .map(|r| {
                r.attempts += 1;
                r.clone()
            }))
    }

    async fn consume(&self, id: Uuid) -> Result<bool, PasswordResetRepositoryError> {
        self.check()?;
        let mut resets = self.resets.lock().unwrap();
        match resets
            .iter_mut()
            .find(|r| r.id == id && r.consumed_at.is_none())
        {
            Some(r) => {
                r.consumed_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn consume_all_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<u64, PasswordResetRepositoryError> {
        self.check()?;
        let now = Utc::now();
        let mut count = 0;
        for r in self
            .resets
            .lock()
            .unwrap()
            .iter_mut()
            .filter(|r| r.user_id == user_id && r.consumed_at.is_none())
        {
            r.consumed_at = Some(now);
            count += 1;
        }
        Ok(count)
    }

    async fn purge_expired_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, PasswordResetRepositoryError> {
        self.check()?;
        let mut resets = self.resets.lock().unwrap();
        let before = resets.len();
        resets.retain(|r| r.expires_at >= cutoff);
        Ok((before - resets.len()) as u64)
    }
}

// ──── Hashing ───────────────────────────────────────────────────────────

/// Reversible "hash" so tests can run without Argon2's cost.
#[derive(Default)]
pub struct FakePasswordHasher {
    pub fail: bool,
}

impl FakePasswordHasher {
    pub fn digest(password: &str) -> String {
        format!("hashed:{}", password)
    }

    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl PasswordHasher for FakePasswordHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        if self.fail {
            return Err(HashError::HashFailed);
        }
        Ok(Self::digest(password))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        if self.fail {
            return Err(HashError::VerifyFailed);
        }
        Ok(Self::digest(password) == hash)
    }
}

// ──── Email ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum SentEmail {
    Welcome { to: String, full_name: String },
    ResetCode { to: String, code: String },
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentEmail>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_reset_code(&self) -> Option<String> {
        self.sent().into_iter().rev().find_map(|e| match e {
            SentEmail::ResetCode { code, .. } => Some(code),
            _ => None,
        })
    }
}

#[async_trait]
impl UserEmailNotifier for RecordingNotifier {
    async fn send_welcome(
        &self,
        to: &str,
        full_name: &str,
    ) -> Result<(), UserEmailNotificationError> {
        if self.fail {
            return Err(UserEmailNotificationError::EmailSendingFailed(
                "smtp down".to_string(),
            ));
        }
        self.sent.lock().unwrap().push(SentEmail::Welcome {
            to: to.to_string(),
            full_name: full_name.to_string(),
        });
        Ok(())
    }

    async fn send_password_reset_code(
        &self,
        to: &str,
        _full_name: &str,
        code: &str,
        _expires_in_minutes: i64,
    ) -> Result<(), UserEmailNotificationError> {
        if self.fail {
            return Err(UserEmailNotificationError::EmailSendingFailed(
                "smtp down".to_string(),
            ));
        }
        self.sent.lock().unwrap().push(SentEmail::ResetCode {
            to: to.to_string(),
            code: code.to_string(),
        });
        Ok(())
    }
}
