//! In-memory `ComplaintStore` adapter.
//!
//! All state lives behind a single `RwLock`. Reads share the guard and
//! mutations take it exclusively, so each operation is atomic with respect
//! to every other. The guard is never held across an `.await`.
//!
//! Complaints are stored once, keyed by id. Each user record keeps only the
//! ids of its complaints, in submission order, and a user's complaint list is
//! materialised from the primary map when the user is read.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{ComplaintStore, StoreError};
use crate::domain::{
    Complaint, ComplaintDraft, ComplaintId, DisplayName, Email, EntropyError, SecretCode, User,
    UserId,
};

/// Administrator secret used when none is configured.
pub const DEFAULT_ADMIN_SECRET: &str = "admin123";

/// Attempts made to draw an unused identifier before giving up.
const MAX_ID_ATTEMPTS: usize = 8;

struct UserRecord {
    id: UserId,
    secret: SecretCode,
    name: DisplayName,
    email: Email,
    complaints: Vec<ComplaintId>,
}

#[derive(Default)]
struct StoreState {
    users: HashMap<UserId, UserRecord>,
    emails: HashSet<Email>,
    secrets: HashMap<SecretCode, UserId>,
    complaints: HashMap<ComplaintId, Complaint>,
    creation_order: Vec<ComplaintId>,
}

impl StoreState {
    fn materialise(&self, record: &UserRecord) -> User {
        User::new(
            record.id.clone(),
            record.secret.clone(),
            record.name.clone(),
            record.email.clone(),
            self.collect(&record.complaints),
        )
    }

    fn collect(&self, ids: &[ComplaintId]) -> Vec<Complaint> {
        ids.iter()
            .filter_map(|id| self.complaints.get(id).cloned())
            .collect()
    }
}

/// Process-local store shared by every request handler.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use complaint_desk::domain::SecretCode;
/// use complaint_desk::domain::ports::ComplaintStore;
/// use complaint_desk::outbound::memory::{DEFAULT_ADMIN_SECRET, InMemoryComplaintStore};
/// use mockable::DefaultClock;
///
/// let admin = SecretCode::new(DEFAULT_ADMIN_SECRET).expect("non-empty secret");
/// let store = InMemoryComplaintStore::new(admin.clone(), Arc::new(DefaultClock));
/// assert!(store.is_admin(&admin));
/// ```
pub struct InMemoryComplaintStore {
    admin_secret: SecretCode,
    clock: Arc<dyn Clock>,
    state: RwLock<StoreState>,
}

impl InMemoryComplaintStore {
    /// Create an empty store that recognises `admin_secret` as the
    /// administrator credential and stamps complaints from `clock`.
    pub fn new(admin_secret: SecretCode, clock: Arc<dyn Clock>) -> Self {
        Self {
            admin_secret,
            clock,
            state: RwLock::new(StoreState::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, StoreError> {
        self.state
            .read()
            .map_err(|_| StoreError::unavailable("store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, StoreError> {
        self.state
            .write()
            .map_err(|_| StoreError::unavailable("store lock poisoned"))
    }

    fn insert_user(&self, name: DisplayName, email: Email) -> Result<User, StoreError> {
        let mut state = self.write()?;
        if state.emails.contains(&email) {
            return Err(StoreError::duplicate_email(email.as_ref()));
        }
        let id = draw_unused(UserId::random, |id| state.users.contains_key(id))?;
        let secret = draw_unused(SecretCode::random, |secret| {
            *secret == self.admin_secret || state.secrets.contains_key(secret)
        })?;

        let record = UserRecord {
            id: id.clone(),
            secret: secret.clone(),
            name,
            email: email.clone(),
            complaints: Vec::new(),
        };
        let user = state.materialise(&record);
        state.emails.insert(email);
        state.secrets.insert(secret, id.clone());
        state.users.insert(id, record);
        Ok(user)
    }

    fn find_by_secret(&self, secret: &SecretCode) -> Result<User, StoreError> {
        let state = self.read()?;
        let record = state
            .secrets
            .get(secret)
            .and_then(|id| state.users.get(id))
            .ok_or_else(StoreError::unknown_secret)?;
        Ok(state.materialise(record))
    }

    fn insert_complaint(
        &self,
        owner: &UserId,
        draft: ComplaintDraft,
    ) -> Result<Complaint, StoreError> {
        let mut state = self.write()?;
        if !state.users.contains_key(owner) {
            return Err(StoreError::user_not_found(owner.as_ref()));
        }
        let id = draw_unused(ComplaintId::random, |id| state.complaints.contains_key(id))?;
        let complaint = Complaint::open(id.clone(), owner.clone(), draft, self.clock.utc());

        let StoreState {
            users,
            complaints,
            creation_order,
            ..
        } = &mut *state;
        let record = users
            .get_mut(owner)
            .ok_or_else(|| StoreError::user_not_found(owner.as_ref()))?;
        record.complaints.push(id.clone());
        creation_order.push(id.clone());
        complaints.insert(id, complaint.clone());
        Ok(complaint)
    }

    fn find_complaint(&self, id: &ComplaintId) -> Result<Complaint, StoreError> {
        self.read()?
            .complaints
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::complaint_not_found(id.as_ref()))
    }

    fn complaints_of(&self, owner: &UserId) -> Result<Vec<Complaint>, StoreError> {
        let state = self.read()?;
        let record = state
            .users
            .get(owner)
            .ok_or_else(|| StoreError::user_not_found(owner.as_ref()))?;
        Ok(state.collect(&record.complaints))
    }

    fn every_complaint(&self) -> Result<Vec<Complaint>, StoreError> {
        let state = self.read()?;
        Ok(state.collect(&state.creation_order))
    }

    fn mark_resolved(&self, id: &ComplaintId) -> Result<(), StoreError> {
        let mut state = self.write()?;
        let complaint = state
            .complaints
            .get_mut(id)
            .ok_or_else(|| StoreError::complaint_not_found(id.as_ref()))?;
        complaint.resolve();
        Ok(())
    }
}

/// Draw fresh values until one is not `taken`.
fn draw_unused<T>(
    mut generate: impl FnMut() -> Result<T, EntropyError>,
    taken: impl Fn(&T) -> bool,
) -> Result<T, StoreError> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let candidate = generate().map_err(|err| StoreError::unavailable(err.to_string()))?;
        if !taken(&candidate) {
            return Ok(candidate);
        }
    }
    Err(StoreError::unavailable(
        "could not allocate an unused identifier",
    ))
}

#[async_trait]
impl ComplaintStore for InMemoryComplaintStore {
    async fn create_user(&self, name: DisplayName, email: Email) -> Result<User, StoreError> {
        let user = self.insert_user(name, email)?;
        info!(user_id = %user.id(), "user registered");
        Ok(user)
    }

    async fn authenticate(&self, secret: &SecretCode) -> Result<User, StoreError> {
        self.find_by_secret(secret)
    }

    fn is_admin(&self, secret: &SecretCode) -> bool {
        *secret == self.admin_secret
    }

    async fn create_complaint(
        &self,
        owner: &UserId,
        draft: ComplaintDraft,
    ) -> Result<Complaint, StoreError> {
        let complaint = self.insert_complaint(owner, draft)?;
        info!(
            user_id = %owner,
            complaint_id = %complaint.id(),
            "complaint submitted"
        );
        Ok(complaint)
    }

    async fn complaint(&self, id: &ComplaintId) -> Result<Complaint, StoreError> {
        self.find_complaint(id)
    }

    async fn user_complaints(&self, owner: &UserId) -> Result<Vec<Complaint>, StoreError> {
        self.complaints_of(owner)
    }

    async fn all_complaints(&self) -> Result<Vec<Complaint>, StoreError> {
        self.every_complaint()
    }

    async fn resolve_complaint(&self, id: &ComplaintId) -> Result<(), StoreError> {
        self.mark_resolved(id)?;
        debug!(complaint_id = %id, "complaint resolved");
        Ok(())
    }
}
