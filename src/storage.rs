// =============================================================================
// In-Memory Storage — users and sessions
// =============================================================================
//
// Both stores live for the lifetime of the process; nothing is persisted.
// Passwords are hashed with HMAC-SHA256 keyed by a per-user random salt and
// stored as `salt$digest` hex. Hash comparison is constant time.

use std::collections::HashMap;

use hmac::{Hmac, Mac};
use parking_lot::RwLock;
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// A registered user.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
}

// =============================================================================
// Password hashing
// =============================================================================

fn digest(salt: &[u8], password: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(salt).expect("HMAC accepts any key size");
    mac.update(password.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4();
    let salt_hex = hex::encode(salt.as_bytes());
    let hash = digest(salt.as_bytes(), password);
    format!("{salt_hex}${hash}")
}

/// Compare two byte slices in constant time. The comparison examines every
/// byte of both slices even when a mismatch is found early.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

// =============================================================================
// User store
// =============================================================================

/// In-memory user store keyed by id. Username lookup is a linear scan; the
/// store holds at most a handful of users per process.
#[derive(Default)]
pub struct MemStorage {
    users: RwLock<HashMap<String, User>>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_user(&self, id: &str) -> Option<User> {
        self.users.read().get(id).cloned()
    }

    pub fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .read()
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    /// Create a user with a fresh id and a salted password hash.
    ///
    /// Uniqueness of `username` is the caller's responsibility; the store
    /// itself does not reject duplicates.
    pub fn create_user(&self, username: &str, password: &str) -> User {
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password_hash: hash_password(password),
        };
        self.users.write().insert(user.id.clone(), user.clone());
        user
    }

    /// Check `plain` against a stored `salt$digest` hash.
    pub fn verify_password(&self, plain: &str, stored: &str) -> bool {
        let Some((salt_hex, expected)) = stored.split_once('$') else {
            return false;
        };
        let Ok(salt) = hex::decode(salt_hex) else {
            return false;
        };
        let computed = digest(&salt, plain);
        constant_time_eq(computed.as_bytes(), expected.as_bytes())
    }
}

// =============================================================================
// Session store
// =============================================================================

/// Maps opaque session tokens to user ids.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a session for `user_id` and return the token.
    pub fn create(&self, user_id: &str) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.sessions
            .write()
            .insert(token.clone(), user_id.to_string());
        token
    }

    /// Resolve a token to its user id.
    pub fn user_id(&self, token: &str) -> Option<String> {
        self.sessions.read().get(token).cloned()
    }

    /// Destroy a session. Unknown tokens are a no-op.
    pub fn destroy(&self, token: &str) {
        self.sessions.write().remove(token);
    }
}

// =============================================================================
// Tests
// =============================================================================
