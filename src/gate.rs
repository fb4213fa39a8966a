//!
//! # Session/authentication gate
//!
//! Every task operation passes through [`authorize`] before touching the
//! task list. The gate re-reads the stored user on every call, verifies
//! the submitted password against the stored hash, and checks the session
//! state machine: logged out, logged in, or logged in but past the
//! timeout. Expiry is handled lazily on the read path: the expired
//! session is flipped off in storage before the refusal goes out, and no
//! background timer exists.

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;

use crate::error::AppError;
use crate::models::User;
use crate::store::TaskStore;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
}

/// Outcome of checking a stored record's session fields at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCheck {
    /// Logged in and inside the validity window.
    Active,
    /// Not logged in at all.
    NotLoggedIn,
    /// Logged in on record, but the timeout instant has passed.
    Expired,
}

/// Evaluates the session state machine for a stored record at `now_ms`.
pub fn check_session(stored: &User, now_ms: i64) -> SessionCheck {
    if !stored.state {
        SessionCheck::NotLoggedIn
    } else if stored.timeout > now_ms {
        SessionCheck::Active
    } else {
        SessionCheck::Expired
    }
}

/// Runs the full gate for a submitted credential record.
///
/// Returns the stored user on success. Unknown usernames and password
/// mismatches are indistinguishable to the caller. On expiry the stored
/// state is flipped off best-effort: a persistence failure there is
/// logged and the client still sees the plain expiry refusal.
pub async fn authorize(store: &dyn TaskStore, submitted: &User) -> Result<User, AppError> {
    let stored = match store.get_user(&submitted.username).await? {
        Some(stored) => stored,
        None => return Err(AppError::Forbidden("Invalid Credentials".into())),
    };

    if !verify_password(&submitted.password, &stored.password)? {
        return Err(AppError::Forbidden("Invalid Credentials".into()));
    }

    match check_session(&stored, Utc::now().timestamp_millis()) {
        SessionCheck::Active => Ok(stored),
        SessionCheck::NotLoggedIn => Err(AppError::Forbidden("Login First".into())),
        SessionCheck::Expired => {
            if let Err(e) = store.set_user_session(&stored.username, false, 0).await {
                log::warn!(
                    "failed to persist session expiry for {}: {}",
                    stored.username,
                    e
                );
            }
            Err(AppError::Forbidden("User Login Time Expired".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn stored_user(state: bool, timeout: i64) -> User {
        User {
            username: "ann".into(),
            password: hash_password("longenough").unwrap(),
            state,
            timeout,
        }
    }

    fn submitted(password: &str) -> User {
        User {
            username: "ann".into(),
            password: password.into(),
            state: false,
            timeout: 0,
        }
    }

    #[test]
    fn test_password_hashing_and_verification() {
        let hashed = hash_password("longenough").unwrap();
        assert!(verify_password("longenough", &hashed).unwrap());
        assert!(!verify_password("wrong_password", &hashed).unwrap());
    }

    #[test]
    fn test_session_state_machine() {
        let now = Utc::now().timestamp_millis();

        let user = stored_user(false, now + 60_000);
        assert_eq!(check_session(&user, now), SessionCheck::NotLoggedIn);

        let user = stored_user(true, now + 60_000);
        assert_eq!(check_session(&user, now), SessionCheck::Active);

        let user = stored_user(true, now - 1);
        assert_eq!(check_session(&user, now), SessionCheck::Expired);

        // The boundary instant itself already counts as expired.
        let user = stored_user(true, now);
        assert_eq!(check_session(&user, now), SessionCheck::Expired);
    }

    #[actix_rt::test]
    async fn test_authorize_grants_active_sessions() {
        let store = MemoryStore::new();
        let now = Utc::now().timestamp_millis();
        store.create_user(&stored_user(true, now + 60_000)).await.unwrap();

        let user = authorize(&store, &submitted("longenough")).await.unwrap();
        assert_eq!(user.username, "ann");
    }

    #[actix_rt::test]
    async fn test_authorize_refuses_unknown_and_mismatched_credentials() {
        let store = MemoryStore::new();

        match authorize(&store, &submitted("longenough")).await {
            Err(AppError::Forbidden(msg)) => assert_eq!(msg, "Invalid Credentials"),
            other => panic!("unexpected result: {:?}", other),
        }

        let now = Utc::now().timestamp_millis();
        store.create_user(&stored_user(true, now + 60_000)).await.unwrap();
        match authorize(&store, &submitted("wrong_password")).await {
            Err(AppError::Forbidden(msg)) => assert_eq!(msg, "Invalid Credentials"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn test_authorize_requires_login() {
        let store = MemoryStore::new();
        store.create_user(&stored_user(false, 0)).await.unwrap();

        match authorize(&store, &submitted("longenough")).await {
            Err(AppError::Forbidden(msg)) => assert_eq!(msg, "Login First"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn test_expiry_flips_stored_state() {
        let store = MemoryStore::new();
        let now = Utc::now().timestamp_millis();
        store.create_user(&stored_user(true, now - 1)).await.unwrap();

        match authorize(&store, &submitted("longenough")).await {
            Err(AppError::Forbidden(msg)) => assert_eq!(msg, "User Login Time Expired"),
            other => panic!("unexpected result: {:?}", other),
        }

        let stored = store.get_user("ann").await.unwrap().unwrap();
        assert!(!stored.state);
    }
}
