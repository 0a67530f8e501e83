//! # Session Token Store
//!
//! Holds the credential pair for the signed-in user.
//!
//! ## Token Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Credential Lifecycle                               │
//! │                                                                         │
//! │   Anonymous ──── login ────► Authenticated ──── logout ────► Anonymous  │
//! │       ▲      (store both)         │         (clear both)                │
//! │       │                           │                                     │
//! │       │                     401 + refresh OK                            │
//! │       │                     (replace access) ──► still Authenticated    │
//! │       │                           │                                     │
//! │       └────── refresh failed ─────┘                                     │
//! │              (clear both)                                               │
//! │                                                                         │
//! │  Exactly one (access, refresh) pair exists at a time. Both tokens are  │
//! │  written together at login and destroyed together; only the access     │
//! │  token is replaced on refresh.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store is injected into [`crate::client::ApiClient`] by the
//! composition root: tests use [`MemoryTokenStore`], long-lived processes
//! can use [`FileTokenStore`] to survive restarts.

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};

/// Storage key for the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Storage key for the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

// =============================================================================
// Token Store Trait
// =============================================================================

/// Abstraction over where the credential pair lives.
///
/// All methods are synchronous: reads happen before every request and writes
/// only on login, refresh, and logout, so contention is negligible.
pub trait TokenStore: Send + Sync {
    /// The current access token, if any.
    fn access_token(&self) -> Option<String>;

    /// The current refresh token, if any.
    fn refresh_token(&self) -> Option<String>;

    /// Stores a fresh credential pair. Both tokens are written together:
    /// a failed login never leaves a half-written session behind.
    fn store_pair(&self, access: &str, refresh: &str);

    /// Replaces only the access token (after a successful refresh).
    fn replace_access(&self, access: &str);

    /// Destroys both tokens (logout, or irrecoverable refresh failure).
    fn clear(&self);
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// Serialized shape of the credential pair, shared by both store flavors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredTokens {
    #[serde(rename = "access_token", skip_serializing_if = "Option::is_none")]
    access: Option<String>,
    #[serde(rename = "refresh_token", skip_serializing_if = "Option::is_none")]
    refresh: Option<String>,
}

/// Token store that lives only as long as the process.
///
/// The default choice for tests and for embedders that manage their own
/// persistence.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<StoredTokens>,
}

impl MemoryTokenStore {
    /// Creates an empty store (anonymous session).
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn access_token(&self) -> Option<String> {
        self.tokens.read().expect("token store poisoned").access.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.tokens.read().expect("token store poisoned").refresh.clone()
    }

    fn store_pair(&self, access: &str, refresh: &str) {
        let mut guard = self.tokens.write().expect("token store poisoned");
        *guard = StoredTokens {
            access: Some(access.to_string()),
            refresh: Some(refresh.to_string()),
        };
    }

    fn replace_access(&self, access: &str) {
        let mut guard = self.tokens.write().expect("token store poisoned");
        guard.access = Some(access.to_string());
    }

    fn clear(&self) {
        let mut guard = self.tokens.write().expect("token store poisoned");
        *guard = StoredTokens::default();
    }
}

// =============================================================================
// File-Backed Store
// =============================================================================

/// Token store persisted as TOML, for sessions that survive restarts.
///
/// ## File Format
/// ```toml
/// access_token = "eyJhbGciOi..."
/// refresh_token = "eyJhbGciOi..."
/// ```
///
/// Reads are served from an in-memory copy; every write goes through to
/// disk. A persistence failure is logged and does not fail the auth flow:
/// the in-memory copy stays authoritative for this process.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    tokens: RwLock<StoredTokens>,
}

impl FileTokenStore {
    /// Opens (or initializes) a store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let tokens = match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                warn!(?path, error = %e, "Token file unreadable, starting anonymous");
                StoredTokens::default()
            }),
            Err(_) => StoredTokens::default(),
        };

        FileTokenStore {
            path,
            tokens: RwLock::new(tokens),
        }
    }

    /// Opens the store at the platform config dir
    /// (e.g. `~/.config/clinicdesk/tokens.toml` on Linux).
    pub fn open_default() -> ApiResult<Self> {
        let dirs = directories::ProjectDirs::from("com", "clinicdesk", "clinicdesk")
            .ok_or_else(|| ApiError::Config("No home directory available".to_string()))?;
        Ok(Self::at(dirs.config_dir().join("tokens.toml")))
    }

    /// The path this store persists to.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn persist(&self, tokens: &StoredTokens) {
        let result = (|| -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = toml::to_string_pretty(tokens)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            std::fs::write(&self.path, contents)
        })();

        match result {
            Ok(()) => debug!(path = ?self.path, "Tokens persisted"),
            Err(e) => warn!(path = ?self.path, error = %e, "Failed to persist tokens"),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn access_token(&self) -> Option<String> {
        self.tokens.read().expect("token store poisoned").access.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.tokens.read().expect("token store poisoned").refresh.clone()
    }

    fn store_pair(&self, access: &str, refresh: &str) {
        let mut guard = self.tokens.write().expect("token store poisoned");
        *guard = StoredTokens {
            access: Some(access.to_string()),
            refresh: Some(refresh.to_string()),
        };
        self.persist(&guard);
    }

    fn replace_access(&self, access: &str) {
        let mut guard = self.tokens.write().expect("token store poisoned");
        guard.access = Some(access.to_string());
        self.persist(&guard);
    }

    fn clear(&self) {
        let mut guard = self.tokens.write().expect("token store poisoned");
        *guard = StoredTokens::default();
        self.persist(&guard);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
