// src/session.rs

//! Injectable session store.
//!
//! Holds the authenticated user and bearer token, persisted as a JSON file
//! under the storage directory. Constructed once in `main` and passed down
//! explicitly; nothing here is global.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, AuthApi};
use crate::error::{AppError, Result};
use crate::models::User;
use crate::utils;

/// Persisted session record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub user: User,
    pub token: String,
}

/// Session lifecycle: `init` reads persisted credentials, `login`/`register`
/// mutate and persist, `logout` clears memory, disk, and the client token.
pub struct SessionStore {
    path: PathBuf,
    current: Option<Credentials>,
}

impl SessionStore {
    /// Read persisted credentials from `path`. A corrupt file is discarded
    /// with a warning rather than surfaced as an error.
    pub fn init(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Credentials>(&content) {
                Ok(credentials) => Some(credentials),
                Err(e) => {
                    log::warn!("Discarding corrupt session file {:?}: {}", path, e);
                    let _ = fs::remove_file(&path);
                    None
                }
            },
            Err(_) => None,
        };
        Self { path, current }
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref().map(|c| &c.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Install the persisted token on the API client, if a session exists.
    pub fn restore(&self, client: &ApiClient) {
        if let Some(credentials) = &self.current {
            client.set_token(Some(credentials.token.clone()));
        }
    }

    /// Authenticate and persist the session.
    pub async fn login(&mut self, client: &ApiClient, email: &str, password: &str) -> Result<&User> {
        if !utils::is_valid_email(email) {
            return Err(AppError::validation("invalid email address"));
        }
        if password.is_empty() {
            return Err(AppError::validation("password is required"));
        }

        let response = AuthApi::new(client).login(email, password).await?;
        self.store(client, response.data, response.token)
    }

    /// Create an account and persist the resulting session.
    pub async fn register(
        &mut self,
        client: &ApiClient,
        full_name: &str,
        email: &str,
        password: &str,
        code: &str,
    ) -> Result<&User> {
        if full_name.trim().is_empty() {
            return Err(AppError::validation("full name is required"));
        }
        if !utils::is_valid_email(email) {
            return Err(AppError::validation("invalid email address"));
        }
        if password.len() < 6 {
            return Err(AppError::validation("password must be at least 6 characters"));
        }

        let response = AuthApi::new(client)
            .register(full_name, email, password, code)
            .await?;
        self.store(client, response.data, response.token)
    }

    /// Clear the session from memory, disk, and the API client.
    pub fn logout(&mut self, client: &ApiClient) -> Result<()> {
        self.current = None;
        client.set_token(None);
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    fn store(&mut self, client: &ApiClient, user: User, token: String) -> Result<&User> {
        client.set_token(Some(token.clone()));
        self.current = Some(Credentials { user, token });
        self.persist()?;
        Ok(&self.current.as_ref().expect("session just stored").user)
    }

    fn persist(&self) -> Result<()> {
        let Some(credentials) = &self.current else {
            return Ok(());
        };
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(credentials)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}
