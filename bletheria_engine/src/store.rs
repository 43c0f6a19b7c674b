//! Player accounts and saved progress.
//!
//! The engine talks to persistence only through [`PlayerStore`], and only at
//! session boundaries: once during setup (login / register / restore) and once on
//! exit (save). [`RonStore`] keeps every account and saved state in a single RON
//! file. Passwords are kept only as SHA-256 hex digests.

use crate::player::Player;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures reported by a [`PlayerStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("the name '{0}' is already taken")]
    DuplicateUser(String),
    #[error("no adventurer named '{0}' is registered")]
    UnknownUser(String),
    #[error("wrong password for '{0}'")]
    BadPassword(String),
    #[error("'{0}' has no account to save progress to")]
    NotRegistered(String),
    #[error("accessing store file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parsing store file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("serializing store: {0}")]
    Serialize(#[from] ron::Error),
}

/// Saved progress for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub current_room: String,
    pub inventory_csv: String,
    pub attribute: String,
}
impl PlayerState {
    /// Snapshot the parts of a player that survive between sessions.
    pub fn from_player(player: &Player) -> Self {
        Self {
            current_room: player.current_room.clone(),
            inventory_csv: player.inventory_csv(),
            attribute: player.attribute.to_string(),
        }
    }
}

/// Account and save-state service consumed by setup and the exit handler.
pub trait PlayerStore {
    /// Create an account and return its user id.
    ///
    /// # Errors
    /// `DuplicateUser` if the name is taken, or a storage error.
    fn register_user(&mut self, username: &str, password: &str) -> Result<i64, StoreError>;

    /// Check credentials and return the account's user id.
    ///
    /// # Errors
    /// `UnknownUser` or `BadPassword` on a failed login, or a storage error.
    fn authenticate_user(&self, username: &str, password: &str) -> Result<i64, StoreError>;

    /// Insert or replace the saved state for the player's account.
    ///
    /// # Errors
    /// `NotRegistered` if the player has no user id, or a storage error.
    fn save_player_state(&mut self, player: &Player) -> Result<(), StoreError>;

    /// Saved state for an account, if any was ever saved.
    ///
    /// # Errors
    /// Returns a storage error if the state can't be read.
    fn load_player_state(&self, user_id: i64) -> Result<Option<PlayerState>, StoreError>;
}

/// One-way hash applied to passwords before they are stored or compared.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct UserRecord {
    user_id: i64,
    username: String,
    password_hash: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    next_user_id: i64,
    users: Vec<UserRecord>,
    states: BTreeMap<i64, PlayerState>,
}

/// File-backed [`PlayerStore`]. Every change is written through to disk immediately.
#[derive(Debug)]
pub struct RonStore {
    path: PathBuf,
    data: StoreData,
}
impl RonStore {
    /// Open the store at `path`, creating an empty store file if none exists.
    ///
    /// # Errors
    /// Returns an error if the file can't be read, parsed, or created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            let data = ron::from_str::<StoreData>(&raw).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?;
            info!("opened player store '{}' ({} accounts)", path.display(), data.users.len());
            Ok(Self { path, data })
        } else {
            let store = Self {
                path,
                data: StoreData::default(),
            };
            store.persist()?;
            info!("created new player store '{}'", store.path.display());
            Ok(store)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn account_count(&self) -> usize {
        self.data.users.len()
    }

    fn find_user(&self, username: &str) -> Option<&UserRecord> {
        self.data.users.iter().find(|user| user.username == username)
    }

    /// Write the whole store to disk.
    fn persist(&self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        let text = ron::ser::to_string_pretty(&self.data, ron::ser::PrettyConfig::default())?;
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        fs::write(&self.path, text).map_err(io_err)
    }
}

impl PlayerStore for RonStore {
    fn register_user(&mut self, username: &str, password: &str) -> Result<i64, StoreError> {
        if self.find_user(username).is_some() {
            return Err(StoreError::DuplicateUser(username.to_string()));
        }
        let previous_id = self.data.next_user_id;
        let user_id = previous_id + 1;
        self.data.next_user_id = user_id;
        self.data.users.push(UserRecord {
            user_id,
            username: username.to_string(),
            password_hash: hash_password(password),
        });

        if let Err(e) = self.persist() {
            // leave memory in step with the file
            self.data.users.pop();
            self.data.next_user_id = previous_id;
            return Err(e);
        }
        info!("registered '{username}' as user {user_id}");
        Ok(user_id)
    }

    fn authenticate_user(&self, username: &str, password: &str) -> Result<i64, StoreError> {
        let user = self
            .find_user(username)
            .ok_or_else(|| StoreError::UnknownUser(username.to_string()))?;
        if user.password_hash == hash_password(password) {
            info!("'{username}' logged in as user {}", user.user_id);
            Ok(user.user_id)
        } else {
            warn!("failed login attempt for '{username}'");
            Err(StoreError::BadPassword(username.to_string()))
        }
    }

    fn save_player_state(&mut self, player: &Player) -> Result<(), StoreError> {
        let user_id = player
            .user_id
            .ok_or_else(|| StoreError::NotRegistered(player.name.clone()))?;
        let previous = self.data.states.insert(user_id, PlayerState::from_player(player));
        if let Err(e) = self.persist() {
            match previous {
                Some(state) => self.data.states.insert(user_id, state),
                None => self.data.states.remove(&user_id),
            };
            return Err(e);
        }
        info!("saved progress for user {user_id} in '{}'", player.current_room);
        Ok(())
    }

    fn load_player_state(&self, user_id: i64) -> Result<Option<PlayerState>, StoreError> {
        Ok(self.data.states.get(&user_id).cloned())
    }
}
