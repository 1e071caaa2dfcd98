//! In-memory user directory
//!
//! Used by tests and local experimentation in place of [`crate::PgUserDirectory`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use codecamp_common::{hash_secret_with_iterations, RepositoryError};

use crate::directory::UserDirectory;
use crate::types::{CampUser, StoredCredentials};

/// PBKDF2 rounds for in-memory accounts; the count is stored in each hash
const MEMORY_HASH_ITERATIONS: u32 = 1_000;

#[derive(Debug, Clone)]
struct Account {
    user: CampUser,
    password_hash: Option<String>,
}

/// In-memory user directory
#[derive(Debug, Clone, Default)]
pub struct MemoryUserDirectory {
    accounts: Arc<Mutex<HashMap<String, Account>>>,
    fail_lookups: Arc<AtomicBool>,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account without a password
    pub fn insert(&self, user: CampUser) {
        self.accounts.lock().unwrap().insert(
            user.user_name.clone(),
            Account {
                user,
                password_hash: None,
            },
        );
    }

    /// Register an account that can sign in with `password`
    pub fn insert_with_password(&self, user: CampUser, password: &str) {
        let password_hash = hash_secret_with_iterations(password, MEMORY_HASH_ITERATIONS).ok();
        self.accounts.lock().unwrap().insert(
            user.user_name.clone(),
            Account {
                user,
                password_hash,
            },
        );
    }

    /// Make every subsequent lookup fail as if the backing store were down
    pub fn fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(RepositoryError::InvalidData(
                "user directory unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find_by_name(&self, user_name: &str) -> Result<Option<CampUser>, RepositoryError> {
        self.check_available()?;
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.get(user_name).map(|a| a.user.clone()))
    }

    async fn find_credentials(
        &self,
        user_name: &str,
    ) -> Result<Option<StoredCredentials>, RepositoryError> {
        self.check_available()?;
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.get(user_name).and_then(|a| {
            a.password_hash.as_ref().map(|hash| StoredCredentials {
                user_name: a.user.user_name.clone(),
                password_hash: hash.clone(),
            })
        }))
    }
}
