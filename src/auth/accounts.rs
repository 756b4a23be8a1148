//! Seeded accounts and Argon2id password verification.

use argon2::{Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version};
use password_hash::{PasswordHash, SaltString};
use thiserror::Error;

use crate::config::PasswordHashConfig;

/// Accounts available at startup: (id, username, plaintext password).
pub const DEMO_ACCOUNTS: &[(u64, &str, &str)] = &[(1, "student", "password123")];

/// Errors raised while producing password hashes.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("invalid Argon2 parameters: {0}")]
    Params(argon2::Error),

    #[error("random source unavailable: {0}")]
    Random(getrandom::Error),

    #[error("password hashing failed: {0}")]
    Hash(password_hash::Error),
}

/// A login identity. The hash is a PHC string with no public accessor.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: u64,
    pub username: String,
    password_hash: String,
}

/// Immutable set of accounts, built once at startup.
#[derive(Debug)]
pub struct AccountStore {
    accounts: Vec<Account>,
    /// Verified against when the username is unknown, so both failure paths
    /// pay for one Argon2 run.
    dummy_hash: String,
}

impl AccountStore {
    /// Hash each `(id, username, password)` seed with the given cost.
    pub fn new(seeds: &[(u64, &str, &str)], cost: &PasswordHashConfig) -> Result<Self, PasswordError> {
        let accounts = seeds
            .iter()
            .map(|(id, username, password)| {
                Ok(Account {
                    id: *id,
                    username: (*username).to_string(),
                    password_hash: hash_password(password, cost)?,
                })
            })
            .collect::<Result<Vec<_>, PasswordError>>()?;

        let dummy_hash = hash_password("not-a-real-password", cost)?;

        tracing::debug!(count = accounts.len(), "Accounts seeded");
        Ok(Self { accounts, dummy_hash })
    }

    /// Store holding [`DEMO_ACCOUNTS`].
    pub fn with_demo_accounts(cost: &PasswordHashConfig) -> Result<Self, PasswordError> {
        Self::new(DEMO_ACCOUNTS, cost)
    }

    pub fn find_by_username(&self, username: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.username == username)
    }

    pub fn find_by_id(&self, id: u64) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// Check a username/password pair.
    ///
    /// Returns `None` for an unknown user and for a wrong password alike.
    /// Always runs exactly one Argon2 verification. Blocking.
    pub fn verify_credentials(&self, username: &str, password: &str) -> Option<&Account> {
        match self.find_by_username(username) {
            Some(account) => verify_password(&account.password_hash, password).then_some(account),
            None => {
                let _ = verify_password(&self.dummy_hash, password);
                None
            }
        }
    }
}

/// Hash `password` into an Argon2id PHC string with a fresh random salt.
pub fn hash_password(password: &str, cost: &PasswordHashConfig) -> Result<String, PasswordError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(PasswordError::Random)?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(PasswordError::Hash)?;

    let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
        .map_err(PasswordError::Params)?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let phc = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(PasswordError::Hash)?
        .to_string();
    Ok(phc)
}

/// Verify `password` against a PHC string. Cost parameters come from the hash.
pub fn verify_password(phc: &str, password: &str) -> bool {
    match PasswordHash::new(phc) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
