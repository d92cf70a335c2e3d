use chrono::Utc;
use redb::{Database, ReadableTable};

use crate::db::{tables, Db, BINCODE_CONFIG};
use crate::error::Result;
use crate::models::UserRecord;
use crate::security::{hash_password, verify_password};

/// Registered users, one redb row per username
#[derive(Clone)]
pub struct UserStore {
    db: Db,
}

impl UserStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Look up a user, reading straight from the database
    pub async fn find(&self, username: &str) -> Result<Option<UserRecord>> {
        let db = self.db.clone();
        let username = username.to_string();

        tokio::task::spawn_blocking(move || read_record(&db, &username)).await?
    }

    /// Check a password against the stored hash
    ///
    /// The lookup and the PBKDF2 check both run on the blocking pool.
    /// Returns `false` for unknown users.
    pub async fn verify(&self, username: &str, password: &str) -> Result<bool> {
        let db = self.db.clone();
        let username = username.to_string();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || -> Result<bool> {
            let verified = read_record(&db, &username)?.is_some_and(|record| {
                verify_password(&password, &record.password_hash, &record.salt)
            });
            Ok(verified)
        })
        .await?
    }

    /// Create a user unless the name is taken
    ///
    /// The existence check and the insert share one write transaction.
    /// Returns `false` when the username already exists.
    pub async fn create(&self, username: &str, password: &str) -> Result<bool> {
        let db = self.db.clone();
        let username = username.to_string();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || -> Result<bool> {
            let (password_hash, salt) = hash_password(&password);

            let write_txn = db.begin_write()?;
            {
                let mut table = write_txn.open_table(tables::USERS)?;

                if table.get(username.as_str())?.is_some() {
                    tracing::info!("User already exists: {}", username);
                    return Ok(false);
                }

                let record = UserRecord {
                    password_hash,
                    salt,
                    created_at: Utc::now().timestamp(),
                };
                let bytes = bincode::serde::encode_to_vec(&record, BINCODE_CONFIG)?;
                table.insert(username.as_str(), bytes.as_slice())?;
            }
            write_txn.commit()?;

            tracing::info!("New user registered: {}", username);
            Ok(true)
        })
        .await?
    }
}

fn read_record(db: &Database, username: &str) -> Result<Option<UserRecord>> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(tables::USERS)?;

    let record = table
        .get(username)?
        .map(|bytes| {
            bincode::serde::decode_from_slice::<UserRecord, _>(bytes.value(), BINCODE_CONFIG)
        })
        .transpose()?
        .map(|(record, _)| record);

    Ok(record)
}
