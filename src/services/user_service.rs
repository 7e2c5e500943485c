use bcrypt::{hash, verify, DEFAULT_COST};
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::{Collection, Database};

use super::error::ServiceError;
use crate::metrics::USERS_CREATED_TOTAL;
use crate::models::User;

/// Resolves and creates user accounts. Two explicit entry points: messaging
/// id (`resolve_or_create_by_tg`) and email credentials (`register_by_email`).
pub struct UserService {
    mongo: Database,
}

impl UserService {
    pub fn new(mongo: Database) -> Self {
        Self { mongo }
    }

    fn users(&self) -> Collection<User> {
        self.mongo.collection::<User>("users")
    }

    pub async fn find_by_tg(&self, tg_id: i64) -> Result<Option<User>, ServiceError> {
        Ok(self.users().find_one(doc! { "tg_id": tg_id }).await?)
    }

    /// Returns the user with this messaging id, creating it on first contact.
    ///
    /// Two concurrent first resolutions both pass the lookup and race the
    /// insert; the unique sparse index rejects the loser with a duplicate-key
    /// error, which is retried as a lookup so exactly one row survives.
    pub async fn resolve_or_create_by_tg(&self, tg_id: i64) -> Result<User, ServiceError> {
        let users = self.users();

        if let Some(user) = users.find_one(doc! { "tg_id": tg_id }).await? {
            return Ok(user);
        }

        let user = User::new_telegram(tg_id);
        match users.insert_one(&user).await {
            Ok(_) => {
                USERS_CREATED_TOTAL.with_label_values(&["telegram"]).inc();
                tracing::info!(tg_id, "Created user on first resolution");
                Ok(user)
            }
            Err(err) if is_duplicate_key(&err) => {
                tracing::debug!(tg_id, "Lost user creation race, re-reading winner");
                users
                    .find_one(doc! { "tg_id": tg_id })
                    .await?
                    .ok_or(ServiceError::Database(err))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Registers an email account with a bcrypt password hash. A duplicate
    /// email signals AlreadyExists, whether caught by the pre-check or by the
    /// unique index under a concurrent registration.
    pub async fn register_by_email(
        &self,
        email: &str,
        password: &str,
        name: Option<String>,
    ) -> Result<User, ServiceError> {
        let users = self.users();

        if users.find_one(doc! { "email": email }).await?.is_some() {
            return Err(ServiceError::AlreadyExists);
        }

        let password_hash = hash(password, DEFAULT_COST)?;
        let user = User::new_email(email, password_hash, name);

        match users.insert_one(&user).await {
            Ok(_) => {
                USERS_CREATED_TOTAL.with_label_values(&["email"]).inc();
                tracing::info!(email, "Registered email user");
                Ok(user)
            }
            Err(err) if is_duplicate_key(&err) => Err(ServiceError::AlreadyExists),
            Err(err) => Err(err.into()),
        }
    }

    /// Verifies email credentials. Unknown email, an account without a
    /// password hash (tg-only account) and a failed bcrypt check all collapse
    /// into the same Unauthenticated outcome.
    pub async fn check_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<User, ServiceError> {
        let user = self
            .users()
            .find_one(doc! { "email": email })
            .await?
            .ok_or(ServiceError::Unauthenticated)?;

        let password_hash = user
            .password_hash
            .as_deref()
            .ok_or(ServiceError::Unauthenticated)?;

        if verify(password, password_hash)? {
            Ok(user)
        } else {
            tracing::warn!(email, "Failed login attempt: invalid password");
            Err(ServiceError::Unauthenticated)
        }
    }
}

/// MongoDB duplicate-key write error (code 11000), raised by the unique
/// sparse indexes on tg_id and email.
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref write_error)) if write_error.code == 11000
    )
}
