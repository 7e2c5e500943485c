use thiserror::Error;

/// Outcome taxonomy shared by the domain services. The HTTP layer maps each
/// variant to a response status; no variant is fatal to the process, every
/// failure is scoped to the single request that produced it.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("email is already registered")]
    AlreadyExists,

    #[error("invalid credentials")]
    Unauthenticated,

    #[error("password hash error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error(transparent)]
    Database(#[from] mongodb::error::Error),
}
