use std::error::Error as StdError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeederError {
    // Configuration errors
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidEnvVar { name: String, value: String },

    // Feed errors
    #[error("Feed fetch failed: {0}")]
    Fetch(String),

    // Storage errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] postgres::Error),

    #[error("TLS setup failed: {0}")]
    Tls(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FeederError {
    /// Whether retrying the failed operation could succeed.
    ///
    /// Only connectivity-level failures qualify. A missing connection
    /// parameter, a server-side rejection, or a TLS handshake/certificate
    /// failure fails the same way every time.
    pub fn is_transient(&self) -> bool {
        match self {
            FeederError::Postgres(e) => e.as_db_error().is_none() && !caused_by_tls(e),
            FeederError::Io(e) => !caused_by_tls(e),
            _ => false,
        }
    }
}

/// Walk the source chain looking for a rustls error, including one wrapped
/// inside an `io::Error` by the TLS stream.
fn caused_by_tls(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.is::<rustls::Error>() {
            return true;
        }
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            if io.get_ref().is_some_and(|inner| inner.is::<rustls::Error>()) {
                return true;
            }
        }
        current = e.source();
    }
    false
}

pub type FeederResult<T> = Result<T, FeederError>;
