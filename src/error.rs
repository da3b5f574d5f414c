use sea_orm::{DbErr, SqlErr};
use std::fmt;

/// Which membership secret was being generated when entropy failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKind {
    AuthToken,
    RoundTicket,
    WatchToken,
    AesKey,
}

impl SecretKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthToken => "authtoken",
            Self::RoundTicket => "roundticket",
            Self::WatchToken => "watchtoken",
            Self::AesKey => "aeskey",
        }
    }
}

impl fmt::Display for SecretKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse classification of a [`RoundError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The store could not be reached or no connection was available
    Connectivity,
    /// A unique or foreign key constraint rejected the statement
    Constraint,
    /// Any other statement or decoding failure
    Query,
    /// Secret generation failed before anything was written
    Secret,
}

/// Error returned by every repository operation
#[derive(Debug)]
pub enum RoundError {
    /// Database operation failed
    Database(DbErr),
    /// Generating a membership secret failed
    Secret {
        secret: SecretKind,
        source: rand::Error,
    },
}

impl RoundError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Database(DbErr::Conn(_) | DbErr::ConnectionAcquire(_)) => ErrorKind::Connectivity,
            Self::Database(err) => match err.sql_err() {
                Some(
                    SqlErr::UniqueConstraintViolation(_) | SqlErr::ForeignKeyConstraintViolation(_),
                ) => ErrorKind::Constraint,
                _ => ErrorKind::Query,
            },
            Self::Secret { .. } => ErrorKind::Secret,
        }
    }
}

impl fmt::Display for RoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Database(err) => write!(f, "Database error: {err}"),
            Self::Secret { secret, source } => {
                write!(f, "Failed to generate {secret}: {source}")
            }
        }
    }
}

impl std::error::Error for RoundError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Database(err) => Some(err),
            Self::Secret { source, .. } => Some(source),
        }
    }
}

/// Convert `SeaORM` database errors to `RoundError`
impl From<DbErr> for RoundError {
    fn from(err: DbErr) -> Self {
        Self::Database(err)
    }
}
