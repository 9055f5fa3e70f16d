use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::mapping::{ConstraintViolation, MappingError};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Db(#[from] DieselError),

    #[error("Connection error: {0}")]
    Connection(#[from] diesel::ConnectionError),

    #[error("Pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("Migration error: {0}")]
    Migration(#[from] diesel::migration::RunMigrationsError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Invalid URI: {0}")]
    Uri(#[from] url::ParseError),

    #[error(transparent)]
    Constraint(#[from] ConstraintViolation),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Grant filter needs at least one criterion")]
    EmptyFilter,

    #[error("Database schema differs from the model in {0} places")]
    SchemaDrift(usize),

    #[error("Lifetime of {0} seconds is out of range")]
    InvalidLifetime(i64),
}

impl Error {
    fn database_error_kind(&self) -> Option<&DatabaseErrorKind> {
        match self {
            Error::Db(DieselError::DatabaseError(kind, _)) => Some(kind),
            _ => None,
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self.database_error_kind(),
            Some(DatabaseErrorKind::UniqueViolation)
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self.database_error_kind(),
            Some(DatabaseErrorKind::ForeignKeyViolation)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_) | Error::Db(DieselError::NotFound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_missing_rows() {
        assert!(Error::NotFound("client").is_not_found());
        assert!(Error::from(DieselError::NotFound).is_not_found());
        assert!(!Error::EmptyFilter.is_not_found());
        assert!(!Error::EmptyFilter.is_unique_violation());
    }

    #[test]
    fn classifies_database_violations() {
        let foreign_key = Error::from(DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new("insert violates foreign key constraint".to_string()),
        ));
        assert!(foreign_key.is_foreign_key_violation());
        assert!(!foreign_key.is_unique_violation());

        let unique = Error::from(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value".to_string()),
        ));
        assert!(unique.is_unique_violation());
        assert!(!unique.is_foreign_key_violation());
        assert!(!Error::InvalidLifetime(i64::MAX).is_foreign_key_violation());
    }

    #[test]
    fn constraint_violations_keep_their_message() {
        let error = Error::from(ConstraintViolation::Required {
            table: "Clients".to_string(),
            column: "ClientId".to_string(),
        });
        assert_eq!(error.to_string(), "Clients.ClientId is required");
    }
}
