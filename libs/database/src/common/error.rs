use thiserror::Error;

/// Failures while connecting, migrating or probing the database.
///
/// Query errors stay as `sea_orm::DbErr` inside the domain repositories; this
/// type only covers pool lifecycle.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Migration error: {0}")]
    MigrationError(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_keep_the_cause() {
        let err = DatabaseError::MigrationError("relation \"sales\" already exists".into());
        assert_eq!(
            err.to_string(),
            "Migration error: relation \"sales\" already exists"
        );
    }
}
