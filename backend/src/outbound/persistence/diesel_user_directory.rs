//! PostgreSQL-backed [`UserDirectory`] using Diesel.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{Email, UserId};

use super::models::NewUserRow;
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel adapter for the user directory. Logins resolve to an existing user
/// by email or create one on first sight.
#[derive(Clone)]
pub struct DieselUserDirectory {
    pool: DbPool,
}

impl DieselUserDirectory {
    /// Create the directory with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(err: PoolError) -> UserDirectoryError {
    UserDirectoryError::connection(err.to_string())
}

fn map_diesel_error(err: diesel::result::Error) -> UserDirectoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match err {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            debug!(message = info.message(), "database connection closed");
            UserDirectoryError::connection("database connection error")
        }
        other => {
            debug!(error = %other, "diesel operation failed");
            UserDirectoryError::query("database error")
        }
    }
}

fn is_unique_violation(err: &diesel::result::Error) -> bool {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    matches!(
        err,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

#[async_trait]
impl UserDirectory for DieselUserDirectory {
    async fn find_or_create(&self, email: &Email) -> Result<UserId, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let existing: Option<Uuid> = users::table
            .filter(users::email.eq(email.as_str()))
            .select(users::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        if let Some(id) = existing {
            return Ok(UserId::from_uuid(id));
        }

        let row = NewUserRow {
            id: Uuid::new_v4(),
            email: email.as_str().to_owned(),
            created_at: Utc::now(),
        };
        match diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
        {
            Ok(_) => Ok(UserId::from_uuid(row.id)),
            // Two first-time logins can race on the unique email index; the
            // loser reads back the row the winner inserted.
            Err(err) if is_unique_violation(&err) => {
                let id: Uuid = users::table
                    .filter(users::email.eq(email.as_str()))
                    .select(users::id)
                    .first(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                Ok(UserId::from_uuid(id))
            }
            Err(err) => Err(map_diesel_error(err)),
        }
    }
}
