//! PostgreSQL-backed [`DomainRepository`] using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{DomainRepository, DomainRepositoryError};
use crate::domain::{CustomDomain, DomainId, DomainName, UserId};

use super::models::{row_to_domain, DomainRow, NewDomainRow};
use super::pool::{DbPool, PoolError};
use super::schema::custom_domains;

/// Diesel adapter for the domain store. The table's unique index on
/// `(owner_id, name)` backs the registry's duplicate handling.
#[derive(Clone)]
pub struct DieselDomainRepository {
    pool: DbPool,
}

impl DieselDomainRepository {
    /// Create the repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(err: PoolError) -> DomainRepositoryError {
    DomainRepositoryError::connection(err.to_string())
}

fn map_diesel_error(err: diesel::result::Error) -> DomainRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            debug!(message = info.message(), "unique constraint rejected write");
            DomainRepositoryError::DuplicateName
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            debug!(message = info.message(), "database connection closed");
            DomainRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => DomainRepositoryError::query("record not found"),
        other => {
            debug!(error = %other, "diesel operation failed");
            DomainRepositoryError::query("database error")
        }
    }
}

fn map_row(row: DomainRow) -> Result<CustomDomain, DomainRepositoryError> {
    row_to_domain(row).map_err(DomainRepositoryError::query)
}

#[async_trait]
impl DomainRepository for DieselDomainRepository {
    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<CustomDomain>, DomainRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<DomainRow> = custom_domains::table
            .filter(custom_domains::owner_id.eq(owner.as_uuid()))
            .order(custom_domains::created_at.asc())
            .select(DomainRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(map_row).collect()
    }

    async fn find_by_id(
        &self,
        id: &DomainId,
    ) -> Result<Option<CustomDomain>, DomainRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<DomainRow> = custom_domains::table
            .find(id.as_uuid())
            .select(DomainRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(map_row).transpose()
    }

    async fn find_by_owner_and_name(
        &self,
        owner: &UserId,
        name: &DomainName,
    ) -> Result<Option<CustomDomain>, DomainRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<DomainRow> = custom_domains::table
            .filter(custom_domains::owner_id.eq(owner.as_uuid()))
            .filter(custom_domains::name.eq(name.as_str()))
            .select(DomainRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(map_row).transpose()
    }

    async fn insert(&self, domain: &CustomDomain) -> Result<(), DomainRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(custom_domains::table)
            .values(NewDomainRow::from(domain))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn update_name(
        &self,
        id: &DomainId,
        name: &DomainName,
    ) -> Result<CustomDomain, DomainRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: DomainRow = diesel::update(custom_domains::table.find(id.as_uuid()))
            .set((
                custom_domains::name.eq(name.as_str()),
                custom_domains::updated_at.eq(diesel::dsl::now),
            ))
            .returning(DomainRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        map_row(row)
    }

    async fn delete(&self, id: &DomainId) -> Result<(), DomainRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(custom_domains::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[rstest]
    fn unique_violation_maps_to_duplicate_name() {
        let err = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_owned()),
        );
        assert_eq!(map_diesel_error(err), DomainRepositoryError::DuplicateName);
    }

    #[rstest]
    fn other_database_errors_stay_generic() {
        let err = DieselError::NotFound;
        assert_eq!(
            map_diesel_error(err),
            DomainRepositoryError::query("record not found")
        );
    }
}
