//! Row types bridging Diesel and the domain model.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{CustomDomain, DomainId, DomainName, DomainStatus, UserId};

use super::schema::{custom_domains, users};

/// Queryable row of `custom_domains`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = custom_domains)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DomainRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable row of `custom_domains`.
#[derive(Debug, Insertable)]
#[diesel(table_name = custom_domains)]
pub struct NewDomainRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&CustomDomain> for NewDomainRow {
    fn from(value: &CustomDomain) -> Self {
        Self {
            id: *value.id.as_uuid(),
            owner_id: *value.owner_id.as_uuid(),
            name: value.name.to_string(),
            status: value.status.to_string(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Convert a stored row into the domain record.
///
/// Rows written by this adapter always hold valid names and statuses; if a
/// migration or manual edit breaks that, the status degrades to `PENDING`
/// with a warning rather than failing the whole query.
pub fn row_to_domain(row: DomainRow) -> Result<CustomDomain, String> {
    let name = DomainName::parse(&row.name)
        .map_err(|err| format!("stored domain name {:?} is invalid: {err}", row.name))?;
    let status = DomainStatus::from_str_opt(&row.status).unwrap_or_else(|| {
        warn!(value = %row.status, "unknown domain status in store; treating as PENDING");
        DomainStatus::Pending
    });
    Ok(CustomDomain {
        id: DomainId::from_uuid(row.id),
        owner_id: UserId::from_uuid(row.owner_id),
        name,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// Queryable row of `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable row of `users`.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
