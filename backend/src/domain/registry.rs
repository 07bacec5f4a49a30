//! Custom domain registry: the CRUD lifecycle behind the domains dashboard.
//!
//! Every mutation confirms the acting user owns the record before touching
//! it, and every name passes syntax validation before persistence (enforced
//! by construction via [`DomainName`]). The duplicate check here is a
//! fast-path UX improvement; the store's unique index on `(owner_id, name)`
//! is the authoritative guard under concurrent inserts.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use super::custom_domain::{CustomDomain, DomainId, DomainName};
use super::ports::{DomainRegistry, DomainRepository, DomainRepositoryError};
use super::user::UserId;
use super::Error;

/// User-facing message for owner-scoped name collisions.
pub const DUPLICATE_NAME_MESSAGE: &str = "You already have a domain with this name.";
/// User-facing message for lookups of records that do not exist.
pub const NOT_FOUND_MESSAGE: &str = "Domain not found.";

/// Registry use case backed by a [`DomainRepository`].
#[derive(Clone)]
pub struct DomainRegistryImpl<R> {
    repo: Arc<R>,
}

impl<R> DomainRegistryImpl<R> {
    /// Create the registry with the given repository adapter.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> DomainRegistryImpl<R>
where
    R: DomainRepository,
{
    /// Map adapter failures to a user-safe internal error. The specific
    /// failure goes to tracing; `message` is what the user sees and must
    /// never mention other records.
    fn internal(operation: &str, message: &str, err: &DomainRepositoryError) -> Error {
        error!(operation, error = %err, "domain store operation failed");
        Error::internal(message)
    }

    async fn load_owned(
        &self,
        id: &DomainId,
        acting_user: &UserId,
        forbidden_message: &str,
    ) -> Result<CustomDomain, Error> {
        let domain = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|err| {
                Self::internal(
                    "find",
                    "An unexpected error occurred while loading the domain.",
                    &err,
                )
            })?
            .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))?;

        if &domain.owner_id != acting_user {
            return Err(Error::forbidden(forbidden_message));
        }
        Ok(domain)
    }

    async fn reject_duplicate(&self, owner: &UserId, name: &DomainName) -> Result<(), Error> {
        let existing = self
            .repo
            .find_by_owner_and_name(owner, name)
            .await
            .map_err(|err| {
                Self::internal(
                    "duplicate-check",
                    "An unexpected error occurred while checking the domain name.",
                    &err,
                )
            })?;
        if existing.is_some() {
            return Err(Error::conflict(DUPLICATE_NAME_MESSAGE));
        }
        Ok(())
    }
}

#[async_trait]
impl<R> DomainRegistry for DomainRegistryImpl<R>
where
    R: DomainRepository,
{
    async fn list(&self, owner: &UserId) -> Result<Vec<CustomDomain>, Error> {
        self.repo.list_by_owner(owner).await.map_err(|err| {
            Self::internal(
                "list",
                "An unexpected error occurred while loading your domains.",
                &err,
            )
        })
    }

    async fn add(&self, owner: &UserId, name: DomainName) -> Result<CustomDomain, Error> {
        self.reject_duplicate(owner, &name).await?;

        let domain = CustomDomain::new_pending(owner.clone(), name);
        match self.repo.insert(&domain).await {
            Ok(()) => {
                info!(domain = %domain.name, "registered custom domain");
                Ok(domain)
            }
            // The check above raced with a concurrent insert; the store's
            // unique index caught it.
            Err(DomainRepositoryError::DuplicateName) => {
                Err(Error::conflict(DUPLICATE_NAME_MESSAGE))
            }
            Err(err) => Err(Self::internal(
                "insert",
                "An unexpected error occurred while adding the domain.",
                &err,
            )),
        }
    }

    async fn fetch(&self, id: &DomainId, acting_user: &UserId) -> Result<CustomDomain, Error> {
        self.load_owned(id, acting_user, "You are not authorized to view this domain.")
            .await
    }

    async fn rename(
        &self,
        id: &DomainId,
        acting_user: &UserId,
        new_name: DomainName,
    ) -> Result<CustomDomain, Error> {
        let domain = self
            .load_owned(id, acting_user, "You are not authorized to edit this domain.")
            .await?;

        // A no-op rename must not collide with itself.
        if new_name != domain.name {
            self.reject_duplicate(acting_user, &new_name).await?;
        }

        match self.repo.update_name(id, &new_name).await {
            Ok(updated) => {
                info!(domain = %updated.name, "renamed custom domain");
                Ok(updated)
            }
            Err(DomainRepositoryError::DuplicateName) => {
                Err(Error::conflict(DUPLICATE_NAME_MESSAGE))
            }
            Err(err) => Err(Self::internal(
                "update",
                "An unexpected error occurred while updating the domain.",
                &err,
            )),
        }
    }

    async fn remove(&self, id: &DomainId, acting_user: &UserId) -> Result<(), Error> {
        let domain = self
            .load_owned(
                id,
                acting_user,
                "You are not authorized to delete this domain.",
            )
            .await?;

        self.repo.delete(id).await.map_err(|err| {
            Self::internal(
                "delete",
                "An unexpected error occurred while deleting the domain.",
                &err,
            )
        })?;
        info!(domain = %domain.name, "deleted custom domain");
        Ok(())
    }
}
