//! Builders wiring driven adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;

use sitebox_backend::domain::ports::{
    FixtureSignedUrlIssuer, InMemoryDomainRepository, InMemoryUserDirectory,
    StaticDomainStatusProvider, UserDirectory,
};
use sitebox_backend::domain::{
    DomainAvailability, DomainAvailabilityImpl, DomainRegistry, DomainRegistryImpl,
    DomainVerificationImpl, PresignService, PresignServiceImpl,
};
use sitebox_backend::inbound::http::state::HttpState;
use sitebox_backend::outbound::availability::DomainrClient;
use sitebox_backend::outbound::dns::HickoryTxtResolver;
use sitebox_backend::outbound::persistence::{DieselDomainRepository, DieselUserDirectory};

use super::ServerConfig;

/// Assemble the HTTP state from the configuration.
///
/// A configured database pool selects the Diesel adapters; otherwise the
/// in-memory fixtures serve, which is how the integration tests and local
/// development without PostgreSQL run. The same split applies to the S3
/// presigner. DNS verification always uses the real resolver.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (domains, users): (Arc<dyn DomainRegistry>, Arc<dyn UserDirectory>) =
        match &config.db_pool {
            Some(pool) => (
                Arc::new(DomainRegistryImpl::new(Arc::new(
                    DieselDomainRepository::new(pool.clone()),
                ))),
                Arc::new(DieselUserDirectory::new(pool.clone())),
            ),
            None => (
                Arc::new(DomainRegistryImpl::new(Arc::new(
                    InMemoryDomainRepository::new(),
                ))),
                Arc::new(InMemoryUserDirectory::new()),
            ),
        };

    let uploads: Arc<dyn PresignService> = match &config.presigner {
        Some(presigner) => Arc::new(PresignServiceImpl::new(Arc::new(presigner.clone()))),
        None => Arc::new(PresignServiceImpl::new(Arc::new(FixtureSignedUrlIssuer))),
    };

    let verification = Arc::new(DomainVerificationImpl::new(Arc::new(
        HickoryTxtResolver::from_system(),
    )));

    let availability: Arc<dyn DomainAvailability> = match &config.domainr_client_id {
        Some(client_id) => Arc::new(DomainAvailabilityImpl::new(Arc::new(DomainrClient::new(
            reqwest::Client::new(),
            client_id.clone(),
        )))),
        // Answers every lookup with the missing-credential error.
        None => Arc::new(DomainAvailabilityImpl::new(Arc::new(
            StaticDomainStatusProvider::default(),
        ))),
    };

    web::Data::new(HttpState {
        domains,
        uploads,
        verification,
        availability,
        users,
    })
}
