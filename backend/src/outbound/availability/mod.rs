//! Registry availability adapters.

mod domainr;

pub use domainr::DomainrClient;
