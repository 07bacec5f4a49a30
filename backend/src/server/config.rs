//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use sitebox_backend::outbound::persistence::DbPool;
use sitebox_backend::outbound::storage::S3Presigner;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) presigner: Option<S3Presigner>,
    pub(crate) domainr_client_id: Option<String>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            presigner: None,
            domainr_client_id: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without one the server runs on in-memory fixtures, which is the mode
    /// integration tests use.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach an S3 presigner for the upload boundary.
    ///
    /// Without one, presign requests are answered with fixture URLs.
    #[must_use]
    pub fn with_presigner(mut self, presigner: S3Presigner) -> Self {
        self.presigner = Some(presigner);
        self
    }

    /// Attach the Domainr API credential for availability lookups.
    ///
    /// Without one, availability requests answer with an internal error
    /// reporting the missing configuration.
    #[must_use]
    pub fn with_domainr_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.domainr_client_id = Some(client_id.into());
        self
    }

    /// The socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
