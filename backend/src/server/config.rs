//! Server settings and the resolved configuration consumed by
//! [`super::create_server`].
//!
//! Settings layer CLI flags over `COMPLAINTS_*` environment variables over
//! built-in defaults.

use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use complaint_desk::domain::SecretCode;
use complaint_desk::outbound::memory::DEFAULT_ADMIN_SECRET;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;

/// Raw settings for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COMPLAINTS")]
pub struct ServerSettings {
    /// Interface address to listen on.
    pub host: Option<String>,
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// Administrator secret code.
    pub admin_secret: Option<String>,
}

impl ServerSettings {
    /// Configured host, defaulting to all interfaces.
    ///
    /// # Errors
    /// Returns an error when the configured value is not an IP address.
    pub fn host(&self) -> io::Result<IpAddr> {
        self.host.as_deref().map_or(Ok(DEFAULT_HOST), |raw| {
            raw.parse()
                .map_err(|err| io::Error::other(format!("invalid host {raw:?}: {err}")))
        })
    }

    /// Configured port, defaulting to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Configured administrator secret, defaulting to the built-in one.
    pub fn admin_secret(&self) -> &str {
        self.admin_secret.as_deref().unwrap_or(DEFAULT_ADMIN_SECRET)
    }
}

/// Validated configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) admin_secret: SecretCode,
}

impl ServerConfig {
    /// Construct a configuration from already validated parts.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, admin_secret: SecretCode) -> Self {
        Self {
            bind_addr,
            admin_secret,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

impl TryFrom<&ServerSettings> for ServerConfig {
    type Error = io::Error;

    fn try_from(settings: &ServerSettings) -> Result<Self, Self::Error> {
        let admin_secret = SecretCode::new(settings.admin_secret())
            .map_err(|err| io::Error::other(format!("invalid admin secret: {err}")))?;
        Ok(Self::new(
            SocketAddr::new(settings.host()?, settings.port()),
            admin_secret,
        ))
    }
}
