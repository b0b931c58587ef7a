//! HTTP client initialization.
//!
//! Certificate verification is a per-row decision (it is switched off only
//! after a TLS failure), so clients are built in two sets up front and the
//! pipeline picks one per request instead of rebuilding.

use std::time::Duration;

use reqwest::{redirect, Client, ClientBuilder};

use crate::config::{PipelineOptions, MAX_REDIRECT_HOPS, TCP_CONNECT_TIMEOUT_SECS};

/// Whether server certificates are verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsMode {
    /// Certificates and host names are verified (the normal mode)
    #[default]
    Verified,
    /// Invalid certificates and host names are accepted
    Unverified,
}

impl TlsMode {
    /// Whether certificate verification is switched off.
    pub fn is_disabled(self) -> bool {
        self == TlsMode::Unverified
    }
}

/// Clients sharing one TLS mode.
#[derive(Debug, Clone)]
pub struct ClientPair {
    /// Redirects disabled, for tracking the HEAD redirect chain hop by hop
    pub redirect: Client,
    /// Redirects followed, for page content, robots.txt and API calls
    pub content: Client,
}

/// Every HTTP client the audit needs.
#[derive(Debug, Clone)]
pub struct HttpClients {
    verified: ClientPair,
    unverified: ClientPair,
}

impl HttpClients {
    /// Clients for the given TLS mode.
    pub fn for_mode(&self, mode: TlsMode) -> &ClientPair {
        match mode {
            TlsMode::Verified => &self.verified,
            TlsMode::Unverified => &self.unverified,
        }
    }
}

fn base_builder(options: &PipelineOptions, mode: TlsMode) -> ClientBuilder {
    let builder = ClientBuilder::new()
        .user_agent(options.user_agent.clone())
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS));
    match mode {
        TlsMode::Verified => builder,
        TlsMode::Unverified => builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true),
    }
}

fn init_pair(options: &PipelineOptions, mode: TlsMode) -> Result<ClientPair, reqwest::Error> {
    let redirect = base_builder(options, mode)
        .redirect(redirect::Policy::none())
        .build()?;
    let content = base_builder(options, mode)
        .redirect(redirect::Policy::limited(MAX_REDIRECT_HOPS))
        .build()?;
    Ok(ClientPair { redirect, content })
}

/// Builds the verified and unverified client sets.
///
/// Request timeouts are not set on the clients; each request carries the
/// timeout of its kind (HEAD, GET, robots.txt).
///
/// # Errors
///
/// Returns a `reqwest::Error` if the TLS backend cannot be initialized.
pub fn init_clients(options: &PipelineOptions) -> Result<HttpClients, reqwest::Error> {
    Ok(HttpClients {
        verified: init_pair(options, TlsMode::Verified)?,
        unverified: init_pair(options, TlsMode::Unverified)?,
    })
}
