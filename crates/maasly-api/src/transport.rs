// Transport seam and shared HTTP client configuration.
//
// The core never talks to the network directly: it hands a resource path
// and form fields to a `Transport` and gets back the raw status and body.
// `TransportConfig` builds the reqwest client used by `MaasClient`.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::StatusCode;

use crate::classify::classify;
use crate::error::Error;

/// TLS verification mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsMode {
    /// Use the system certificate store.
    #[default]
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (for self-signed region controllers).
    DangerAcceptInvalid,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("maasly/", env!("CARGO_PKG_VERSION")));

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

/// A response as the transport saw it: status and undecoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Classify the response, returning the body on 2xx.
    pub fn into_success_body(self) -> Result<String, Error> {
        classify(self.status, &self.body)?;
        Ok(self.body)
    }
}

/// Issues requests on behalf of the core.
///
/// Implementations own connection handling, retries and signing. Every
/// outcome they return is treated as final.
pub trait Transport: Send + Sync {
    /// `GET {path}`.
    fn get(&self, path: &str) -> impl Future<Output = Result<RawResponse, Error>> + Send;

    /// `POST {path}?op={op}` with a form-encoded body.
    fn post_form(
        &self,
        path: &str,
        op: &str,
        form: &[(&'static str, String)],
    ) -> impl Future<Output = Result<RawResponse, Error>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_is_returned() {
        let resp = RawResponse::new(StatusCode::OK, "{}");
        assert_eq!(resp.into_success_body().ok().as_deref(), Some("{}"));
    }

    #[test]
    fn failure_is_classified() {
        let resp = RawResponse::new(StatusCode::SERVICE_UNAVAILABLE, "no ip addresses available");
        let err = resp.into_success_body().err();
        assert!(err.is_some_and(|e| e.is_cannot_complete()));
    }

    #[test]
    fn missing_ca_cert_is_tls_error() {
        let config = TransportConfig {
            tls: TlsMode::CustomCa(PathBuf::from("/nonexistent/maasly-ca.pem")),
            ..TransportConfig::default()
        };
        assert!(matches!(config.build_client(), Err(Error::Tls(_))));
    }
}
