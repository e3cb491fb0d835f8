// MAAS HTTP client
//
// Wraps `reqwest::Client` with resource-path joining and `?op=` action
// encoding. Responses come back raw; classification and decoding happen
// in the caller.

use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::{RawResponse, Transport, TransportConfig};

/// reqwest-backed [`Transport`] for a MAAS region controller.
///
/// Resource paths returned by the API (`resource_uri`) are absolute
/// (`/MAAS/api/2.0/machines/4y3ha3/`) and replace the base URL's path when
/// joined. Relative paths resolve against the base, so a base URL should end
/// with `/`.
pub struct MaasClient {
    http: reqwest::Client,
    base_url: Url,
}

impl MaasClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The region controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a resource path, optionally appending `op=<op>`.
    pub(crate) fn resource_url(&self, path: &str, op: Option<&str>) -> Result<Url, Error> {
        let mut url = self.base_url.join(path)?;
        if let Some(op) = op {
            url.query_pairs_mut().append_pair("op", op);
        }
        Ok(url)
    }

    async fn read_response(resp: reqwest::Response) -> Result<RawResponse, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;
        trace!(status = status.as_u16(), bytes = body.len(), "response received");
        Ok(RawResponse { status, body })
    }
}

impl Transport for MaasClient {
    async fn get(&self, path: &str) -> Result<RawResponse, Error> {
        let url = self.resource_url(path, None)?;
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::read_response(resp).await
    }

    async fn post_form(
        &self,
        path: &str,
        op: &str,
        form: &[(&'static str, String)],
    ) -> Result<RawResponse, Error> {
        let url = self.resource_url(path, Some(op))?;
        debug!(fields = form.len(), "POST {}", url);

        let resp = self
            .http
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::read_response(resp).await
    }
}
