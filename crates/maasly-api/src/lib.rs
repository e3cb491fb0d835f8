// maasly-api: MAAS 2.x wire layer. Error taxonomy, status classification and
// wire models, plus the `Transport` seam the core calls through and a reqwest
// implementation of it (`MaasClient`).

pub mod classify;
pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use classify::classify;
pub use client::MaasClient;
pub use error::{
    Error, ErrorKind, find_kind, is_bad_request_error, is_cannot_complete_error,
    is_deserialization_error, is_permission_error, is_unexpected_error,
    is_unsupported_version_error,
};
pub use transport::{RawResponse, TlsMode, Transport, TransportConfig};

pub use reqwest::StatusCode;
