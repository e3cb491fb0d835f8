use strum::{AsRefStr, Display};
use thiserror::Error;

/// Discriminator for the fixed set of failure kinds callers react to.
///
/// Callers branch on the kind, never on raw status codes. The
/// `Transport` kind covers failures that happened before any response
/// was received (connection refused, bad URL, TLS setup).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum ErrorKind {
    #[strum(serialize = "DeserializationError")]
    Deserialization,
    #[strum(serialize = "UnsupportedVersionError")]
    UnsupportedVersion,
    #[strum(serialize = "BadRequestError")]
    BadRequest,
    #[strum(serialize = "PermissionError")]
    Permission,
    #[strum(serialize = "CannotCompleteError")]
    CannotComplete,
    #[strum(serialize = "UnexpectedError")]
    Unexpected,
    #[strum(serialize = "TransportError")]
    Transport,
}

/// Top-level error type shared by every maasly crate.
///
/// The first six variants are the classified vocabulary: payload shape
/// failures, version failures, and the server-reported outcomes produced
/// by [`crate::classify`]. The remaining variants belong to the HTTP
/// transport and are surfaced unchanged.
#[derive(Debug, Error)]
pub enum Error {
    // ── Payload ─────────────────────────────────────────────────────
    /// Payload shape does not match the schema for the resolved version.
    #[error("{message}")]
    Deserialization { message: String },

    /// Requested API version is older than anything this client understands.
    #[error("{message}")]
    UnsupportedVersion { message: String },

    // ── Server-reported ─────────────────────────────────────────────
    /// 400, 404 or 409: the request was invalid or conflicts with resource state.
    #[error("{message}")]
    BadRequest { message: String },

    /// 403: the caller may not act on this resource.
    #[error("{message}")]
    Permission { message: String },

    /// 503: the server lacks a resource needed to complete the operation.
    #[error("{message}")]
    CannotComplete { message: String },

    /// Any other non-success status, surfaced verbatim.
    #[error("unexpected: ServerError: {status} {reason} ({body})")]
    Unexpected {
        status: u16,
        reason: String,
        body: String,
    },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate setup error.
    #[error("TLS error: {0}")]
    Tls(String),
}

impl Error {
    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::Deserialization {
            message: message.into(),
        }
    }

    pub fn unsupported_version(message: impl Into<String>) -> Self {
        Self::UnsupportedVersion {
            message: message.into(),
        }
    }

    /// Prefix the message of a message-carrying variant with `context: `.
    ///
    /// Used when a nested failure is reported from an outer scope, e.g.
    /// `machine 0: <element error>`. Other variants pass through untouched.
    #[must_use]
    pub fn with_context(self, context: impl std::fmt::Display) -> Self {
        match self {
            Self::Deserialization { message } => Self::Deserialization {
                message: format!("{context}: {message}"),
            },
            Self::UnsupportedVersion { message } => Self::UnsupportedVersion {
                message: format!("{context}: {message}"),
            },
            other => other,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Deserialization { .. } => ErrorKind::Deserialization,
            Self::UnsupportedVersion { .. } => ErrorKind::UnsupportedVersion,
            Self::BadRequest { .. } => ErrorKind::BadRequest,
            Self::Permission { .. } => ErrorKind::Permission,
            Self::CannotComplete { .. } => ErrorKind::CannotComplete,
            Self::Unexpected { .. } => ErrorKind::Unexpected,
            Self::Transport(_) | Self::InvalidUrl(_) | Self::Tls(_) => ErrorKind::Transport,
        }
    }

    pub fn is_deserialization(&self) -> bool {
        self.kind() == ErrorKind::Deserialization
    }

    pub fn is_unsupported_version(&self) -> bool {
        self.kind() == ErrorKind::UnsupportedVersion
    }

    pub fn is_bad_request(&self) -> bool {
        self.kind() == ErrorKind::BadRequest
    }

    pub fn is_permission(&self) -> bool {
        self.kind() == ErrorKind::Permission
    }

    pub fn is_cannot_complete(&self) -> bool {
        self.kind() == ErrorKind::CannotComplete
    }

    pub fn is_unexpected(&self) -> bool {
        self.kind() == ErrorKind::Unexpected
    }

    /// HTTP status of a server-reported failure, when the variant keeps it.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unexpected { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

// ── Chain-aware predicates ──────────────────────────────────────────
//
// These walk `source()` so an `Error` wrapped by a caller's own error type
// still classifies by its kind.

/// Kind of the outermost maasly [`Error`] found in `err`'s source chain.
pub fn find_kind(err: &(dyn std::error::Error + 'static)) -> Option<ErrorKind> {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(ours) = e.downcast_ref::<Error>() {
            return Some(ours.kind());
        }
        current = e.source();
    }
    None
}

pub fn is_deserialization_error(err: &(dyn std::error::Error + 'static)) -> bool {
    find_kind(err) == Some(ErrorKind::Deserialization)
}

pub fn is_unsupported_version_error(err: &(dyn std::error::Error + 'static)) -> bool {
    find_kind(err) == Some(ErrorKind::UnsupportedVersion)
}

pub fn is_bad_request_error(err: &(dyn std::error::Error + 'static)) -> bool {
    find_kind(err) == Some(ErrorKind::BadRequest)
}

pub fn is_permission_error(err: &(dyn std::error::Error + 'static)) -> bool {
    find_kind(err) == Some(ErrorKind::Permission)
}

pub fn is_cannot_complete_error(err: &(dyn std::error::Error + 'static)) -> bool {
    find_kind(err) == Some(ErrorKind::CannotComplete)
}

pub fn is_unexpected_error(err: &(dyn std::error::Error + 'static)) -> bool {
    find_kind(err) == Some(ErrorKind::Unexpected)
}
