// Status classification
//
// Turns a transport outcome (status + body) into either success or one of
// the classified error kinds. Nothing above this module looks at raw
// status codes.

use reqwest::StatusCode;
use tracing::debug;

use crate::error::Error;

/// Classify a response. Returns `Ok(())` for any 2xx status.
///
/// | status          | error                                   |
/// |-----------------|-----------------------------------------|
/// | 400, 404, 409   | [`Error::BadRequest`]                   |
/// | 403             | [`Error::Permission`]                   |
/// | 503             | [`Error::CannotComplete`]               |
/// | other non-2xx   | [`Error::Unexpected`]                   |
///
/// The body is trimmed and used as the message.
pub fn classify(status: StatusCode, body: &str) -> Result<(), Error> {
    if status.is_success() {
        return Ok(());
    }

    let message = body.trim().to_owned();
    debug!(status = status.as_u16(), "classifying failed response");

    Err(match status {
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::CONFLICT => {
            Error::BadRequest { message }
        }
        StatusCode::FORBIDDEN => Error::Permission { message },
        StatusCode::SERVICE_UNAVAILABLE => Error::CannotComplete { message },
        other => Error::Unexpected {
            status: other.as_u16(),
            reason: other.canonical_reason().unwrap_or_default().to_owned(),
            body: message,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn kind_of(code: u16) -> Option<ErrorKind> {
        let status = StatusCode::from_u16(code).ok()?;
        classify(status, "body").err().map(|e| e.kind())
    }

    #[test]
    fn success_statuses_pass() {
        for code in [200, 201, 202, 204] {
            assert_eq!(kind_of(code), None, "status {code}");
        }
    }

    #[test]
    fn status_table_is_exact() {
        assert_eq!(kind_of(400), Some(ErrorKind::BadRequest));
        assert_eq!(kind_of(404), Some(ErrorKind::BadRequest));
        assert_eq!(kind_of(409), Some(ErrorKind::BadRequest));
        assert_eq!(kind_of(403), Some(ErrorKind::Permission));
        assert_eq!(kind_of(503), Some(ErrorKind::CannotComplete));
        for code in [301, 401, 405, 410, 429, 500, 502, 504] {
            assert_eq!(kind_of(code), Some(ErrorKind::Unexpected), "status {code}");
        }
    }

    #[test]
    fn message_is_trimmed_body() {
        let Err(err) = classify(StatusCode::NOT_FOUND, "  can't find machine\n") else {
            panic!("404 must be an error");
        };
        assert_eq!(err.to_string(), "can't find machine");
    }

    #[test]
    fn unexpected_uses_canonical_reason() {
        let Err(err) = classify(StatusCode::METHOD_NOT_ALLOWED, "wat?") else {
            panic!("405 must be an error");
        };
        assert!(err.is_unexpected());
        assert_eq!(
            err.to_string(),
            "unexpected: ServerError: 405 Method Not Allowed (wat?)"
        );
    }
}
