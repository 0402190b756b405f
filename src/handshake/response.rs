//! Upgrade response validation.
//!
//! From [RFC-6455 Section 4.2](https://datatracker.ietf.org/doc/html/rfc6455#section-4.2):
//!
//! If the server chooses to accept the incoming connection, it MUST
//! reply with a valid HTTP response:
//!
//! ```text
//! HTTP/1.1 101 Switching Protocols
//! Upgrade: websocket
//! Connection: Upgrade
//! Sec-WebSocket-Accept: s3pPLMBiTxaQ9kYGzzhZRbK+xOo=
//! ```
//!
//! Checked here: the 101 status, the `Connection` header value and the
//! `Sec-WebSocket-Accept` challenge answer. Header names and the
//! `Connection` value match case-insensitively. The `Upgrade` response
//! header and any `Sec-WebSocket-Protocol` negotiation are not validated.

use super::MAX_ALLOW_HEADERS;
use super::static_headers::*;

use crate::error::HandshakeError;

/// Validate a complete response head against the expected
/// `sec-websocket-accept` value.
///
/// `head` must hold the whole head including the final blank line,
/// and nothing past it.
pub fn validate(head: &[u8], expected_accept: &[u8]) -> Result<(), HandshakeError> {
    let mut headers = [httparse::EMPTY_HEADER; MAX_ALLOW_HEADERS];
    let mut response = httparse::Response::new(&mut headers);

    match response.parse(head)? {
        httparse::Status::Complete(_) => {}
        httparse::Status::Partial => return Err(HandshakeError::WrongResponse),
    }

    // ref: https://docs.rs/httparse/latest/src/httparse/lib.rs.html#581-596
    if response.code != Some(101) {
        return Err(HandshakeError::WrongResponse);
    }

    let mut connection_seen = false;
    let mut accept_seen = false;

    for hdr in response.headers.iter() {
        let name = hdr.name.as_bytes();

        if name.eq_ignore_ascii_case(HEADER_CONNECTION_NAME) {
            connection_seen = true;
            // header value here is case insensitive
            // ref: https://datatracker.ietf.org/doc/html/rfc6455#section-4.1
            if !hdr.value.eq_ignore_ascii_case(HEADER_CONNECTION_VALUE) {
                return Err(HandshakeError::InvalidConnectionHeader);
            }
        } else if name.eq_ignore_ascii_case(HEADER_SEC_WEBSOCKET_ACCEPT_NAME) {
            accept_seen = true;
            if hdr.value != expected_accept {
                return Err(HandshakeError::FailedChallenge);
            }
        }
        // other headers are ignored
    }

    if !connection_seen {
        return Err(HandshakeError::InvalidConnectionHeader);
    }
    if !accept_seen {
        return Err(HandshakeError::FailedChallenge);
    }

    Ok(())
}
