use std::io::{ErrorKind, Read, Write};

use super::Codec;

use crate::error::{Error, HandshakeError};
use crate::handshake::static_headers::*;
use crate::handshake::{derive_accept_key, encode_sec_key, response, HttpHeader};
use crate::handshake::{HTTP_HEADER_SP, HTTP_LINE_BREAK, HTTP_METHOD, HTTP_VERSION};
use crate::handshake::MAX_RESPONSE_HEAD;

impl<'b, R: Read, W: Write> Codec<'b, R, W> {
    /// Perform the client upgrade handshake on `path`.
    ///
    /// `headers` are written to the wire first, verbatim and in order;
    /// the caller is responsible for supplying `Host` (and `Origin`,
    /// subprotocol or authorization headers if needed). The upgrade
    /// headers and a random `Sec-WebSocket-Key` follow.
    ///
    /// On success the codec is marked handshaken and the next byte off
    /// the wire belongs to the first frame.
    pub fn handshake(&mut self, headers: &[HttpHeader], path: &str) -> Result<(), Error> {
        self.handshake_with_key(rand::random(), headers, path)
    }

    /// [`handshake`](Self::handshake) with a caller-pinned key nonce.
    pub fn handshake_with_key(
        &mut self,
        nonce: [u8; 8],
        headers: &[HttpHeader],
        path: &str,
    ) -> Result<(), Error> {
        let sec_key = encode_sec_key(nonce);
        let expected_accept = derive_accept_key(&sec_key);

        self.send_request(headers, path, &sec_key)?;
        self.recv_response(&expected_accept)?;

        self.handshaken = true;
        Ok(())
    }

    fn send_request(
        &mut self,
        headers: &[HttpHeader],
        path: &str,
        sec_key: &[u8; 12],
    ) -> Result<(), Error> {
        let w = &mut self.writer;

        // GET {path} HTTP/1.1
        w.write_all(HTTP_METHOD)?;
        w.write_all(b" ")?;
        w.write_all(path.as_bytes())?;
        w.write_all(b" ")?;
        w.write_all(HTTP_VERSION)?;
        w.write_all(HTTP_LINE_BREAK)?;

        // caller headers keep their order
        for hdr in headers {
            put_header(w, hdr.name, hdr.value)?;
        }

        put_header(w, HEADER_CONNECTION_NAME, HEADER_CONNECTION_VALUE)?;
        put_header(w, HEADER_UPGRADE_NAME, HEADER_UPGRADE_VALUE)?;
        put_header(
            w,
            HEADER_SEC_WEBSOCKET_VERSION_NAME,
            HEADER_SEC_WEBSOCKET_VERSION_VALUE,
        )?;
        put_header(w, HEADER_SEC_WEBSOCKET_KEY_NAME, sec_key)?;

        // finish with CRLF
        w.write_all(HTTP_LINE_BREAK)?;
        Ok(())
    }

    fn recv_response(&mut self, expected_accept: &[u8; 28]) -> Result<(), Error> {
        let mut head = [0u8; MAX_RESPONSE_HEAD];
        let mut len = 0;

        // single-byte reads; anything past the head already belongs to
        // the first frame and must stay on the wire
        loop {
            if len == head.len() {
                return Err(HandshakeError::OversizedResponse.into());
            }
            match self.reader.read(&mut head[len..len + 1]) {
                Ok(0) => return Err(HandshakeError::ConnectionClosed.into()),
                Ok(_) => len += 1,
                Err(ref e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
            if len >= 4 && head[len - 4..len] == *b"\r\n\r\n" {
                break;
            }
        }

        response::validate(&head[..len], expected_accept)?;
        Ok(())
    }
}

fn put_header<W: Write>(w: &mut W, name: &[u8], value: &[u8]) -> std::io::Result<()> {
    w.write_all(name)?;
    w.write_all(HTTP_HEADER_SP)?;
    w.write_all(value)?;
    w.write_all(HTTP_LINE_BREAK)
}
