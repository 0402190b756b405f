use std::io::ErrorKind;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::Codec;

use crate::error::{Error, HandshakeError};
use crate::handshake::static_headers::*;
use crate::handshake::{derive_accept_key, encode_sec_key, response, HttpHeader};
use crate::handshake::{HTTP_HEADER_SP, HTTP_LINE_BREAK, HTTP_METHOD, HTTP_VERSION};
use crate::handshake::MAX_RESPONSE_HEAD;

impl<'b, R, W> Codec<'b, R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Async version of [`handshake`](Codec::handshake).
    pub async fn handshake_async(
        &mut self,
        headers: &[HttpHeader<'_>],
        path: &str,
    ) -> Result<(), Error> {
        self.handshake_with_key_async(rand::random(), headers, path)
            .await
    }

    /// Async version of [`handshake_with_key`](Codec::handshake_with_key).
    pub async fn handshake_with_key_async(
        &mut self,
        nonce: [u8; 8],
        headers: &[HttpHeader<'_>],
        path: &str,
    ) -> Result<(), Error> {
        let sec_key = encode_sec_key(nonce);
        let expected_accept = derive_accept_key(&sec_key);

        self.send_request_async(headers, path, &sec_key).await?;
        self.recv_response_async(&expected_accept).await?;

        self.handshaken = true;
        Ok(())
    }

    async fn send_request_async(
        &mut self,
        headers: &[HttpHeader<'_>],
        path: &str,
        sec_key: &[u8; 12],
    ) -> Result<(), Error> {
        let w = &mut self.writer;

        // GET {path} HTTP/1.1
        w.write_all(HTTP_METHOD).await?;
        w.write_all(b" ").await?;
        w.write_all(path.as_bytes()).await?;
        w.write_all(b" ").await?;
        w.write_all(HTTP_VERSION).await?;
        w.write_all(HTTP_LINE_BREAK).await?;

        // caller headers keep their order
        for hdr in headers {
            put_header(w, hdr.name, hdr.value).await?;
        }

        put_header(w, HEADER_CONNECTION_NAME, HEADER_CONNECTION_VALUE).await?;
        put_header(w, HEADER_UPGRADE_NAME, HEADER_UPGRADE_VALUE).await?;
        put_header(
            w,
            HEADER_SEC_WEBSOCKET_VERSION_NAME,
            HEADER_SEC_WEBSOCKET_VERSION_VALUE,
        )
        .await?;
        put_header(w, HEADER_SEC_WEBSOCKET_KEY_NAME, sec_key).await?;

        w.write_all(HTTP_LINE_BREAK).await?;
        Ok(())
    }

    async fn recv_response_async(&mut self, expected_accept: &[u8; 28]) -> Result<(), Error> {
        let mut head = [0u8; MAX_RESPONSE_HEAD];
        let mut len = 0;

        // single-byte reads; anything past the head already belongs to
        // the first frame and must stay on the wire
        loop {
            if len == head.len() {
                return Err(HandshakeError::OversizedResponse.into());
            }
            match self.reader.read(&mut head[len..len + 1]).await {
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

async fn put_header<W>(w: &mut W, name: &[u8], value: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    w.write_all(name).await?;
    w.write_all(HTTP_HEADER_SP).await?;
    w.write_all(value).await?;
    w.write_all(HTTP_LINE_BREAK).await
}
