use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq, Eq)]
pub enum HandshakeError {
    // upgrade rejected or malformed
    WrongResponse,

    InvalidConnectionHeader,

    FailedChallenge,

    // peer hung up before the response head completed
    ConnectionClosed,

    // response head exceeds the on-stack limit
    OversizedResponse,

    Http(httparse::Error),
}

impl Display for HandshakeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use HandshakeError::*;
        match self {
            WrongResponse => write!(f, "Unexpected http response"),

            InvalidConnectionHeader => {
                write!(f, "Missing or illegal connection header")
            }

            FailedChallenge => {
                write!(f, "Missing or illegal sec-websocket-accept header")
            }

            ConnectionClosed => write!(f, "Connection closed during handshake"),

            OversizedResponse => write!(f, "Response head is too large"),

            Http(e) => write!(f, "Http parse error: {}", e),
        }
    }
}

impl From<httparse::Error> for HandshakeError {
    fn from(e: httparse::Error) -> Self { HandshakeError::Http(e) }
}

impl std::error::Error for HandshakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let HandshakeError::Http(e) = self {
            Some(e)
        } else {
            None
        }
    }
}
