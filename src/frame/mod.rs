//! Websocket data frame.
//!
//! [RFC-6455 Section5](https://datatracker.ietf.org/doc/html/rfc6455#section-5)
//!
//! ```text
//! 0                   1                   2                   3
//! 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-------+-+-------------+-------------------------------+
//! |F|R|R|R| opcode|M| Payload len |    Extended payload length    |
//! |I|S|S|S|  (4)  |A|     (7)     |             (16/64)           |
//! |N|V|V|V|       |S|             |   (if payload len==126/127)   |
//! | |1|2|3|       |K|             |                               |
//! +-+-+-+-+-------+-+-------------+ - - - - - - - - - - - - - - - +
//! |     Extended payload length continued, if payload len == 127  |
//! + - - - - - - - - - - - - - - - +-------------------------------+
//! |                               |Masking-key, if MASK set to 1  |
//! +-------------------------------+-------------------------------+
//! | Masking-key (continued)       |          Payload Data         |
//! +-------------------------------- - - - - - - - - - - - - - - - +
//! :                     Payload Data continued ...                :
//! + - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - +
//! |                     Payload Data continued ...                |
//! +---------------------------------------------------------------+
//! ```
//!

pub mod flag;
pub mod length;
pub mod mask;

pub use flag::{Fin, OpCode, Rsv};
pub use length::PayloadLen;
pub use mask::Mask;

/// Largest possible frame head: 2 + 8 + 4 bytes.
pub const MAX_FRAME_HEAD_LEN: usize = 14;

/// Websocket frame head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHead {
    pub fin: Fin,
    pub rsv: Rsv,
    pub opcode: OpCode,
    pub mask: Mask,
    pub length: PayloadLen,
}

use crate::bleed::Writer;
use crate::bleed::{slice, slice_to_array};
use crate::error::FrameError;

impl FrameHead {
    /// Constructor, with RSV bits clear.
    #[inline]
    pub const fn new(fin: Fin, opcode: OpCode, mask: Mask, length: PayloadLen) -> Self {
        Self {
            fin,
            rsv: Rsv::NONE,
            opcode,
            mask,
            length,
        }
    }

    /// Count of bytes this head occupies on the wire.
    #[inline]
    pub const fn encoded_len(&self) -> usize {
        2 + self.length.extended_len() + self.mask.key_len()
    }

    /// Encode to provided buffer, returns the count of written bytes.
    /// The caller should ensure the buffer is large enough,
    /// otherwise a [`FrameError::NotEnoughCapacity`] error will be returned.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, FrameError> {
        if buf.len() < self.encoded_len() {
            return Err(FrameError::NotEnoughCapacity);
        }

        let mut writer = Writer::new(buf);

        // fin, rsv, opcode
        let b1 = self.fin.to_flag() | self.rsv.to_flag() | self.opcode.to_flag();

        // mask, payload length
        let b2 = self.mask.to_flag() | self.length.to_flag();

        unsafe {
            writer.write_unchecked(&[b1, b2]);

            // extended payload length
            match &self.length {
                PayloadLen::Standard(_) => {}
                PayloadLen::Extended1(v) => {
                    writer.write_unchecked(&v.to_be_bytes());
                }
                PayloadLen::Extended2(v) => {
                    writer.write_unchecked(&v.to_be_bytes());
                }
            };

            // mask key
            match &self.mask {
                Mask::Key(k) => {
                    writer.write_unchecked(k);
                }
                Mask::Skip => {
                    writer.write_unchecked(&[0u8; 4]);
                }
                Mask::None => {}
            };
        }

        Ok(writer.pos())
    }

    /// Parse from provided buffer, returns [`FrameHead`] and the count of
    /// read bytes if the parse succeeds.
    /// If there is not enough data to parse, a [`FrameError::NotEnoughData`]
    /// error will be returned.
    pub fn decode(buf: &[u8]) -> Result<(Self, usize), FrameError> {
        if buf.len() < 2 {
            return Err(FrameError::NotEnoughData);
        }

        let mut n: usize = 2;

        // fin, rsv, opcode
        let b1 = unsafe { *buf.get_unchecked(0) };

        // mask, payload length
        let b2 = unsafe { *buf.get_unchecked(1) };

        let fin = Fin::from_flag(b1);
        let rsv = Rsv::from_flag(b1);
        let opcode = OpCode::from_flag(b1);

        let mut mask = Mask::from_flag(b2);
        let mut length = PayloadLen::from_flag(b2);

        match length {
            PayloadLen::Standard(_) => {}
            PayloadLen::Extended1(_) => {
                if buf.len() - n < 2 {
                    return Err(FrameError::NotEnoughData);
                }

                length =
                    PayloadLen::from_byte2(unsafe { *slice_to_array::<_, 2>(slice(buf, 2, 4)) });

                n += 2;
            }
            PayloadLen::Extended2(_) => {
                if buf.len() - n < 8 {
                    return Err(FrameError::NotEnoughData);
                }

                length =
                    PayloadLen::from_byte8(unsafe { *slice_to_array::<_, 8>(slice(buf, 2, 10)) });

                n += 8;
            }
        };

        match mask {
            Mask::None => {}
            _ => {
                if buf.len() - n < 4 {
                    return Err(FrameError::NotEnoughData);
                }

                let key = *unsafe { slice_to_array::<_, 4>(slice(buf, n, n + 4)) };

                if key.iter().all(|b| *b == 0) {
                    mask = Mask::Skip
                } else {
                    mask = Mask::Key(key)
                }

                n += 4;
            }
        }

        Ok((
            FrameHead {
                fin,
                rsv,
                opcode,
                mask,
                length,
            },
            n,
        ))
    }
}
