//! Websocket client codec.
//!
//! A [`Codec`] wraps a byte reader, a byte writer and a caller-owned
//! scratch buffer. After [`handshake`](Codec::handshake) it exposes the
//! connection frame by frame: [`read_event`](Codec::read_event) pulls
//! heads and payload chunks, [`write_frame_head`](Codec::write_frame_head)
//! and [`write_payload`](Codec::write_payload) push them.
//!
//! Payloads of any size pass through the scratch buffer in chunks; the
//! codec itself never allocates and never buffers a whole message.

mod state;
mod read;
mod write;
mod handshake;

cfg_if::cfg_if! {
    if #[cfg(feature = "tokio")] {
        mod async_read;
        mod async_write;
        mod async_handshake;
    }
}

use state::ReadState;
use crate::frame::{FrameHead, Mask};

/// Smallest accepted scratch buffer.
///
/// A frame head occupies at most 14 bytes and is staged in the scratch
/// buffer on both paths.
pub const MIN_SCRATCH: usize = 16;

/// Websocket client codec over a reader/writer pair.
///
/// The scratch buffer is borrowed for the codec's lifetime and is the
/// only place payload bytes ever live; slices handed out through
/// [`Event`] point into it and are invalidated by the next call.
///
/// A codec is single-stream and not safe for concurrent use. Two codecs
/// on independent streams are independent.
pub struct Codec<'b, R, W> {
    reader: R,
    writer: W,
    scratch: &'b mut [u8],
    read_state: ReadState,
    write_mask: Mask,
    write_mask_off: u64,
    handshaken: bool,
}

/// What one read call produced.
#[derive(Debug, PartialEq, Eq)]
pub enum Event<'a> {
    /// A complete frame head. Its `mask` field is always [`Mask::None`];
    /// de-masking happens inside the codec.
    Head(FrameHead),

    /// A piece of the current frame's payload.
    Chunk(Chunk<'a>),

    /// EOF from the peer, between frames or in the middle of one.
    Closed,
}

/// A piece of payload, borrowed from the scratch buffer.
#[derive(Debug, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// payload bytes, already de-masked
    pub data: &'a [u8],
    /// true iff this chunk completes the frame
    pub last: bool,
}

impl<'b, R, W> Codec<'b, R, W> {
    /// Create a codec over `reader` and `writer`.
    ///
    /// # Panics
    ///
    /// Panics if `scratch` is shorter than [`MIN_SCRATCH`] bytes.
    pub fn new(scratch: &'b mut [u8], reader: R, writer: W) -> Self {
        assert!(scratch.len() >= MIN_SCRATCH);
        Codec {
            reader,
            writer,
            scratch,
            read_state: ReadState::new(),
            write_mask: Mask::None,
            write_mask_off: 0,
            handshaken: false,
        }
    }

    /// Whether a handshake completed on this codec.
    ///
    /// Advisory: the frame paths do not gate on it.
    #[inline]
    pub const fn is_handshaken(&self) -> bool { self.handshaken }

    /// Check if the parser sits between frames.
    #[inline]
    pub const fn is_awaiting_head(&self) -> bool {
        matches!(&self.read_state, ReadState::AwaitHead)
    }

    /// Check if the parser is inside a frame payload.
    #[inline]
    pub const fn is_reading_payload(&self) -> bool {
        matches!(&self.read_state, ReadState::ReadData { .. })
    }

    /// Drop the codec and get the reader and writer back.
    #[inline]
    pub fn into_inner(self) -> (R, W) { (self.reader, self.writer) }
}

impl<'b, R, W> std::fmt::Debug for Codec<'b, R, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec")
            .field("read_state", &self.read_state)
            .field("write_mask", &self.write_mask)
            .field("write_mask_off", &self.write_mask_off)
            .field("handshaken", &self.handshaken)
            .finish()
    }
}
