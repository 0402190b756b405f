use std::io::{ErrorKind, Read, Result as IoResult};

use super::state::ReadState;
use super::{Chunk, Codec, Event};

use crate::error::Error;
use crate::frame::mask::apply_mask4;
use crate::frame::{FrameHead, Mask, PayloadLen};

/// Exact read, reporting EOF as `Ok(false)` instead of an error.
///
/// A short read means the peer hung up mid-frame; the distinction from
/// a clean close between frames is the caller's to make.
fn read_exact_or_eof<R: Read>(io: &mut R, buf: &mut [u8]) -> IoResult<bool> {
    match io.read_exact(buf) {
        Ok(()) => Ok(true),
        Err(ref e) if e.kind() == ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}

impl<'b, R: Read, W> Codec<'b, R, W> {
    /// Pull the next event from the stream.
    ///
    /// Between frames this reads and decodes one frame head and returns
    /// [`Event::Head`]; a zero-length frame stays between frames, so the
    /// next call produces the following head and no empty chunk is
    /// emitted. Inside a frame each call returns one [`Event::Chunk`]
    /// of at most the scratch buffer's size, de-masked at its absolute
    /// payload offset, with `last` set on the chunk that completes the
    /// frame.
    ///
    /// EOF is surfaced as [`Event::Closed`], not as an error.
    ///
    /// The chunk slice borrows the scratch buffer and is overwritten by
    /// the next call; callers keeping payload around must copy it out.
    ///
    /// Frames are surfaced as received: RSV bits, reserved opcodes and
    /// control frames are reported, never answered or rejected here.
    pub fn read_event(&mut self) -> Result<Event<'_>, Error> {
        match self.read_state {
            ReadState::AwaitHead => self.read_head(),
            ReadState::ReadData { .. } => self.read_chunk(),
        }
    }

    fn read_head(&mut self) -> Result<Event<'_>, Error> {
        let head = {
            let Codec {
                reader, scratch, ..
            } = &mut *self;

            if !read_exact_or_eof(reader, &mut scratch[..2])? {
                return Ok(Event::Closed);
            }

            // how much of the head is still on the wire
            let more = PayloadLen::from_flag(scratch[1]).extended_len()
                + Mask::from_flag(scratch[1]).key_len();

            if !read_exact_or_eof(reader, &mut scratch[2..2 + more])? {
                return Ok(Event::Closed);
            }

            let (head, _) = FrameHead::decode(&scratch[..2 + more])?;
            head
        };

        let length = head.length.to_num();
        if length > 0 {
            self.read_state = ReadState::ReadData {
                need: length,
                read: 0,
                mask: head.mask,
            };
        }

        // the mask key stays inside the parser
        Ok(Event::Head(FrameHead {
            mask: Mask::None,
            ..head
        }))
    }

    fn read_chunk(&mut self) -> Result<Event<'_>, Error> {
        let (need, read, mask) = match self.read_state {
            ReadState::ReadData { need, read, mask } => (need, read, mask),
            ReadState::AwaitHead => unreachable!(),
        };
        let left = need - read;

        if left <= self.scratch.len() as u64 {
            // the rest of the payload fits, finish the frame
            let n = left as usize;

            let ok = {
                let Codec {
                    reader, scratch, ..
                } = &mut *self;
                read_exact_or_eof(reader, &mut scratch[..n])?
            };
            if !ok {
                return Ok(Event::Closed);
            }

            if let Mask::Key(key) = mask {
                apply_mask4(key, &mut self.scratch[..n], read);
            }

            self.read_state = ReadState::new();

            Ok(Event::Chunk(Chunk {
                data: &self.scratch[..n],
                last: true,
            }))
        } else {
            let n = loop {
                let Codec {
                    reader, scratch, ..
                } = &mut *self;
                match reader.read(scratch) {
                    Ok(n) => break n,
                    Err(ref e) if e.kind() == ErrorKind::Interrupted => {}
                    Err(e) => return Err(e.into()),
                }
            };
            if n == 0 {
                return Ok(Event::Closed);
            }

            if let Mask::Key(key) = mask {
                apply_mask4(key, &mut self.scratch[..n], read);
            }

            self.read_state = ReadState::ReadData {
                need,
                read: read + n as u64,
                mask,
            };

            Ok(Event::Chunk(Chunk {
                data: &self.scratch[..n],
                last: false,
            }))
        }
    }
}
