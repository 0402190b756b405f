use std::io::{ErrorKind, Result as IoResult};

use tokio::io::{AsyncRead, AsyncReadExt};

use super::state::ReadState;
use super::{Chunk, Codec, Event};

use crate::error::Error;
use crate::frame::mask::apply_mask4;
use crate::frame::{FrameHead, Mask, PayloadLen};

/// Async version of `read_exact_or_eof`.
async fn read_exact_or_eof<R>(io: &mut R, buf: &mut [u8]) -> IoResult<bool>
where
    R: AsyncRead + Unpin,
{
    match io.read_exact(buf).await {
        Ok(_) => Ok(true),
        Err(ref e) if e.kind() == ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}

impl<'b, R: AsyncRead + Unpin, W> Codec<'b, R, W> {
    /// Async version of [`read_event`](Codec::read_event).
    pub async fn read_event_async(&mut self) -> Result<Event<'_>, Error> {
        match self.read_state {
            ReadState::AwaitHead => self.read_head_async().await,
            ReadState::ReadData { .. } => self.read_chunk_async().await,
        }
    }

    async fn read_head_async(&mut self) -> Result<Event<'_>, Error> {
        let head = {
            let Codec {
                reader, scratch, ..
            } = &mut *self;

            if !read_exact_or_eof(reader, &mut scratch[..2]).await? {
                return Ok(Event::Closed);
            }

            let more = PayloadLen::from_flag(scratch[1]).extended_len()
                + Mask::from_flag(scratch[1]).key_len();

            if !read_exact_or_eof(reader, &mut scratch[2..2 + more]).await? {
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

        Ok(Event::Head(FrameHead {
            mask: Mask::None,
            ..head
        }))
    }

    async fn read_chunk_async(&mut self) -> Result<Event<'_>, Error> {
        let (need, read, mask) = match self.read_state {
            ReadState::ReadData { need, read, mask } => (need, read, mask),
            ReadState::AwaitHead => unreachable!(),
        };
        let left = need - read;

        if left <= self.scratch.len() as u64 {
            let n = left as usize;

            let ok = {
                let Codec {
                    reader, scratch, ..
                } = &mut *self;
                read_exact_or_eof(reader, &mut scratch[..n]).await?
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
            let n = {
                let Codec {
                    reader, scratch, ..
                } = &mut *self;
                reader.read(scratch).await?
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
