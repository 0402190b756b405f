use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::Codec;

use crate::error::Error;
use crate::frame::mask::apply_mask4;
use crate::frame::{FrameHead, Mask};

impl<'b, R, W: AsyncWrite + Unpin> Codec<'b, R, W> {
    /// Async version of [`write_frame_head`](Codec::write_frame_head).
    pub async fn write_frame_head_async(&mut self, head: FrameHead) -> Result<(), Error> {
        let n = head.encode(self.scratch)?;
        {
            let Codec {
                writer, scratch, ..
            } = &mut *self;
            writer.write_all(&scratch[..n]).await?;
        }

        self.write_mask = head.mask;
        self.write_mask_off = 0;
        Ok(())
    }

    /// Async version of [`write_payload`](Codec::write_payload).
    pub async fn write_payload_async(&mut self, data: &[u8]) -> Result<(), Error> {
        match self.write_mask {
            Mask::Key(key) => {
                let mut off = self.write_mask_off;
                {
                    let Codec {
                        writer, scratch, ..
                    } = &mut *self;

                    for part in data.chunks(scratch.len()) {
                        let staged = &mut scratch[..part.len()];
                        staged.copy_from_slice(part);
                        apply_mask4(key, staged, off);
                        writer.write_all(staged).await?;
                        off += part.len() as u64;
                    }
                }
                self.write_mask_off = off;
            }
            Mask::Skip | Mask::None => {
                self.writer.write_all(data).await?;
                self.write_mask_off += data.len() as u64;
            }
        }
        Ok(())
    }
}
