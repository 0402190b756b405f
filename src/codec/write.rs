use std::io::Write;

use super::Codec;

use crate::error::Error;
use crate::frame::mask::apply_mask4;
use crate::frame::{FrameHead, Mask};

impl<'b, R, W: Write> Codec<'b, R, W> {
    /// Write a frame head.
    ///
    /// The head's mask becomes the active write mask and the key stream
    /// offset restarts, so the payload bytes that follow mask as one
    /// contiguous run. A client must pass a fresh [`Mask::Key`] per
    /// frame (see [`new_rand_key`](crate::frame::mask::new_rand_key)).
    pub fn write_frame_head(&mut self, head: FrameHead) -> Result<(), Error> {
        // a head is at most 14 bytes, the scratch buffer always fits it
        let n = head.encode(self.scratch)?;
        self.writer.write_all(&self.scratch[..n])?;

        self.write_mask = head.mask;
        self.write_mask_off = 0;
        Ok(())
    }

    /// Write payload bytes for the current frame.
    ///
    /// With an active key the bytes are staged through the scratch
    /// buffer and masked there; `data` itself is never modified. Several
    /// calls may follow one head, the mask offset carries across them.
    /// Whether the total matches the head's declared length is the
    /// caller's contract, it is not checked here.
    pub fn write_payload(&mut self, data: &[u8]) -> Result<(), Error> {
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
                        writer.write_all(staged)?;
                        off += part.len() as u64;
                    }
                }
                self.write_mask_off = off;
            }
            // a zero or absent key leaves the bytes unchanged
            Mask::Skip | Mask::None => {
                self.writer.write_all(data)?;
                self.write_mask_off += data.len() as u64;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::frame::mask::apply_mask;
    use crate::frame::{Fin, OpCode, PayloadLen};

    fn codec_into(
        scratch: &mut [u8],
    ) -> Codec<'_, std::io::Empty, Vec<u8>> {
        Codec::new(scratch, std::io::empty(), Vec::new())
    }

    fn binary_head(mask: Mask, len: u64) -> FrameHead {
        FrameHead::new(Fin::Y, OpCode::Binary, mask, PayloadLen::from_num(len))
    }

    #[test]
    fn unmasked_frame_bytes() {
        let mut scratch = [0u8; 32];
        let mut codec = codec_into(&mut scratch);

        codec
            .write_frame_head(binary_head(Mask::None, 13))
            .unwrap();
        codec.write_payload(b"Hello, World!").unwrap();

        let (_, wire) = codec.into_inner();
        assert_eq!(&wire, b"\x82\x0dHello, World!");
    }

    #[test]
    fn length_encodings() {
        for (len, flag, ext) in [
            (0_u64, 0x00_u8, 0),
            (125, 0x7d, 0),
            (126, 0x7e, 2),
            (65535, 0x7e, 2),
            (65536, 0x7f, 8),
        ] {
            let mut scratch = [0u8; 32];
            let mut codec = codec_into(&mut scratch);
            codec
                .write_frame_head(binary_head(Mask::None, len))
                .unwrap();

            let (_, wire) = codec.into_inner();
            assert_eq!(wire.len(), 2 + ext);
            assert_eq!(wire[1], flag);
            match ext {
                2 => assert_eq!(u16::from_be_bytes([wire[2], wire[3]]) as u64, len),
                8 => assert_eq!(
                    u64::from_be_bytes(wire[2..10].try_into().unwrap()),
                    len
                ),
                _ => {}
            }
        }
    }

    #[test]
    fn masked_payload_leaves_caller_buffer_alone() {
        let key = [0xde, 0xad, 0xbe, 0xef];
        let data: Vec<u8> = (0..200).map(|i| i as u8).collect();
        let before = data.clone();

        let mut scratch = [0u8; 32];
        let mut codec = codec_into(&mut scratch);
        codec
            .write_frame_head(binary_head(Mask::Key(key), 200))
            .unwrap();
        codec.write_payload(&data).unwrap();

        assert_eq!(data, before);

        let (_, wire) = codec.into_inner();
        assert_eq!(wire.len(), 2 + 2 + 4 + 200);
        assert_eq!(&wire[4..8], &key);

        let mut payload = wire[8..].to_vec();
        apply_mask(key, &mut payload, 0);
        assert_eq!(payload, data);
    }

    #[test]
    fn masked_offset_carries_across_calls() {
        let key = [0x12, 0x34, 0x56, 0x78];
        let data: Vec<u8> = (0..157).map(|i| (i * 7) as u8).collect();

        // whole payload in one call
        let mut scratch = [0u8; 32];
        let mut codec = codec_into(&mut scratch);
        codec
            .write_frame_head(binary_head(Mask::Key(key), data.len() as u64))
            .unwrap();
        codec.write_payload(&data).unwrap();
        let (_, whole) = codec.into_inner();

        // same payload split at every position
        for split in 0..=data.len() {
            let mut scratch = [0u8; 32];
            let mut codec = codec_into(&mut scratch);
            codec
                .write_frame_head(binary_head(Mask::Key(key), data.len() as u64))
                .unwrap();
            codec.write_payload(&data[..split]).unwrap();
            codec.write_payload(&data[split..]).unwrap();

            let (_, wire) = codec.into_inner();
            assert_eq!(wire, whole);
        }
    }

    #[test]
    fn skip_mask_sets_bit_with_zero_key() {
        let mut scratch = [0u8; 32];
        let mut codec = codec_into(&mut scratch);
        codec.write_frame_head(binary_head(Mask::Skip, 2)).unwrap();
        codec.write_payload(b"ok").unwrap();

        let (_, wire) = codec.into_inner();
        assert_eq!(&wire, b"\x82\x82\x00\x00\x00\x00ok");
    }

    #[test]
    fn head_resets_mask_state() {
        let key = [1, 2, 3, 4];
        let mut scratch = [0u8; 32];
        let mut codec = codec_into(&mut scratch);

        codec
            .write_frame_head(binary_head(Mask::Key(key), 3))
            .unwrap();
        codec.write_payload(b"abc").unwrap();

        // next frame is unmasked, bytes must pass through untouched
        codec.write_frame_head(binary_head(Mask::None, 3)).unwrap();
        codec.write_payload(b"xyz").unwrap();

        let (_, wire) = codec.into_inner();
        assert_eq!(&wire[wire.len() - 5..], b"\x82\x03xyz");
    }
}
