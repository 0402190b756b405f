use crate::frame::Mask;

/// Read state.
///
/// Together with the scratch buffer this is the only state carried
/// between calls; no payload bytes and no borrowed slices survive an
/// event.
#[derive(Debug, Clone, Copy)]
pub(super) enum ReadState {
    /// Between frames, ready for the next head.
    AwaitHead,
    /// Inside a frame payload.
    ReadData {
        /// total payload length of the current frame
        need: u64,
        /// bytes already handed out
        read: u64,
        /// key received with the head, applied at absolute offsets
        mask: Mask,
    },
}

impl ReadState {
    #[inline]
    pub const fn new() -> Self { ReadState::AwaitHead }
}
