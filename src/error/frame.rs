use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq, Eq)]
pub enum FrameError {
    NotEnoughData,

    NotEnoughCapacity,
}

impl Display for FrameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use FrameError::*;
        match self {
            NotEnoughData => write!(f, "Not enough data to parse"),
            NotEnoughCapacity => write!(f, "Not enough space to write to"),
        }
    }
}

// use default impl
impl std::error::Error for FrameError {}
