// #![warn(missing_docs)]

//! Streaming websocket client codec.
//!
//! [RFC-6455](https://datatracker.ietf.org/doc/html/rfc6455), client
//! role only: upgrade handshake, then frame-level events over a
//! caller-supplied reader/writer pair and scratch buffer. No heap
//! allocation, no whole-message buffering.

mod bleed;

pub mod codec;
pub mod error;
pub mod frame;
pub mod handshake;
