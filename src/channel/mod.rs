//! Chat surfaces.
//!
//! The terminal channel is the only surface; the web chat the original
//! product embeds is out of scope.

pub mod terminal;
