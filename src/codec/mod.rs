//! Wire codec for achievement logic
//!
//! Renders the condition/group model into the compact MemAddr text the
//! validation runtime consumes, and parses that text back. Both directions
//! share one set of grammar tables (size codes, flag codes, comparator
//! tokens), so anything encode produces decode reads back bit-exact.

mod decode;
mod encode;

pub use decode::{decode_condition, decode_logic};
pub use encode::{encode_condition, encode_group, encode_logic};
