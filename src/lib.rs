//! # cheevos — RetroAchievements logic authoring and codec
//!
//! A toolkit for describing game-memory achievement logic (comparisons on
//! emulator memory addresses with transforms, hit counters and
//! boolean-combination flags) and emitting it as the compact line-oriented
//! MemAddr text an achievement-validation runtime consumes. The codec is
//! bit-exact in both directions: the runtime accepts only the exact
//! grammar, so `decode(encode(x)) == x` structurally and
//! `encode(decode(s)) == s` for anything this crate encodes.
//!
//! ## Quick start
//!
//! ```rust
//! use cheevos::memory::{byte, lit};
//! use cheevos::{encode_logic, decode_logic, Flag, LogicSet};
//!
//! # fn main() -> cheevos::Result<()> {
//! // Stage 3 reached without taking damage, with an alt for hard mode.
//! let set = LogicSet::new()
//!     .add_core(vec![
//!         byte(0x00d0).eq(lit(3)),
//!         byte(0x00c0).eq(lit(100)).with_flag(Flag::PauseIf),
//!     ])
//!     .add_alt(byte(0x00a1).eq(lit(2)));
//!
//! let wire = encode_logic(&set)?;
//! assert_eq!(wire, "0xH00d0=3_P:0xH00c0=100_S_0xH00a1=2");
//! assert_eq!(decode_logic(&wire)?, set);
//! # Ok(())
//! # }
//! ```
//!
//! ## Expressions
//!
//! Multi-term arithmetic and pointer indirection lower to ordered condition
//! sequences rather than a single line:
//!
//! ```rust
//! use cheevos::memory::{byte, dword, lit};
//!
//! // (byte(0x10) + byte(0x20)) > 50
//! let sum = byte(0x10).plus(byte(0x20)).gt(lit(50));
//! assert_eq!(sum.len(), 2);
//!
//! // Read dword(0x1000), use it as the base address for byte(+0x20).
//! let coins = dword(0x1000).point_to(byte(0x20)).ge(lit(50));
//! assert_eq!(coins[0].render().unwrap(), "I:0xX1000");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! MemRef/Operand → Condition → Expr lowering → LogicSet → wire text
//!                                  (authoring direction)
//! wire text → LogicSet → emitted builder source
//!                                  (import direction)
//! ```
//!
//! ### Main components
//!
//! - [`memory`] — memory reference model: sizes, transforms, operands
//! - [`Condition`] — one encodable logic line
//! - [`Expr`] — arithmetic / pointer-chain accumulator
//! - [`LogicSet`] — core + alt group composer
//! - [`codec`] — encode/decode between the model and wire text
//! - [`models`] — achievements, leaderboards, sets, rich presence
//! - [`notes`] — code-note import heuristics
//! - [`emit`] — regenerates builder source from decoded models
//!
//! The codec is a pure, synchronous transformation: no I/O, no shared
//! mutable state, safe to call concurrently from independent call sites.

/// Version of the cheevos crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod codec;
pub mod condition;
pub mod emit;
pub mod error;
pub mod expr;
pub mod group;
pub mod memory;
pub mod models;
pub mod notes;

// Re-export main types
pub use codec::{decode_condition, decode_logic, encode_condition, encode_group, encode_logic};
pub use condition::{Comparison, Condition, Flag};
pub use error::{Error, Result};
pub use expr::Expr;
pub use group::{Logic, LogicSet};
pub use memory::{MemRef, MemSize, Operand, Transform};
pub use models::{Achievement, AchievementSet, Leaderboard, LeaderboardFormat, RichPresence};
