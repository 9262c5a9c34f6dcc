//! Authoring models
//!
//! Achievements, leaderboards, whole sets, and rich presence scripts. These
//! wrap the condition/group model with the metadata and entry-line grammar
//! the runtime's local files use.

mod achievement;
mod leaderboard;
mod rich_presence;
mod set;

pub use achievement::Achievement;
pub use leaderboard::{Leaderboard, LeaderboardFormat};
pub use rich_presence::RichPresence;
pub use set::AchievementSet;
