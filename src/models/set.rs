//! Whole-set model and the persisted user-file text
//!
//! The artifact is line-oriented: a format-version line, a title line, then
//! one achievement or leaderboard entry per line. Reading and writing the
//! text are pure string transforms here; putting the text on disk is the
//! caller's concern.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Achievement, Leaderboard};

/// Format-version literal written as the first line
pub const FILE_VERSION: &str = "1.0";

/// A game's achievements and leaderboards
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AchievementSet {
    /// Game id the set belongs to
    pub game_id: u64,
    /// Set title written as the second line
    pub title: String,
    /// Achievements, in file order
    pub achievements: Vec<Achievement>,
    /// Leaderboards, in file order
    pub leaderboards: Vec<Leaderboard>,
}

impl AchievementSet {
    /// Creates an empty set
    pub fn new(game_id: u64, title: impl Into<String>) -> Self {
        AchievementSet {
            game_id,
            title: title.into(),
            achievements: Vec::new(),
            leaderboards: Vec::new(),
        }
    }

    /// Appends an achievement
    pub fn add_achievement(mut self, achievement: Achievement) -> Self {
        self.achievements.push(achievement);
        self
    }

    /// Appends a leaderboard
    pub fn add_leaderboard(mut self, leaderboard: Leaderboard) -> Self {
        self.leaderboards.push(leaderboard);
        self
    }

    /// Renders the full user-file text
    pub fn render_file(&self) -> Result<String> {
        let mut out = String::new();
        out.push_str(FILE_VERSION);
        out.push('\n');
        out.push_str(&self.title);
        out.push('\n');
        for achievement in &self.achievements {
            out.push_str(&achievement.render_line()?);
            out.push('\n');
        }
        for leaderboard in &self.leaderboards {
            out.push_str(&leaderboard.render_line()?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Parses user-file text back into a set
    ///
    /// Best-effort on non-entry content: code-note lines (`N0:`) and
    /// anything else unrecognized are skipped, matching how emulator user
    /// files interleave entry kinds.
    pub fn parse_file(game_id: u64, text: &str) -> Result<AchievementSet> {
        let mut lines = text.lines();
        let _version = lines.next().unwrap_or_default();
        let title = lines.next().unwrap_or_default().to_string();

        let mut set = AchievementSet::new(game_id, title);
        for line in lines {
            if line.starts_with('L') {
                set.leaderboards.push(Leaderboard::parse_line(line)?);
            } else if line.split(':').next().is_some_and(|id| {
                !id.is_empty() && id.chars().all(|c| c.is_ascii_digit())
            }) {
                set.achievements.push(Achievement::parse_line(line)?);
            }
        }
        Ok(set)
    }
}
