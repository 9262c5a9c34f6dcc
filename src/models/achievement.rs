//! Achievement model and entry-line grammar

use serde::{Deserialize, Serialize};

use crate::codec::{decode_logic, encode_logic};
use crate::error::{Error, Result};
use crate::group::{Logic, LogicSet};

/// Default author stamped on rendered entries
pub const DEFAULT_AUTHOR: &str = "cheevos";

/// Number of fields following the quoted mem string in an entry line:
/// title, description, three reserved, author, points, four reserved, badge
const TAIL_FIELDS: usize = 12;

/// One achievement: metadata plus its logic set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    /// Site or local id
    pub id: u64,
    /// Display title
    pub title: String,
    /// Display description
    pub description: String,
    /// Point value
    pub points: u32,
    /// Badge image name
    pub badge: String,
    /// Author name stamped into the entry line
    pub author: String,
    /// The condition logic
    pub logic: LogicSet,
}

impl Achievement {
    /// Creates an achievement with default id, badge and author
    pub fn new(title: impl Into<String>, description: impl Into<String>, points: u32) -> Self {
        Achievement {
            id: 1,
            title: title.into(),
            description: description.into(),
            points,
            badge: "00000".to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            logic: LogicSet::new(),
        }
    }

    /// Returns this achievement with a different id
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    /// Returns this achievement with a badge name
    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = badge.into();
        self
    }

    /// Returns this achievement with an author name
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Appends conditions (possibly nested) to the core group
    pub fn add_core(mut self, conditions: impl Into<Logic>) -> Self {
        self.logic = self.logic.add_core(conditions);
        self
    }

    /// Appends a new alt group
    pub fn add_alt(mut self, conditions: impl Into<Logic>) -> Self {
        self.logic = self.logic.add_alt(conditions);
        self
    }

    /// Renders the persisted entry line:
    /// `<id>:"<mem>":<title>:<description>::::<author>:<points>:::::<badge>`
    pub fn render_line(&self) -> Result<String> {
        let mem = encode_logic(&self.logic)?;
        Ok(format!(
            "{}:\"{}\":{}:{}::::{}:{}:::::{}",
            self.id, mem, self.title, self.description, self.author, self.points, self.badge
        ))
    }

    /// Parses a persisted entry line back into an achievement
    ///
    /// Quote-aware: the mem string contains `:` after flag codes, so the id
    /// and mem are scanned first and only the remainder is field-split.
    /// A description containing `:` survives because the field count after
    /// it is fixed; a title containing `:` does not.
    pub fn parse_line(line: &str) -> Result<Achievement> {
        let (id_text, rest) = line
            .split_once(':')
            .ok_or_else(|| Error::malformed_line(line, "missing id separator"))?;
        let id = id_text
            .parse::<u64>()
            .map_err(|_| Error::malformed_line(line, format!("bad id `{id_text}`")))?;

        let rest = rest
            .strip_prefix('"')
            .ok_or_else(|| Error::malformed_line(line, "mem string must be quoted"))?;
        let (mem, rest) = rest
            .split_once('"')
            .ok_or_else(|| Error::malformed_line(line, "unterminated mem string"))?;
        let logic = decode_logic(mem)?;

        let rest = rest
            .strip_prefix(':')
            .ok_or_else(|| Error::malformed_line(line, "missing fields after mem string"))?;
        let fields: Vec<&str> = rest.split(':').collect();
        if fields.len() < TAIL_FIELDS {
            return Err(Error::malformed_line(
                line,
                format!("expected {TAIL_FIELDS} fields after mem, found {}", fields.len()),
            ));
        }

        let extra = fields.len() - TAIL_FIELDS;
        let title = fields[0].to_string();
        let description = fields[1..=1 + extra].join(":");
        let author = fields[5 + extra].to_string();
        let points = fields[6 + extra]
            .parse::<u32>()
            .map_err(|_| Error::malformed_line(line, "bad points value"))?;
        let badge = fields[11 + extra].to_string();

        Ok(Achievement {
            id,
            title,
            description,
            points,
            badge,
            author,
            logic,
        })
    }
}
