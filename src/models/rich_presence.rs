//! Rich presence script model
//!
//! Lookup tables plus display lines; conditional displays reuse the
//! condition codec for their `?<logic>?` guards.

use serde::{Deserialize, Serialize};

use crate::codec::encode_group;
use crate::condition::Condition;
use crate::error::Result;
use crate::group::Logic;
use crate::memory::MemRef;

/// One display line, optionally guarded by conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Display {
    /// Guard conditions; empty means unconditional
    conditions: Vec<Condition>,
    /// Display text, usually containing `@Lookup(...)` placeholders
    text: String,
}

/// A rich presence script
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RichPresence {
    /// Named value → label tables, in insertion order
    lookups: Vec<(String, Vec<(i64, String)>)>,
    /// Display lines, in priority order
    displays: Vec<Display>,
}

impl RichPresence {
    /// Creates an empty script
    pub fn new() -> Self {
        RichPresence::default()
    }

    /// Adds a named lookup table
    pub fn add_lookup(mut self, name: impl Into<String>, entries: Vec<(i64, String)>) -> Self {
        self.lookups.push((name.into(), entries));
        self
    }

    /// Adds an unconditional display line
    pub fn add_display(mut self, text: impl Into<String>) -> Self {
        self.displays.push(Display {
            conditions: Vec::new(),
            text: text.into(),
        });
        self
    }

    /// Adds a display line shown only while the conditions hold
    pub fn add_conditional_display(
        mut self,
        conditions: impl Into<Logic>,
        text: impl Into<String>,
    ) -> Self {
        self.displays.push(Display {
            conditions: conditions.into().flatten(),
            text: text.into(),
        });
        self
    }

    /// Placeholder reading `mem` through the named lookup table
    pub fn lookup(name: &str, mem: MemRef) -> String {
        format!("@{}(0x{:x})", name, mem.address)
    }

    /// Placeholder reading `mem` through a value format (e.g. `VALUE`)
    pub fn value_of(format: &str, mem: MemRef) -> String {
        format!("@{}(0x{:x})", format, mem.address)
    }

    /// Renders the script text
    pub fn render(&self) -> Result<String> {
        let mut lines = Vec::new();

        for (name, entries) in &self.lookups {
            lines.push(format!("Lookup:{name}"));
            for (value, label) in entries {
                lines.push(format!("{value}={label}"));
            }
            lines.push(String::new());
        }

        lines.push("Display:".to_string());
        for display in &self.displays {
            if display.conditions.is_empty() {
                lines.push(display.text.clone());
            } else {
                let guard = encode_group(&display.conditions)?;
                lines.push(format!("?{}?{}", guard, display.text));
            }
        }

        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{byte, lit};

    #[test]
    fn test_render_script() {
        let rp = RichPresence::new()
            .add_lookup(
                "Stage",
                vec![(1, "Green Hill".to_string()), (2, "Marble Zone".to_string())],
            )
            .add_conditional_display(
                byte(0xa1).eq(lit(0)),
                format!("Paused in {}", RichPresence::lookup("Stage", byte(0xd0))),
            )
            .add_display(format!("Playing {}", RichPresence::lookup("Stage", byte(0xd0))));

        assert_eq!(
            rp.render().unwrap(),
            "Lookup:Stage\n1=Green Hill\n2=Marble Zone\n\nDisplay:\n\
             ?0xH00a1=0?Paused in @Stage(0xd0)\nPlaying @Stage(0xd0)"
        );
    }
}
