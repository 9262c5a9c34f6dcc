//! Condition model
//!
//! One encodable logic line: a left operand, an optional comparator and
//! right operand, a line-role flag, and an optional required hit count.
//! Conditions are immutable values; every modifier consumes the condition
//! and returns a new one, so a condition already placed in a group can
//! never change under the group's feet.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::memory::Operand;

/// Comparators understood by the runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
}

impl Comparison {
    /// Wire token for this comparator
    pub fn token(&self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Ne => "!=",
            Comparison::Gt => ">",
            Comparison::Ge => ">=",
            Comparison::Lt => "<",
            Comparison::Le => "<=",
        }
    }

    /// Decode candidate list, multi-character tokens before their
    /// single-character prefixes
    pub fn scan_order() -> &'static [Comparison] {
        &[
            Comparison::Ne,
            Comparison::Ge,
            Comparison::Le,
            Comparison::Eq,
            Comparison::Gt,
            Comparison::Lt,
        ]
    }
}

/// Role of a condition line within its group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Flag {
    /// Ordinary condition
    #[default]
    None,
    /// Pause the whole group while true
    PauseIf,
    /// Reset all hit counts while true
    ResetIf,
    /// Reset the next condition's hit count while true
    ResetNextIf,
    /// Add this condition's hits to the next condition's count
    AddHits,
    /// Subtract this condition's hits from the next condition's count
    SubHits,
    /// Add this operand to the running total
    AddSource,
    /// Subtract this operand from the running total
    SubSource,
    /// Use this operand's value as the next condition's base address
    AddAddress,
    /// Report this condition's value as the tracked quantity
    Measured,
    /// Report the tracked quantity as a percentage
    MeasuredPercent,
    /// Only count the measured value while this condition holds
    MeasuredIf,
    /// The achievement fires when this condition becomes true
    Trigger,
    /// AND this condition with the next one
    AndNext,
    /// OR this condition with the next one
    OrNext,
    /// Remember this value for `{recall}`
    Remember,
}

impl Flag {
    /// Wire prefix for this flag (empty for [`Flag::None`])
    pub fn prefix(&self) -> &'static str {
        match self {
            Flag::None => "",
            Flag::PauseIf => "P:",
            Flag::ResetIf => "R:",
            Flag::ResetNextIf => "Z:",
            Flag::AddHits => "C:",
            Flag::SubHits => "D:",
            Flag::AddSource => "A:",
            Flag::SubSource => "B:",
            Flag::AddAddress => "I:",
            Flag::Measured => "M:",
            Flag::MeasuredPercent => "G:",
            Flag::MeasuredIf => "Q:",
            Flag::Trigger => "T:",
            Flag::AndNext => "N:",
            Flag::OrNext => "O:",
            Flag::Remember => "K:",
        }
    }

    /// Look up the flag for its single-character wire code
    pub fn from_code(code: char) -> Option<Flag> {
        Some(match code {
            'P' => Flag::PauseIf,
            'R' => Flag::ResetIf,
            'Z' => Flag::ResetNextIf,
            'C' => Flag::AddHits,
            'D' => Flag::SubHits,
            'A' => Flag::AddSource,
            'B' => Flag::SubSource,
            'I' => Flag::AddAddress,
            'M' => Flag::Measured,
            'G' => Flag::MeasuredPercent,
            'Q' => Flag::MeasuredIf,
            'T' => Flag::Trigger,
            'N' => Flag::AndNext,
            'O' => Flag::OrNext,
            'K' => Flag::Remember,
            _ => return None,
        })
    }

    /// Human-readable name, used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            Flag::None => "none",
            Flag::PauseIf => "pause-if",
            Flag::ResetIf => "reset-if",
            Flag::ResetNextIf => "reset-next-if",
            Flag::AddHits => "add-hits",
            Flag::SubHits => "sub-hits",
            Flag::AddSource => "add-source",
            Flag::SubSource => "sub-source",
            Flag::AddAddress => "add-address",
            Flag::Measured => "measured",
            Flag::MeasuredPercent => "measured-percent",
            Flag::MeasuredIf => "measured-if",
            Flag::Trigger => "trigger",
            Flag::AndNext => "and-next",
            Flag::OrNext => "or-next",
            Flag::Remember => "remember",
        }
    }

    /// Flags that make no sense without a comparison on the same line
    pub fn requires_comparison(&self) -> bool {
        matches!(self, Flag::Trigger | Flag::ResetIf | Flag::PauseIf)
    }
}

/// One logic line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Condition {
    /// Left operand
    pub left: Operand,
    /// Comparator, when the line carries a comparison
    pub cmp: Option<Comparison>,
    /// Right operand, present exactly when `cmp` is
    pub right: Option<Operand>,
    /// Line role
    pub flag: Flag,
    /// Required hit count; 0 means no hit requirement
    pub hits: u32,
}

impl Condition {
    /// A bare condition carrying only a left operand
    pub fn new(left: impl Into<Operand>) -> Self {
        Condition {
            left: left.into(),
            cmp: None,
            right: None,
            flag: Flag::None,
            hits: 0,
        }
    }

    /// A full comparison condition
    pub fn compare(
        left: impl Into<Operand>,
        cmp: Comparison,
        right: impl Into<Operand>,
    ) -> Self {
        Condition {
            left: left.into(),
            cmp: Some(cmp),
            right: Some(right.into()),
            flag: Flag::None,
            hits: 0,
        }
    }

    /// Returns this condition with a different line role
    pub fn with_flag(self, flag: Flag) -> Self {
        Condition { flag, ..self }
    }

    /// Returns this condition with a required hit count
    pub fn with_hits(self, hits: u32) -> Self {
        Condition { hits, ..self }
    }

    /// Returns this condition with a comparison attached
    pub fn with_cmp(self, cmp: Comparison, right: impl Into<Operand>) -> Self {
        Condition {
            cmp: Some(cmp),
            right: Some(right.into()),
            ..self
        }
    }

    /// Canonical wire token for this condition line
    ///
    /// Fails with [`Error::MissingComparison`] when a trigger/reset/pause
    /// flag is present without a right operand; the flag is never silently
    /// dropped.
    pub fn render(&self) -> Result<String> {
        if self.flag.requires_comparison() && self.right.is_none() {
            return Err(Error::MissingComparison {
                flag: self.flag.name(),
                operand: self.left.render(),
            });
        }

        let mut out = String::new();
        out.push_str(self.flag.prefix());
        out.push_str(&self.left.render());
        if let (Some(cmp), Some(right)) = (&self.cmp, &self.right) {
            out.push_str(cmp.token());
            out.push_str(&right.render());
        }
        if self.hits > 0 {
            out.push('.');
            out.push_str(&self.hits.to_string());
            out.push('.');
        }
        Ok(out)
    }
}
