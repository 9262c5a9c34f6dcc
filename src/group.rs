//! Group composer
//!
//! Assembles condition sequences into the two shapes the runtime
//! understands: a core group (AND-combined) plus zero or more alt groups
//! (OR-combined against each other, AND-combined with the core).
//!
//! Authors may hand in arbitrarily nested sequences; this module is the
//! only place such nesting is flattened, order-preserving and depth-first.

use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::expr::Expr;

/// Condition input that may be arbitrarily nested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Logic {
    /// A single condition
    Cond(Condition),
    /// A nested sequence of inputs
    Group(Vec<Logic>),
}

impl Logic {
    /// Flattens this input into a flat ordered condition sequence,
    /// depth-first
    pub fn flatten(self) -> Vec<Condition> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(self, out: &mut Vec<Condition>) {
        match self {
            Logic::Cond(cond) => out.push(cond),
            Logic::Group(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }
}

impl From<Condition> for Logic {
    fn from(cond: Condition) -> Self {
        Logic::Cond(cond)
    }
}

impl From<Vec<Condition>> for Logic {
    fn from(conds: Vec<Condition>) -> Self {
        Logic::Group(conds.into_iter().map(Logic::Cond).collect())
    }
}

impl From<Vec<Logic>> for Logic {
    fn from(items: Vec<Logic>) -> Self {
        Logic::Group(items)
    }
}

impl From<Vec<Vec<Condition>>> for Logic {
    fn from(groups: Vec<Vec<Condition>>) -> Self {
        Logic::Group(groups.into_iter().map(Logic::from).collect())
    }
}

impl From<Expr> for Logic {
    fn from(expr: Expr) -> Self {
        Logic::from(expr.into_conditions())
    }
}

/// A core group and its alt groups
///
/// The core is implicitly ANDed with `alt1 OR alt2 OR … OR altN` when alts
/// exist; with no alts the core alone decides. Conditions are owned by
/// value; the whole structure is a pure tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LogicSet {
    /// AND-combined conditions always required
    pub core: Vec<Condition>,
    /// OR-combined alternative groups
    pub alts: Vec<Vec<Condition>>,
}

impl LogicSet {
    /// An empty logic set
    pub fn new() -> Self {
        LogicSet::default()
    }

    /// Builds a logic set from possibly nested core and alt inputs
    pub fn compose(core: impl Into<Logic>, alts: Vec<Logic>) -> Self {
        LogicSet {
            core: core.into().flatten(),
            alts: alts.into_iter().map(Logic::flatten).collect(),
        }
    }

    /// Appends conditions to the core group
    pub fn add_core(mut self, conditions: impl Into<Logic>) -> Self {
        self.core.extend(conditions.into().flatten());
        self
    }

    /// Appends a new alt group
    pub fn add_alt(mut self, conditions: impl Into<Logic>) -> Self {
        self.alts.push(conditions.into().flatten());
        self
    }

    /// True when neither the core nor any alt holds a condition
    pub fn is_empty(&self) -> bool {
        self.core.is_empty() && self.alts.is_empty()
    }
}
