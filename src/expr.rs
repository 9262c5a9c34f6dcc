//! Expression accumulator
//!
//! Builds multi-term arithmetic (chained add/subtract collapsing into one
//! final comparison) and pointer-indirection chains. Both lower to an
//! ordered sequence of [`Condition`]s, not a single one. The accumulator is
//! a transient builder: it is consumed exactly once when a comparator (or a
//! measured lowering) is applied, and term order is significant, since the
//! runtime evaluates the chain top to bottom.

use crate::condition::{Comparison, Condition, Flag};
use crate::memory::{MemRef, Operand, Transform};

/// Role of one accumulated term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TermRole {
    /// Added to the running total
    Add,
    /// Subtracted from the running total
    Sub,
    /// Read as a base address for the following term
    Indirect,
}

impl TermRole {
    fn flag(&self) -> Flag {
        match self {
            TermRole::Add => Flag::AddSource,
            TermRole::Sub => Flag::SubSource,
            TermRole::Indirect => Flag::AddAddress,
        }
    }
}

/// An in-progress arithmetic or pointer chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    terms: Vec<(Operand, TermRole)>,
}

impl Expr {
    /// Starts a chain from a single operand
    pub fn of(operand: impl Into<Operand>) -> Self {
        Expr {
            terms: vec![(operand.into(), TermRole::Add)],
        }
    }

    /// Appends an operand added to the running total
    pub fn plus(mut self, operand: impl Into<Operand>) -> Self {
        self.terms.push((operand.into(), TermRole::Add));
        self
    }

    /// Appends an operand subtracted from the running total
    pub fn minus(mut self, operand: impl Into<Operand>) -> Self {
        self.terms.push((operand.into(), TermRole::Sub));
        self
    }

    /// Pointer indirection: the current tail becomes the base address read
    /// and `target` is the operand finally dereferenced
    ///
    /// Chaining re-flags every interior hop, so only the terminal hop ends
    /// up as the comparison target or accumulation term.
    pub fn point_to(mut self, target: impl Into<Operand>) -> Self {
        if let Some(last) = self.terms.last_mut() {
            last.1 = TermRole::Indirect;
        }
        self.terms.push((target.into(), TermRole::Add));
        self
    }

    /// Applies the delta transform to the most recently appended term
    pub fn delta(self) -> Self {
        self.transform_last(Transform::Delta)
    }

    /// Applies the prior transform to the most recently appended term
    pub fn prior(self) -> Self {
        self.transform_last(Transform::Prior)
    }

    /// Applies the BCD transform to the most recently appended term
    pub fn bcd(self) -> Self {
        self.transform_last(Transform::Bcd)
    }

    /// Applies the invert transform to the most recently appended term
    pub fn invert(self) -> Self {
        self.transform_last(Transform::Invert)
    }

    fn transform_last(mut self, transform: Transform) -> Self {
        if let Some((Operand::Mem(mem), _)) = self.terms.last_mut() {
            mem.transform = transform;
        }
        self
    }

    /// Lowers the chain into conditions, attaching the comparison to the
    /// final term
    ///
    /// Every term but the last becomes a standalone comparator-less
    /// condition flagged by its role. A subtracted final term nets out
    /// through the accumulator first, so it is followed by a
    /// `0 <cmp> rhs` line instead of carrying the comparator itself.
    pub fn compare(self, cmp: Comparison, rhs: impl Into<Operand>) -> Vec<Condition> {
        let rhs = rhs.into();
        let mut out = Vec::with_capacity(self.terms.len() + 1);
        let last_index = self.terms.len() - 1;

        for (i, (operand, role)) in self.terms.into_iter().enumerate() {
            if i < last_index {
                out.push(Condition::new(operand).with_flag(role.flag()));
            } else if role == TermRole::Sub {
                out.push(Condition::new(operand).with_flag(Flag::SubSource));
                out.push(Condition::compare(Operand::Literal(0), cmp, rhs));
            } else {
                out.push(Condition::compare(operand, cmp, rhs));
            }
        }
        out
    }

    /// Lowers the chain with no comparison, flagging the final term as the
    /// measured quantity (leaderboard values, measured chains)
    pub fn measured(self) -> Vec<Condition> {
        let last_index = self.terms.len() - 1;
        self.terms
            .into_iter()
            .enumerate()
            .map(|(i, (operand, role))| {
                if i < last_index {
                    Condition::new(operand).with_flag(role.flag())
                } else {
                    Condition::new(operand).with_flag(Flag::Measured)
                }
            })
            .collect()
    }

    /// Lowers the chain into the raw flagged conditions without a trailing
    /// comparison or measured marker; every term carries its role flag
    pub fn into_conditions(self) -> Vec<Condition> {
        self.terms
            .into_iter()
            .map(|(operand, role)| Condition::new(operand).with_flag(role.flag()))
            .collect()
    }

    /// `chain = rhs`
    pub fn eq(self, rhs: impl Into<Operand>) -> Vec<Condition> {
        self.compare(Comparison::Eq, rhs)
    }

    /// `chain != rhs`
    pub fn ne(self, rhs: impl Into<Operand>) -> Vec<Condition> {
        self.compare(Comparison::Ne, rhs)
    }

    /// `chain > rhs`
    pub fn gt(self, rhs: impl Into<Operand>) -> Vec<Condition> {
        self.compare(Comparison::Gt, rhs)
    }

    /// `chain >= rhs`
    pub fn ge(self, rhs: impl Into<Operand>) -> Vec<Condition> {
        self.compare(Comparison::Ge, rhs)
    }

    /// `chain < rhs`
    pub fn lt(self, rhs: impl Into<Operand>) -> Vec<Condition> {
        self.compare(Comparison::Lt, rhs)
    }

    /// `chain <= rhs`
    pub fn le(self, rhs: impl Into<Operand>) -> Vec<Condition> {
        self.compare(Comparison::Le, rhs)
    }
}

impl From<MemRef> for Expr {
    fn from(mem: MemRef) -> Self {
        Expr::of(mem)
    }
}

impl From<Operand> for Expr {
    fn from(operand: Operand) -> Self {
        Expr::of(operand)
    }
}
