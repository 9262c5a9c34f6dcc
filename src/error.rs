//! Error types for the achievement logic codec

use thiserror::Error;

/// Codec and model errors
///
/// Every failure is local and recoverable: the offending raw token or value
/// is attached so a caller can correct the input. The codec never retries
/// and never corrupts output already produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A flag that gates the whole group was encoded without a comparison
    ///
    /// **Triggered by:** rendering a condition with `Trigger`, `ResetIf` or
    /// `PauseIf` and no right operand
    /// **Example:** `Condition::new(byte(0x10)).with_flag(Flag::Trigger)`
    #[error("flag {flag} requires a comparison (left operand `{operand}`)")]
    MissingComparison {
        /// Name of the offending flag
        flag: &'static str,
        /// Rendered form of the left operand
        operand: String,
    },

    /// Decode met a memory size code outside the grammar table
    ///
    /// **Example:** `0xZ0010=1` (`Z` is not a size code)
    #[error("unknown memory size code `{code}` in `{token}`")]
    UnknownSizeCode {
        /// The unrecognized size code
        code: String,
        /// The condition token it appeared in
        token: String,
    },

    /// Decode met a condition flag code outside the grammar table
    ///
    /// **Example:** `X:0xH0010=1` (`X` is not a flag code)
    #[error("unknown condition flag code `{code}` in `{token}`")]
    UnknownFlagCode {
        /// The unrecognized flag code
        code: String,
        /// The condition token it appeared in
        token: String,
    },

    /// Decode could not split a token into flag/operand/comparator/hits
    #[error("malformed condition `{token}`: {reason}")]
    MalformedCondition {
        /// The raw condition token
        token: String,
        /// What went wrong
        reason: String,
    },

    /// A group that must carry conditions is empty
    ///
    /// **Triggered by:** rendering a leaderboard whose `value` group has no
    /// conditions
    #[error("group `{group}` must not be empty")]
    EmptyGroup {
        /// Role of the empty group
        group: &'static str,
    },

    /// A leaderboard value chain does not end in a measured condition
    #[error("group `{group}` must end in a measured condition")]
    MeasuredRequired {
        /// Role of the offending group
        group: &'static str,
    },

    /// An achievement or leaderboard entry line could not be parsed
    #[error("malformed entry line `{line}`: {reason}")]
    MalformedLine {
        /// The raw line
        line: String,
        /// What went wrong
        reason: String,
    },
}

impl Error {
    /// Create a [`Error::MalformedCondition`] for a raw token
    pub fn malformed(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedCondition {
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Create a [`Error::MalformedLine`] for a raw entry line
    pub fn malformed_line(line: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedLine {
            line: line.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, Error>;
