//! Wire → model parsing
//!
//! Best-effort left inverse of encode: any string encode produces comes
//! back structurally identical. Failures localize to the single offending
//! condition token, with the raw token attached.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::condition::{Comparison, Condition, Flag};
use crate::error::{Error, Result};
use crate::group::LogicSet;
use crate::memory::{MemRef, MemSize, Operand, Transform};

lazy_static! {
    /// Trailing `.<digits>.` hit-count suffix
    static ref HIT_SUFFIX: Regex = Regex::new(r"\.(\d+)\.$").unwrap();
}

/// Parses a full logic-set wire string
pub fn decode_logic(wire: &str) -> Result<LogicSet> {
    let mut set = LogicSet::new();

    for (index, segment) in split_groups(wire).into_iter().enumerate() {
        trace!(index, segment, "decoding group segment");
        let mut conditions = Vec::new();
        for token in segment.split('_').filter(|t| !t.is_empty()) {
            conditions.push(decode_condition(token)?);
        }
        if index == 0 {
            set.core = conditions;
        } else {
            set.alts.push(conditions);
        }
    }
    Ok(set)
}

/// Splits on the group separator `S`
///
/// An `S` immediately preceded by `0x` is the bit6 size token, never a
/// separator; nothing else in the grammar produces a bare `S`.
fn split_groups(wire: &str) -> Vec<&str> {
    let bytes = wire.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0;
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'S' && !(i >= 2 && &bytes[i - 2..i] == b"0x") {
            parts.push(&wire[start..i]);
            start = i + 1;
        }
    }
    parts.push(&wire[start..]);
    parts
}

/// Parses one condition-line token
pub fn decode_condition(raw: &str) -> Result<Condition> {
    let mut rest = raw;

    // Hit suffix first; memory tokens never contain dots, so a trailing
    // `.N.` is always the hit count.
    let mut hits = 0u32;
    if let Some(caps) = HIT_SUFFIX.captures(rest) {
        let digits = caps.get(1).unwrap();
        hits = digits
            .as_str()
            .parse()
            .map_err(|_| Error::malformed(raw, "hit count out of range"))?;
        rest = &rest[..caps.get(0).unwrap().start()];
    }

    // Single-character flag code before ':'
    let mut flag = Flag::None;
    let chars: Vec<char> = rest.chars().take(2).collect();
    if chars.len() == 2 && chars[1] == ':' {
        flag = Flag::from_code(chars[0]).ok_or_else(|| Error::UnknownFlagCode {
            code: chars[0].to_string(),
            token: raw.to_string(),
        })?;
        rest = &rest[2..];
    }

    let mut condition = match find_comparator(rest) {
        Some((at, cmp)) => {
            let left = parse_operand(&rest[..at], raw)?;
            let right = parse_operand(&rest[at + cmp.token().len()..], raw)?;
            Condition::compare(left, cmp, right)
        }
        None => Condition::new(parse_operand(rest, raw)?),
    };

    condition = condition.with_flag(flag).with_hits(hits);
    trace!(token = raw, "decoded condition");
    Ok(condition)
}

/// First comparator occurrence, scanning left to right with multi-character
/// tokens tried before their single-character prefixes
fn find_comparator(text: &str) -> Option<(usize, Comparison)> {
    for (i, _) in text.char_indices() {
        for cmp in Comparison::scan_order() {
            if text[i..].starts_with(cmp.token()) {
                return Some((i, *cmp));
            }
        }
    }
    None
}

fn parse_operand(text: &str, raw: &str) -> Result<Operand> {
    if text.is_empty() {
        return Err(Error::malformed(raw, "empty operand"));
    }
    if text == "{recall}" {
        return Ok(Operand::Recall);
    }

    let first = text.chars().next().unwrap();
    if let Some(transform) = Transform::from_prefix(first) {
        let mem = parse_mem_ref(&text[first.len_utf8()..], raw)?;
        return Ok(Operand::Mem(MemRef { transform, ..mem }));
    }

    match first {
        '0' if text.len() >= 2 && text.as_bytes()[1] == b'x' => {
            parse_mem_ref(text, raw).map(Operand::Mem)
        }
        'f' | 'K' => parse_mem_ref(text, raw).map(Operand::Mem),
        _ => text
            .parse::<i64>()
            .map(Operand::Literal)
            .map_err(|_| Error::malformed(raw, format!("unparseable operand `{text}`"))),
    }
}

/// Parses a memory reference token without its transform prefix
fn parse_mem_ref(text: &str, raw: &str) -> Result<MemRef> {
    if let Some(rest) = text.strip_prefix("0x") {
        let mut chars = rest.chars();
        let lead = chars
            .next()
            .ok_or_else(|| Error::malformed(raw, "missing address"))?;
        // Hex digits render lowercase, so an uppercase letter after `0x`
        // can only be a size code.
        if lead.is_ascii_uppercase() {
            let size = MemSize::from_sized_code(lead).ok_or_else(|| Error::UnknownSizeCode {
                code: lead.to_string(),
                token: raw.to_string(),
            })?;
            let address = parse_hex(chars.as_str(), raw)?;
            Ok(MemRef::new(address, size))
        } else {
            let address = parse_hex(rest, raw)?;
            Ok(MemRef::new(address, MemSize::Word))
        }
    } else if let Some(rest) = text.strip_prefix('f') {
        let mut chars = rest.chars();
        let code = chars
            .next()
            .ok_or_else(|| Error::malformed(raw, "truncated float reference"))?;
        let size = MemSize::from_float_code(code).ok_or_else(|| Error::UnknownSizeCode {
            code: format!("f{code}"),
            token: raw.to_string(),
        })?;
        let address = parse_hex(chars.as_str(), raw)?;
        Ok(MemRef::new(address, size))
    } else if let Some(rest) = text.strip_prefix('K') {
        let address = parse_hex(rest, raw)?;
        Ok(MemRef::new(address, MemSize::BitCount))
    } else {
        Err(Error::malformed(
            raw,
            format!("expected memory reference, found `{text}`"),
        ))
    }
}

fn parse_hex(digits: &str, raw: &str) -> Result<u64> {
    if digits.is_empty() {
        return Err(Error::malformed(raw, "missing address"));
    }
    u64::from_str_radix(digits, 16)
        .map_err(|_| Error::malformed(raw, format!("invalid hex address `{digits}`")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{bit6, byte, lit, word};

    #[test]
    fn test_decode_simple_condition() {
        let cond = decode_condition("0xH0010=1.50.").unwrap();
        assert_eq!(cond, byte(0x10).eq(lit(1)).with_hits(50));
    }

    #[test]
    fn test_decode_flag_and_transform() {
        let cond = decode_condition("R:d0xH0010<p0x0020").unwrap();
        assert_eq!(
            cond,
            byte(0x10)
                .delta()
                .lt(word(0x20).prior())
                .with_flag(Flag::ResetIf)
        );
    }

    #[test]
    fn test_multi_char_comparator_wins() {
        let cond = decode_condition("0xH0010>=5").unwrap();
        assert_eq!(cond.cmp, Some(Comparison::Ge));
    }

    #[test]
    fn test_unknown_size_code() {
        let err = decode_condition("0xZ0010=1").unwrap_err();
        assert_eq!(
            err,
            Error::UnknownSizeCode {
                code: "Z".to_string(),
                token: "0xZ0010=1".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_flag_code() {
        let err = decode_condition("X:0xH0010=1").unwrap_err();
        assert!(matches!(err, Error::UnknownFlagCode { .. }));
    }

    #[test]
    fn test_flagless_garbage_rejected() {
        assert!(matches!(
            decode_condition("hello"),
            Err(Error::MalformedCondition { .. })
        ));
    }

    #[test]
    fn test_bit6_token_not_a_group_separator() {
        let set = decode_logic("0xS0010=1_S_0xS0020=1").unwrap();
        assert_eq!(set.core, vec![bit6(0x10).eq(lit(1))]);
        assert_eq!(set.alts, vec![vec![bit6(0x20).eq(lit(1))]]);
    }

    #[test]
    fn test_recall_and_literals() {
        let cond = decode_condition("K:0xH0010=1").unwrap();
        assert_eq!(cond.flag, Flag::Remember);
        let cond = decode_condition("{recall}>10").unwrap();
        assert_eq!(cond.left, Operand::Recall);
        assert_eq!(cond.right, Some(Operand::Literal(10)));
    }
}
