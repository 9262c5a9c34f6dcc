//! Code-note import heuristics
//!
//! Emulator user files carry free-text code notes (`N0:` lines). Importers
//! turn those into usable references: a size guessed from the note text, a
//! variable name sanitized from its first line, and, for pointer notes, the
//! indented `+<offset>` body lines reconstructed into an add-address chain.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::expr::Expr;
use crate::memory::{MemRef, MemSize};

lazy_static! {
    /// Bracketed `[..]` or parenthesized `(..)` tags
    static ref TAGS: Regex = Regex::new(r"\[.*?\]|\(.*?\)").unwrap();
    /// Anything that cannot appear in an identifier
    static ref NON_IDENT: Regex = Regex::new(r"[^a-zA-Z0-9_\s]").unwrap();
    /// An indented pointer-offset body line: `+0x10 | health`
    static ref OFFSET_LINE: Regex =
        Regex::new(r"^\s*\+\s*(0[xX][0-9a-fA-F]+|\d+)\s*[|=:-]?\s*(.*)$").unwrap();
}

/// Maximum length of a sanitized identifier
const IDENT_MAX: usize = 45;

/// One code note attached to an address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeNote {
    /// Annotated address
    pub address: u64,
    /// Raw note text, possibly multi-line
    pub text: String,
}

/// One offset entry reconstructed from a pointer note's body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteOffset {
    /// Offset added to the dereferenced base
    pub offset: u64,
    /// Size guessed from the entry's text
    pub size: MemSize,
    /// Remaining label text
    pub label: String,
}

/// Extracts code notes from user-file text (`N0:<addr>:"<text>"` lines)
///
/// Unparseable addresses are skipped; notes are advisory input, not wire
/// grammar.
pub fn parse_user_notes(text: &str) -> Vec<CodeNote> {
    let mut notes = Vec::new();
    for line in text.lines() {
        let Some(rest) = line.strip_prefix("N0:") else {
            continue;
        };
        let Some((addr_text, note_text)) = rest.split_once(':') else {
            continue;
        };
        let addr_text = addr_text.trim();
        let parsed = match addr_text.strip_prefix("0x").or_else(|| addr_text.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => addr_text.parse(),
        };
        if let Ok(address) = parsed {
            notes.push(CodeNote {
                address,
                text: note_text.trim().trim_matches('"').to_string(),
            });
        }
    }
    notes
}

/// Guesses a read size from note text
///
/// Defaults to a byte read, the overwhelmingly common case in notes that
/// do not state a width.
pub fn size_hint(text: &str) -> MemSize {
    let lower = text.to_lowercase();
    if lower.contains("32-bit") || lower.contains("32 bit") {
        MemSize::Dword
    } else if lower.contains("24-bit") || lower.contains("24 bit") {
        MemSize::Tbyte
    } else if lower.contains("16-bit") || lower.contains("16 bit") {
        MemSize::Word
    } else if lower.contains("float") {
        MemSize::Float
    } else {
        MemSize::Byte
    }
}

/// Sanitizes note text into a usable identifier
///
/// Strips bracketed tags, keeps the first line, squashes everything
/// non-alphanumeric, prefixes digits, caps the length.
pub fn identifier_for(text: &str) -> String {
    let first_line = text.split(['\n', '\r', '|']).next().unwrap_or_default();
    let clean = TAGS.replace_all(first_line, "");
    let clean = NON_IDENT.replace_all(&clean, "");
    let mut ident = clean
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    if ident.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        ident = format!("var_{ident}");
    }
    ident.truncate(IDENT_MAX);
    ident
}

/// Reconstructs pointer offsets from a note's indented body lines
///
/// A pointer note reads like:
///
/// ```text
/// [32-bit pointer] Player struct
///   +0x10 | health (16-bit)
///   +0x14 | lives
/// ```
///
/// Every body line starting with `+` contributes one offset entry.
pub fn pointer_offsets(text: &str) -> Vec<NoteOffset> {
    text.lines()
        .skip(1)
        .filter_map(|line| {
            let caps = OFFSET_LINE.captures(line)?;
            let digits = caps.get(1).unwrap().as_str();
            let offset = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
                Some(hex) => u64::from_str_radix(hex, 16).ok()?,
                None => digits.parse().ok()?,
            };
            let label = caps.get(2).unwrap().as_str().trim().to_string();
            Some(NoteOffset {
                offset,
                size: size_hint(&label),
                label,
            })
        })
        .collect()
}

/// Builds the add-address chain for one reconstructed offset
pub fn pointer_expr(base: MemRef, entry: &NoteOffset) -> Expr {
    base.point_to(MemRef::new(entry.offset, entry.size))
}
