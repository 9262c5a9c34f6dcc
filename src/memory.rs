//! Memory reference model
//!
//! One addressable game-memory read: an address, a width or bit-selector
//! code, and an optional transform (delta/prior/BCD/invert). The `{recall}`
//! pseudo-reference and plain decimal literals round out the operand set.

use serde::{Deserialize, Serialize};

use crate::condition::{Comparison, Condition};
use crate::expr::Expr;

/// Width / bit-selector codes understood by the runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemSize {
    /// Single bit 0
    Bit0,
    /// Single bit 1
    Bit1,
    /// Single bit 2
    Bit2,
    /// Single bit 3
    Bit3,
    /// Single bit 4
    Bit4,
    /// Single bit 5
    Bit5,
    /// Single bit 6
    Bit6,
    /// Single bit 7
    Bit7,
    /// 8-bit read
    Byte,
    /// 16-bit little-endian read (the empty size token)
    Word,
    /// 24-bit little-endian read
    Tbyte,
    /// 32-bit little-endian read
    Dword,
    /// 16-bit big-endian read
    WordBe,
    /// 24-bit big-endian read
    TbyteBe,
    /// 32-bit big-endian read
    DwordBe,
    /// Low nibble
    Lower4,
    /// High nibble
    Upper4,
    /// Number of set bits in the byte
    BitCount,
    /// 32-bit IEEE float
    Float,
    /// 32-bit IEEE float, big-endian
    FloatBe,
    /// 32-bit double variant
    Double32,
    /// 32-bit double variant, big-endian
    Double32Be,
    /// Microsoft Binary Format float
    Mbf32,
    /// Microsoft Binary Format float, little-endian
    Mbf32Le,
}

impl MemSize {
    /// Wire token for this size
    pub fn token(&self) -> &'static str {
        match self {
            MemSize::Bit0 => "M",
            MemSize::Bit1 => "N",
            MemSize::Bit2 => "O",
            MemSize::Bit3 => "P",
            MemSize::Bit4 => "Q",
            MemSize::Bit5 => "R",
            MemSize::Bit6 => "S",
            MemSize::Bit7 => "T",
            MemSize::Byte => "H",
            MemSize::Word => "",
            MemSize::Tbyte => "W",
            MemSize::Dword => "X",
            MemSize::WordBe => "I",
            MemSize::TbyteBe => "J",
            MemSize::DwordBe => "G",
            MemSize::Lower4 => "L",
            MemSize::Upper4 => "U",
            MemSize::BitCount => "K",
            MemSize::Float => "fF",
            MemSize::FloatBe => "fB",
            MemSize::Double32 => "fH",
            MemSize::Double32Be => "fI",
            MemSize::Mbf32 => "fM",
            MemSize::Mbf32Le => "fL",
        }
    }

    /// Whether the token renders bare, without the `0x` address prefix
    ///
    /// The float family and the bitcount selector carry their own leading
    /// letter on the wire (`fF00a1`, `K00a1`).
    pub fn is_bare(&self) -> bool {
        matches!(
            self,
            MemSize::BitCount
                | MemSize::Float
                | MemSize::FloatBe
                | MemSize::Double32
                | MemSize::Double32Be
                | MemSize::Mbf32
                | MemSize::Mbf32Le
        )
    }

    /// Look up the size for a single-character code following `0x`
    pub fn from_sized_code(code: char) -> Option<MemSize> {
        Some(match code {
            'M' => MemSize::Bit0,
            'N' => MemSize::Bit1,
            'O' => MemSize::Bit2,
            'P' => MemSize::Bit3,
            'Q' => MemSize::Bit4,
            'R' => MemSize::Bit5,
            'S' => MemSize::Bit6,
            'T' => MemSize::Bit7,
            'H' => MemSize::Byte,
            'W' => MemSize::Tbyte,
            'X' => MemSize::Dword,
            'I' => MemSize::WordBe,
            'J' => MemSize::TbyteBe,
            'G' => MemSize::DwordBe,
            'L' => MemSize::Lower4,
            'U' => MemSize::Upper4,
            'K' => MemSize::BitCount,
            _ => return None,
        })
    }

    /// Look up the float-family size for the character following `f`
    pub fn from_float_code(code: char) -> Option<MemSize> {
        Some(match code {
            'F' => MemSize::Float,
            'B' => MemSize::FloatBe,
            'H' => MemSize::Double32,
            'I' => MemSize::Double32Be,
            'M' => MemSize::Mbf32,
            'L' => MemSize::Mbf32Le,
            _ => return None,
        })
    }

    /// Every size code, in wire-table order
    pub fn all() -> &'static [MemSize] {
        &[
            MemSize::Bit0,
            MemSize::Bit1,
            MemSize::Bit2,
            MemSize::Bit3,
            MemSize::Bit4,
            MemSize::Bit5,
            MemSize::Bit6,
            MemSize::Bit7,
            MemSize::Byte,
            MemSize::Word,
            MemSize::Tbyte,
            MemSize::Dword,
            MemSize::WordBe,
            MemSize::TbyteBe,
            MemSize::DwordBe,
            MemSize::Lower4,
            MemSize::Upper4,
            MemSize::BitCount,
            MemSize::Float,
            MemSize::FloatBe,
            MemSize::Double32,
            MemSize::Double32Be,
            MemSize::Mbf32,
            MemSize::Mbf32Le,
        ]
    }
}

/// Value transform applied to a memory read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Transform {
    /// Current frame value
    #[default]
    None,
    /// Value on the previous frame
    Delta,
    /// Last value different from the current one
    Prior,
    /// Binary-coded-decimal interpretation
    Bcd,
    /// Bitwise inversion
    Invert,
}

impl Transform {
    /// Wire prefix character for this transform
    pub fn prefix(&self) -> &'static str {
        match self {
            Transform::None => "",
            Transform::Delta => "d",
            Transform::Prior => "p",
            Transform::Bcd => "b",
            Transform::Invert => "~",
        }
    }

    /// Look up the transform for a leading prefix character
    pub fn from_prefix(c: char) -> Option<Transform> {
        Some(match c {
            'd' => Transform::Delta,
            'p' => Transform::Prior,
            'b' => Transform::Bcd,
            '~' => Transform::Invert,
            _ => return None,
        })
    }
}

/// One addressable memory read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemRef {
    /// Byte address in emulated memory
    pub address: u64,
    /// Read width / bit selector
    pub size: MemSize,
    /// Transform applied to the read value
    pub transform: Transform,
}

impl MemRef {
    /// Creates an untransformed reference
    pub fn new(address: u64, size: MemSize) -> Self {
        MemRef {
            address,
            size,
            transform: Transform::None,
        }
    }

    /// Previous-frame value of this reference
    pub fn delta(self) -> Self {
        MemRef {
            transform: Transform::Delta,
            ..self
        }
    }

    /// Last-different value of this reference
    pub fn prior(self) -> Self {
        MemRef {
            transform: Transform::Prior,
            ..self
        }
    }

    /// BCD interpretation of this reference
    pub fn bcd(self) -> Self {
        MemRef {
            transform: Transform::Bcd,
            ..self
        }
    }

    /// Bitwise inversion of this reference
    pub fn invert(self) -> Self {
        MemRef {
            transform: Transform::Invert,
            ..self
        }
    }

    /// Canonical wire token for this reference
    ///
    /// Lowercase hex, at least four digits, never truncated. Bare-token
    /// sizes (floats, bitcount) skip the `0x` prefix.
    pub fn render(&self) -> String {
        let token = self.size.token();
        if self.size.is_bare() {
            format!("{}{}{:04x}", self.transform.prefix(), token, self.address)
        } else {
            format!("{}0x{}{:04x}", self.transform.prefix(), token, self.address)
        }
    }

    /// Start an arithmetic accumulation: `self + rhs`
    pub fn plus(self, rhs: impl Into<Operand>) -> Expr {
        Expr::of(self).plus(rhs)
    }

    /// Start an arithmetic accumulation: `self - rhs`
    pub fn minus(self, rhs: impl Into<Operand>) -> Expr {
        Expr::of(self).minus(rhs)
    }

    /// Pointer indirection: read `self`, use the value as the base address
    /// for `target`
    pub fn point_to(self, target: impl Into<Operand>) -> Expr {
        Expr::of(self).point_to(target)
    }

    /// `self = rhs`
    pub fn eq(self, rhs: impl Into<Operand>) -> Condition {
        Condition::compare(self, Comparison::Eq, rhs)
    }

    /// `self != rhs`
    pub fn ne(self, rhs: impl Into<Operand>) -> Condition {
        Condition::compare(self, Comparison::Ne, rhs)
    }

    /// `self > rhs`
    pub fn gt(self, rhs: impl Into<Operand>) -> Condition {
        Condition::compare(self, Comparison::Gt, rhs)
    }

    /// `self >= rhs`
    pub fn ge(self, rhs: impl Into<Operand>) -> Condition {
        Condition::compare(self, Comparison::Ge, rhs)
    }

    /// `self < rhs`
    pub fn lt(self, rhs: impl Into<Operand>) -> Condition {
        Condition::compare(self, Comparison::Lt, rhs)
    }

    /// `self <= rhs`
    pub fn le(self, rhs: impl Into<Operand>) -> Condition {
        Condition::compare(self, Comparison::Le, rhs)
    }
}

/// Either side of a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operand {
    /// A memory read
    Mem(MemRef),
    /// The remembered accumulator value (`{recall}`); carries no address
    /// or size
    Recall,
    /// A plain decimal constant
    Literal(i64),
}

impl Operand {
    /// Canonical wire token for this operand
    pub fn render(&self) -> String {
        match self {
            Operand::Mem(mem) => mem.render(),
            Operand::Recall => "{recall}".to_string(),
            Operand::Literal(v) => v.to_string(),
        }
    }
}

impl From<MemRef> for Operand {
    fn from(mem: MemRef) -> Self {
        Operand::Mem(mem)
    }
}

impl From<i64> for Operand {
    fn from(v: i64) -> Self {
        Operand::Literal(v)
    }
}

impl From<u32> for Operand {
    fn from(v: u32) -> Self {
        Operand::Literal(v as i64)
    }
}

/// 8-bit reference
pub fn byte(address: u64) -> MemRef {
    MemRef::new(address, MemSize::Byte)
}

/// 16-bit reference
pub fn word(address: u64) -> MemRef {
    MemRef::new(address, MemSize::Word)
}

/// 24-bit reference
pub fn tbyte(address: u64) -> MemRef {
    MemRef::new(address, MemSize::Tbyte)
}

/// 32-bit reference
pub fn dword(address: u64) -> MemRef {
    MemRef::new(address, MemSize::Dword)
}

/// 16-bit big-endian reference
pub fn word_be(address: u64) -> MemRef {
    MemRef::new(address, MemSize::WordBe)
}

/// 24-bit big-endian reference
pub fn tbyte_be(address: u64) -> MemRef {
    MemRef::new(address, MemSize::TbyteBe)
}

/// 32-bit big-endian reference
pub fn dword_be(address: u64) -> MemRef {
    MemRef::new(address, MemSize::DwordBe)
}

/// Single-bit reference (bit 0)
pub fn bit0(address: u64) -> MemRef {
    MemRef::new(address, MemSize::Bit0)
}

/// Single-bit reference (bit 1)
pub fn bit1(address: u64) -> MemRef {
    MemRef::new(address, MemSize::Bit1)
}

/// Single-bit reference (bit 2)
pub fn bit2(address: u64) -> MemRef {
    MemRef::new(address, MemSize::Bit2)
}

/// Single-bit reference (bit 3)
pub fn bit3(address: u64) -> MemRef {
    MemRef::new(address, MemSize::Bit3)
}

/// Single-bit reference (bit 4)
pub fn bit4(address: u64) -> MemRef {
    MemRef::new(address, MemSize::Bit4)
}

/// Single-bit reference (bit 5)
pub fn bit5(address: u64) -> MemRef {
    MemRef::new(address, MemSize::Bit5)
}

/// Single-bit reference (bit 6)
pub fn bit6(address: u64) -> MemRef {
    MemRef::new(address, MemSize::Bit6)
}

/// Single-bit reference (bit 7)
pub fn bit7(address: u64) -> MemRef {
    MemRef::new(address, MemSize::Bit7)
}

/// Low-nibble reference
pub fn low4(address: u64) -> MemRef {
    MemRef::new(address, MemSize::Lower4)
}

/// High-nibble reference
pub fn high4(address: u64) -> MemRef {
    MemRef::new(address, MemSize::Upper4)
}

/// Set-bit-count reference
pub fn bitcount(address: u64) -> MemRef {
    MemRef::new(address, MemSize::BitCount)
}

/// 32-bit float reference
pub fn float32(address: u64) -> MemRef {
    MemRef::new(address, MemSize::Float)
}

/// 32-bit big-endian float reference
pub fn float32_be(address: u64) -> MemRef {
    MemRef::new(address, MemSize::FloatBe)
}

/// 32-bit double-variant reference
pub fn double32(address: u64) -> MemRef {
    MemRef::new(address, MemSize::Double32)
}

/// 32-bit double-variant big-endian reference
pub fn double32_be(address: u64) -> MemRef {
    MemRef::new(address, MemSize::Double32Be)
}

/// MBF32 float reference
pub fn mbf32(address: u64) -> MemRef {
    MemRef::new(address, MemSize::Mbf32)
}

/// MBF32 little-endian float reference
pub fn mbf32_le(address: u64) -> MemRef {
    MemRef::new(address, MemSize::Mbf32Le)
}

/// Decimal constant operand
pub fn lit(value: i64) -> Operand {
    Operand::Literal(value)
}

/// The `{recall}` pseudo-reference
pub fn recall() -> Operand {
    Operand::Recall
}

/// Previous-frame value of a reference
pub fn delta(mem: MemRef) -> MemRef {
    mem.delta()
}

/// Last-different value of a reference
pub fn prior(mem: MemRef) -> MemRef {
    mem.prior()
}

/// BCD interpretation of a reference
pub fn bcd(mem: MemRef) -> MemRef {
    mem.bcd()
}

/// Bitwise inversion of a reference
pub fn invert(mem: MemRef) -> MemRef {
    mem.invert()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_sizes() {
        assert_eq!(byte(0x10).render(), "0xH0010");
        assert_eq!(word(0x10).render(), "0x0010");
        assert_eq!(dword(0xb0).render(), "0xX00b0");
        assert_eq!(bit7(0x1f).render(), "0xT001f");
    }

    #[test]
    fn test_render_bare_tokens() {
        assert_eq!(float32(0x20).render(), "fF0020");
        assert_eq!(mbf32_le(0x20).render(), "fL0020");
        assert_eq!(bitcount(0x20).render(), "K0020");
    }

    #[test]
    fn test_render_transforms() {
        assert_eq!(byte(0x10).delta().render(), "d0xH0010");
        assert_eq!(prior(word(0x10)).render(), "p0x0010");
        assert_eq!(bcd(byte(0x10)).render(), "b0xH0010");
        assert_eq!(invert(byte(0x10)).render(), "~0xH0010");
    }

    #[test]
    fn test_wide_addresses_grow() {
        assert_eq!(byte(0x100000).render(), "0xH100000");
        assert_eq!(dword(0xdead_beef).render(), "0xXdeadbeef");
    }

    #[test]
    fn test_operand_render() {
        assert_eq!(lit(42).render(), "42");
        assert_eq!(lit(-3).render(), "-3");
        assert_eq!(recall().render(), "{recall}");
    }

    #[test]
    fn test_size_tables_are_inverse() {
        for size in MemSize::all() {
            let token = size.token();
            let parsed = if size.is_bare() {
                let c = token.chars().last().unwrap();
                if *size == MemSize::BitCount {
                    MemSize::from_sized_code(c)
                } else {
                    MemSize::from_float_code(c)
                }
            } else if token.is_empty() {
                Some(MemSize::Word)
            } else {
                MemSize::from_sized_code(token.chars().next().unwrap())
            };
            assert_eq!(parsed, Some(*size), "token {token:?}");
        }
    }
}
