//! Builder-source regeneration
//!
//! Turns decoded models back into authoring source: the importer decodes an
//! existing set from its wire text and emits a Rust script a maintainer can
//! edit and re-render. The emitted calls target this crate's own builder
//! API, with the original wire string kept as a comment for reference.

use crate::condition::{Comparison, Condition, Flag};
use crate::error::Result;
use crate::group::LogicSet;
use crate::memory::{MemSize, Operand, Transform};
use crate::models::Achievement;

fn helper_name(size: MemSize) -> &'static str {
    match size {
        MemSize::Bit0 => "bit0",
        MemSize::Bit1 => "bit1",
        MemSize::Bit2 => "bit2",
        MemSize::Bit3 => "bit3",
        MemSize::Bit4 => "bit4",
        MemSize::Bit5 => "bit5",
        MemSize::Bit6 => "bit6",
        MemSize::Bit7 => "bit7",
        MemSize::Byte => "byte",
        MemSize::Word => "word",
        MemSize::Tbyte => "tbyte",
        MemSize::Dword => "dword",
        MemSize::WordBe => "word_be",
        MemSize::TbyteBe => "tbyte_be",
        MemSize::DwordBe => "dword_be",
        MemSize::Lower4 => "low4",
        MemSize::Upper4 => "high4",
        MemSize::BitCount => "bitcount",
        MemSize::Float => "float32",
        MemSize::FloatBe => "float32_be",
        MemSize::Double32 => "double32",
        MemSize::Double32Be => "double32_be",
        MemSize::Mbf32 => "mbf32",
        MemSize::Mbf32Le => "mbf32_le",
    }
}

fn transform_method(transform: Transform) -> &'static str {
    match transform {
        Transform::None => "",
        Transform::Delta => ".delta()",
        Transform::Prior => ".prior()",
        Transform::Bcd => ".bcd()",
        Transform::Invert => ".invert()",
    }
}

fn cmp_method(cmp: Comparison) -> &'static str {
    match cmp {
        Comparison::Eq => "eq",
        Comparison::Ne => "ne",
        Comparison::Gt => "gt",
        Comparison::Ge => "ge",
        Comparison::Lt => "lt",
        Comparison::Le => "le",
    }
}

fn cmp_variant(cmp: Comparison) -> &'static str {
    match cmp {
        Comparison::Eq => "Comparison::Eq",
        Comparison::Ne => "Comparison::Ne",
        Comparison::Gt => "Comparison::Gt",
        Comparison::Ge => "Comparison::Ge",
        Comparison::Lt => "Comparison::Lt",
        Comparison::Le => "Comparison::Le",
    }
}

fn flag_variant(flag: Flag) -> &'static str {
    match flag {
        Flag::None => "Flag::None",
        Flag::PauseIf => "Flag::PauseIf",
        Flag::ResetIf => "Flag::ResetIf",
        Flag::ResetNextIf => "Flag::ResetNextIf",
        Flag::AddHits => "Flag::AddHits",
        Flag::SubHits => "Flag::SubHits",
        Flag::AddSource => "Flag::AddSource",
        Flag::SubSource => "Flag::SubSource",
        Flag::AddAddress => "Flag::AddAddress",
        Flag::Measured => "Flag::Measured",
        Flag::MeasuredPercent => "Flag::MeasuredPercent",
        Flag::MeasuredIf => "Flag::MeasuredIf",
        Flag::Trigger => "Flag::Trigger",
        Flag::AndNext => "Flag::AndNext",
        Flag::OrNext => "Flag::OrNext",
        Flag::Remember => "Flag::Remember",
    }
}

/// Emits the constructor call for an operand
pub fn emit_operand(operand: &Operand) -> String {
    match operand {
        Operand::Mem(mem) => format!(
            "{}(0x{:x}){}",
            helper_name(mem.size),
            mem.address,
            transform_method(mem.transform)
        ),
        Operand::Recall => "recall()".to_string(),
        Operand::Literal(v) => format!("lit({v})"),
    }
}

/// Emits the builder-call chain for one condition
pub fn emit_condition(cond: &Condition) -> String {
    let mut out = match (&cond.cmp, &cond.right) {
        (Some(cmp), Some(right)) => match &cond.left {
            Operand::Mem(_) => format!(
                "{}.{}({})",
                emit_operand(&cond.left),
                cmp_method(*cmp),
                emit_operand(right)
            ),
            // Literal or recall left operands have no comparison methods
            _ => format!(
                "Condition::compare({}, {}, {})",
                emit_operand(&cond.left),
                cmp_variant(*cmp),
                emit_operand(right)
            ),
        },
        _ => format!("Condition::new({})", emit_operand(&cond.left)),
    };

    if cond.flag != Flag::None {
        out.push_str(&format!(".with_flag({})", flag_variant(cond.flag)));
    }
    if cond.hits > 0 {
        out.push_str(&format!(".with_hits({})", cond.hits));
    }
    out
}

/// Emits `let` bindings for a logic set's groups, named off `prefix`
pub fn emit_logic_set(prefix: &str, set: &LogicSet) -> String {
    let mut out = String::new();
    emit_group(&mut out, &format!("{prefix}_core"), &set.core);
    for (i, alt) in set.alts.iter().enumerate() {
        emit_group(&mut out, &format!("{prefix}_alt{}", i + 1), alt);
    }
    out
}

fn emit_group(out: &mut String, name: &str, conditions: &[Condition]) {
    out.push_str(&format!("let {name} = vec![\n"));
    for cond in conditions {
        out.push_str(&format!("    {},\n", emit_condition(cond)));
    }
    out.push_str("];\n");
}

/// Emits a full authoring script for an imported set of achievements
pub fn emit_achievement_script(
    game_id: u64,
    title: &str,
    achievements: &[Achievement],
) -> Result<String> {
    let mut out = String::new();
    out.push_str("use cheevos::memory::*;\n");
    out.push_str("use cheevos::{Achievement, AchievementSet, Comparison, Condition, Flag};\n\n");
    out.push_str(&format!(
        "let mut set = AchievementSet::new({game_id}, {title:?});\n\n"
    ));

    for ach in achievements {
        let mem = crate::codec::encode_logic(&ach.logic)?;
        out.push_str(&format!("// --- {} ---\n", ach.title));
        out.push_str(&format!("// original logic: {mem}\n"));

        let prefix = format!("logic_{}", ach.id);
        out.push_str(&emit_logic_set(&prefix, &ach.logic));

        out.push_str(&format!(
            "let ach_{id} = Achievement::new({title:?}, {desc:?}, {points})\n    .with_id({id})\n    .add_core({prefix}_core)",
            id = ach.id,
            title = ach.title,
            desc = ach.description,
            points = ach.points,
            prefix = prefix,
        ));
        for i in 0..ach.logic.alts.len() {
            out.push_str(&format!("\n    .add_alt({prefix}_alt{})", i + 1));
        }
        out.push_str(";\n");
        out.push_str(&format!("set = set.add_achievement(ach_{});\n\n", ach.id));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{byte, dword, lit};

    #[test]
    fn test_emit_operand_forms() {
        assert_eq!(emit_operand(&byte(0x10).delta().into()), "byte(0x10).delta()");
        assert_eq!(emit_operand(&lit(-3)), "lit(-3)");
        assert_eq!(emit_operand(&crate::memory::recall()), "recall()");
    }

    #[test]
    fn test_emit_condition_chain() {
        let cond = byte(0x10)
            .eq(lit(1))
            .with_flag(Flag::ResetIf)
            .with_hits(50);
        assert_eq!(
            emit_condition(&cond),
            "byte(0x10).eq(lit(1)).with_flag(Flag::ResetIf).with_hits(50)"
        );
    }

    #[test]
    fn test_emit_literal_left_uses_compare() {
        let cond = Condition::compare(lit(0), Comparison::Gt, lit(5));
        assert_eq!(
            emit_condition(&cond),
            "Condition::compare(lit(0), Comparison::Gt, lit(5))"
        );
    }

    #[test]
    fn test_emit_bare_pointer_hop() {
        let cond = Condition::new(dword(0x1000)).with_flag(Flag::AddAddress);
        assert_eq!(
            emit_condition(&cond),
            "Condition::new(dword(0x1000)).with_flag(Flag::AddAddress)"
        );
    }

    #[test]
    fn test_emit_script_mentions_original_wire() {
        let ach = Achievement::new("Test", "Desc", 5)
            .with_id(7)
            .add_core(byte(0x10).eq(lit(1)))
            .add_alt(byte(0x20).eq(lit(2)));
        let script = emit_achievement_script(1234, "Imported Set", &[ach]).unwrap();
        assert!(script.contains("// original logic: 0xH0010=1_S_0xH0020=2"));
        assert!(script.contains("let logic_7_core = vec![\n    byte(0x10).eq(lit(1)),\n];"));
        assert!(script.contains(".add_alt(logic_7_alt1)"));
    }
}
