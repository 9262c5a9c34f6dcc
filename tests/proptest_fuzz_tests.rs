//! Property-based fuzzing tests for the wire codec
//!
//! These tests use proptest to generate random inputs and verify that:
//! 1. The decoder never panics on arbitrary input
//! 2. Generated logic survives an encode/decode round trip structurally
//! 3. Anything the decoder accepts re-encodes to a stable form

use cheevos::memory::{MemRef, MemSize, Operand, Transform};
use cheevos::{decode_logic, encode_logic, Comparison, Condition, Flag, LogicSet};
use proptest::prelude::*;

// =============================================================================
// STRATEGY GENERATORS
// =============================================================================

/// Generate random ASCII strings that might break the decoder
fn arbitrary_wire_string() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[\x00-\x7F]{0,300}").unwrap()
}

/// Generate strings assembled from wire-grammar fragments
fn memaddr_like_string() -> impl Strategy<Value = String> {
    prop::collection::vec(memaddr_fragment(), 0..40).prop_map(|parts| parts.concat())
}

/// Generate fragments that look like pieces of the wire grammar
fn memaddr_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("0x".to_string()),
        Just("0xH".to_string()),
        Just("0xX".to_string()),
        Just("0xS".to_string()),
        Just("fF".to_string()),
        Just("K".to_string()),
        Just("{recall}".to_string()),
        // Transform prefixes
        Just("d".to_string()),
        Just("p".to_string()),
        Just("b".to_string()),
        Just("~".to_string()),
        // Flag prefixes
        Just("P:".to_string()),
        Just("R:".to_string()),
        Just("A:".to_string()),
        Just("I:".to_string()),
        Just("T:".to_string()),
        // Comparators
        Just("=".to_string()),
        Just("!=".to_string()),
        Just(">=".to_string()),
        Just("<".to_string()),
        // Joiners and hit suffixes
        Just("_".to_string()),
        Just("S".to_string()),
        Just("_S_".to_string()),
        Just(".".to_string()),
        Just(".10.".to_string()),
        // Numbers
        "[0-9a-fA-F]{1,6}".prop_map(|s| s),
        (-1000i64..1000i64).prop_map(|n| n.to_string()),
    ]
}

fn mem_size() -> impl Strategy<Value = MemSize> {
    prop::sample::select(MemSize::all().to_vec())
}

fn transform() -> impl Strategy<Value = Transform> {
    prop::sample::select(vec![
        Transform::None,
        Transform::Delta,
        Transform::Prior,
        Transform::Bcd,
        Transform::Invert,
    ])
}

fn mem_ref() -> impl Strategy<Value = MemRef> {
    (0u64..=0x00FF_FFFF, mem_size(), transform()).prop_map(|(address, size, transform)| MemRef {
        address,
        size,
        transform,
    })
}

fn operand() -> impl Strategy<Value = Operand> {
    prop_oneof![
        mem_ref().prop_map(Operand::Mem),
        Just(Operand::Recall),
        (-100_000i64..100_000i64).prop_map(Operand::Literal),
    ]
}

fn flag() -> impl Strategy<Value = Flag> {
    prop::sample::select(vec![
        Flag::None,
        Flag::PauseIf,
        Flag::ResetIf,
        Flag::ResetNextIf,
        Flag::AddHits,
        Flag::SubHits,
        Flag::AddSource,
        Flag::SubSource,
        Flag::AddAddress,
        Flag::Measured,
        Flag::MeasuredPercent,
        Flag::MeasuredIf,
        Flag::Trigger,
        Flag::AndNext,
        Flag::OrNext,
        Flag::Remember,
    ])
}

fn comparison() -> impl Strategy<Value = Comparison> {
    prop::sample::select(vec![
        Comparison::Eq,
        Comparison::Ne,
        Comparison::Gt,
        Comparison::Ge,
        Comparison::Lt,
        Comparison::Le,
    ])
}

/// Generate complete conditions; every one carries a comparison, so any
/// flag is renderable
fn condition() -> impl Strategy<Value = Condition> {
    (operand(), comparison(), operand(), flag(), 0u32..100_000).prop_map(
        |(left, cmp, right, flag, hits)| Condition {
            left,
            cmp: Some(cmp),
            right: Some(right),
            flag,
            hits,
        },
    )
}

fn logic_set() -> impl Strategy<Value = LogicSet> {
    (
        prop::collection::vec(condition(), 1..8),
        prop::collection::vec(prop::collection::vec(condition(), 0..5), 0..4),
    )
        .prop_map(|(core, alts)| LogicSet { core, alts })
}

// =============================================================================
// DECODER ROBUSTNESS
// =============================================================================

proptest! {
    #[test]
    fn decoder_never_panics_on_arbitrary_input(input in arbitrary_wire_string()) {
        let _ = decode_logic(&input);
    }

    #[test]
    fn decoder_never_panics_on_grammar_fragments(input in memaddr_like_string()) {
        let _ = decode_logic(&input);
    }

    /// Anything the decoder accepts and the encoder can re-render must
    /// decode back to the same structure
    #[test]
    fn accepted_input_reencodes_stably(input in memaddr_like_string()) {
        if let Ok(set) = decode_logic(&input) {
            if let Ok(wire) = encode_logic(&set) {
                prop_assert_eq!(decode_logic(&wire).unwrap(), set);
            }
        }
    }
}

// =============================================================================
// ROUND-TRIP PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn generated_logic_round_trips(set in logic_set()) {
        let wire = encode_logic(&set).unwrap();
        prop_assert_eq!(decode_logic(&wire).unwrap(), set);
    }

    #[test]
    fn encoding_is_idempotent_through_decode(set in logic_set()) {
        let wire = encode_logic(&set).unwrap();
        let rewire = encode_logic(&decode_logic(&wire).unwrap()).unwrap();
        prop_assert_eq!(rewire, wire);
    }

    #[test]
    fn single_condition_tokens_never_contain_joiners(cond in condition()) {
        let token = cond.render().unwrap();
        prop_assert!(!token.contains('_'), "joiner leaked into `{}`", token);
    }
}
