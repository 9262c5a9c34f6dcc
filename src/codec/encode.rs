//! Model → wire rendering

use tracing::debug;

use crate::condition::Condition;
use crate::error::Result;
use crate::group::LogicSet;

/// Renders one condition line
pub fn encode_condition(cond: &Condition) -> Result<String> {
    cond.render()
}

/// Renders a condition sequence as one group, lines joined with `_`
pub fn encode_group(conditions: &[Condition]) -> Result<String> {
    let lines = group_lines(conditions)?;
    Ok(lines.join("_"))
}

/// Renders a full logic set: the core group, then each alt group, with a
/// bare `S` separator element between adjacent groups
///
/// `core=[a,b], alts=[[c],[d]]` renders to `a_b_S_c_S_d`; with no alts the
/// core renders alone, with no trailing separator.
pub fn encode_logic(set: &LogicSet) -> Result<String> {
    debug!(
        core = set.core.len(),
        alts = set.alts.len(),
        "encoding logic set"
    );

    let mut lines = group_lines(&set.core)?;
    for alt in &set.alts {
        lines.push("S".to_string());
        lines.extend(group_lines(alt)?);
    }
    Ok(lines.join("_"))
}

fn group_lines(conditions: &[Condition]) -> Result<Vec<String>> {
    conditions.iter().map(Condition::render).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{byte, lit};

    #[test]
    fn test_group_join() {
        let conds = vec![byte(0x10).eq(lit(1)), byte(0x20).eq(lit(2))];
        assert_eq!(encode_group(&conds).unwrap(), "0xH0010=1_0xH0020=2");
    }

    #[test]
    fn test_logic_set_separators() {
        let set = LogicSet::new()
            .add_core(vec![byte(0x10).eq(lit(1)), byte(0x11).eq(lit(2))])
            .add_alt(byte(0x20).eq(lit(3)))
            .add_alt(byte(0x21).eq(lit(4)));
        assert_eq!(
            encode_logic(&set).unwrap(),
            "0xH0010=1_0xH0011=2_S_0xH0020=3_S_0xH0021=4"
        );
    }

    #[test]
    fn test_no_alts_no_trailing_separator() {
        let set = LogicSet::new().add_core(byte(0x10).eq(lit(1)));
        assert_eq!(encode_logic(&set).unwrap(), "0xH0010=1");
    }
}
