//! Leaderboard model and entry-line grammar

use serde::{Deserialize, Serialize};

use crate::codec::{decode_logic, encode_logic};
use crate::condition::Flag;
use crate::error::{Error, Result};
use crate::group::{Logic, LogicSet};

/// Display format for the submitted value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaderboardFormat {
    /// Plain score
    Score,
    /// Frame count
    Frames,
    /// Milliseconds
    Millisecs,
    /// Seconds
    Secs,
    /// Minutes
    Minutes,
    /// Seconds displayed as minutes
    SecsAsMins,
    /// Raw value
    Value,
    /// Unsigned value
    Unsigned,
    /// Tens
    Tens,
    /// Hundreds
    Hundreds,
    /// Thousands
    Thousands,
    /// Fixed point, one decimal
    Fixed1,
    /// Fixed point, two decimals
    Fixed2,
    /// Fixed point, three decimals
    Fixed3,
    /// Float, one decimal
    Float1,
    /// Float, two decimals
    Float2,
    /// Float, three decimals
    Float3,
    /// Float, four decimals
    Float4,
    /// Float, five decimals
    Float5,
    /// Float, six decimals
    Float6,
}

impl LeaderboardFormat {
    /// Wire token for this format
    pub fn token(&self) -> &'static str {
        match self {
            LeaderboardFormat::Score => "SCORE",
            LeaderboardFormat::Frames => "FRAMES",
            LeaderboardFormat::Millisecs => "MILLISECS",
            LeaderboardFormat::Secs => "SECS",
            LeaderboardFormat::Minutes => "MINUTES",
            LeaderboardFormat::SecsAsMins => "SECS_AS_MINS",
            LeaderboardFormat::Value => "VALUE",
            LeaderboardFormat::Unsigned => "UNSIGNED",
            LeaderboardFormat::Tens => "TENS",
            LeaderboardFormat::Hundreds => "HUNDREDS",
            LeaderboardFormat::Thousands => "THOUSANDS",
            LeaderboardFormat::Fixed1 => "FIXED1",
            LeaderboardFormat::Fixed2 => "FIXED2",
            LeaderboardFormat::Fixed3 => "FIXED3",
            LeaderboardFormat::Float1 => "FLOAT1",
            LeaderboardFormat::Float2 => "FLOAT2",
            LeaderboardFormat::Float3 => "FLOAT3",
            LeaderboardFormat::Float4 => "FLOAT4",
            LeaderboardFormat::Float5 => "FLOAT5",
            LeaderboardFormat::Float6 => "FLOAT6",
        }
    }

    /// Look up a format by wire token
    pub fn from_token(token: &str) -> Option<LeaderboardFormat> {
        Some(match token {
            "SCORE" => LeaderboardFormat::Score,
            "FRAMES" => LeaderboardFormat::Frames,
            "MILLISECS" => LeaderboardFormat::Millisecs,
            "SECS" => LeaderboardFormat::Secs,
            "MINUTES" => LeaderboardFormat::Minutes,
            "SECS_AS_MINS" => LeaderboardFormat::SecsAsMins,
            "VALUE" => LeaderboardFormat::Value,
            "UNSIGNED" => LeaderboardFormat::Unsigned,
            "TENS" => LeaderboardFormat::Tens,
            "HUNDREDS" => LeaderboardFormat::Hundreds,
            "THOUSANDS" => LeaderboardFormat::Thousands,
            "FIXED1" => LeaderboardFormat::Fixed1,
            "FIXED2" => LeaderboardFormat::Fixed2,
            "FIXED3" => LeaderboardFormat::Fixed3,
            "FLOAT1" => LeaderboardFormat::Float1,
            "FLOAT2" => LeaderboardFormat::Float2,
            "FLOAT3" => LeaderboardFormat::Float3,
            "FLOAT4" => LeaderboardFormat::Float4,
            "FLOAT5" => LeaderboardFormat::Float5,
            "FLOAT6" => LeaderboardFormat::Float6,
            _ => return None,
        })
    }
}

/// One leaderboard: metadata plus four fixed-role logic sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    /// Site or local id
    pub id: u64,
    /// Display title
    pub title: String,
    /// Display description
    pub description: String,
    /// Value display format
    pub format: LeaderboardFormat,
    /// Whether lower submitted values rank higher
    pub lower_is_better: bool,
    /// Starts tracking when satisfied
    pub start: LogicSet,
    /// Abandons the attempt when satisfied
    pub cancel: LogicSet,
    /// Submits the value when satisfied
    pub submit: LogicSet,
    /// The measured quantity being tracked
    pub value: LogicSet,
}

impl Leaderboard {
    /// Creates a leaderboard with empty groups
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        format: LeaderboardFormat,
    ) -> Self {
        Leaderboard {
            id: 111000001,
            title: title.into(),
            description: description.into(),
            format,
            lower_is_better: false,
            start: LogicSet::new(),
            cancel: LogicSet::new(),
            submit: LogicSet::new(),
            value: LogicSet::new(),
        }
    }

    /// Returns this leaderboard with a different id
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    /// Returns this leaderboard ranking lower values higher
    pub fn lower_is_better(mut self, lower: bool) -> Self {
        self.lower_is_better = lower;
        self
    }

    /// Sets the start group (nested input flattened)
    pub fn set_start(mut self, conditions: impl Into<Logic>) -> Self {
        self.start = LogicSet::compose(conditions, Vec::new());
        self
    }

    /// Sets the cancel group
    pub fn set_cancel(mut self, conditions: impl Into<Logic>) -> Self {
        self.cancel = LogicSet::compose(conditions, Vec::new());
        self
    }

    /// Sets the submit group
    pub fn set_submit(mut self, conditions: impl Into<Logic>) -> Self {
        self.submit = LogicSet::compose(conditions, Vec::new());
        self
    }

    /// Sets the value group
    pub fn set_value(mut self, conditions: impl Into<Logic>) -> Self {
        self.value = LogicSet::compose(conditions, Vec::new());
        self
    }

    fn validate(&self) -> Result<()> {
        if self.value.core.is_empty() {
            return Err(Error::EmptyGroup { group: "value" });
        }
        // The runtime reads the tracked quantity off the tail of the chain.
        let tail = self.value.core.last().unwrap();
        if tail.flag != Flag::Measured {
            return Err(Error::MeasuredRequired { group: "value" });
        }
        Ok(())
    }

    /// Renders the persisted entry line:
    /// `L<id>:"<start>":"<cancel>":"<submit>":"<value>":<format>:<title>:<description>:<0|1>`
    pub fn render_line(&self) -> Result<String> {
        self.validate()?;
        Ok(format!(
            "L{}:\"{}\":\"{}\":\"{}\":\"{}\":{}:{}:{}:{}",
            self.id,
            encode_logic(&self.start)?,
            encode_logic(&self.cancel)?,
            encode_logic(&self.submit)?,
            encode_logic(&self.value)?,
            self.format.token(),
            self.title,
            self.description,
            if self.lower_is_better { "1" } else { "0" },
        ))
    }

    /// Parses a persisted entry line back into a leaderboard
    pub fn parse_line(line: &str) -> Result<Leaderboard> {
        let rest = line
            .strip_prefix('L')
            .ok_or_else(|| Error::malformed_line(line, "missing leaderboard prefix"))?;
        let (id_text, mut rest) = rest
            .split_once(':')
            .ok_or_else(|| Error::malformed_line(line, "missing id separator"))?;
        let id = id_text
            .parse::<u64>()
            .map_err(|_| Error::malformed_line(line, format!("bad id `{id_text}`")))?;

        let mut groups = Vec::with_capacity(4);
        for _ in 0..4 {
            let inner = rest
                .strip_prefix('"')
                .ok_or_else(|| Error::malformed_line(line, "group must be quoted"))?;
            let (mem, after) = inner
                .split_once('"')
                .ok_or_else(|| Error::malformed_line(line, "unterminated group string"))?;
            groups.push(decode_logic(mem)?);
            rest = after
                .strip_prefix(':')
                .ok_or_else(|| Error::malformed_line(line, "missing field after group"))?;
        }

        let fields: Vec<&str> = rest.split(':').collect();
        if fields.len() < 4 {
            return Err(Error::malformed_line(line, "missing trailing fields"));
        }
        let format = LeaderboardFormat::from_token(fields[0])
            .ok_or_else(|| Error::malformed_line(line, format!("unknown format `{}`", fields[0])))?;
        let title = fields[1].to_string();
        let description = fields[2..fields.len() - 1].join(":");
        let lower_is_better = match fields[fields.len() - 1] {
            "0" => false,
            "1" => true,
            other => {
                return Err(Error::malformed_line(
                    line,
                    format!("bad lower-is-better field `{other}`"),
                ))
            }
        };

        let mut groups = groups.into_iter();
        Ok(Leaderboard {
            id,
            title,
            description,
            format,
            lower_is_better,
            start: groups.next().unwrap(),
            cancel: groups.next().unwrap(),
            submit: groups.next().unwrap(),
            value: groups.next().unwrap(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Expr;
    use crate::memory::{byte, lit, word};

    fn sample() -> Leaderboard {
        Leaderboard::new("Stage 1 Speedrun", "Fastest time", LeaderboardFormat::Millisecs)
            .with_id(111000004)
            .lower_is_better(true)
            .set_start(vec![byte(0xd0).eq(lit(1)), byte(0xd0).prior().ne(lit(1))])
            .set_cancel(byte(0xa1).eq(lit(0)))
            .set_submit(byte(0xd0).eq(lit(2)))
            .set_value(Expr::of(word(0xe0)).measured())
    }

    #[test]
    fn test_render_line_shape() {
        let line = sample().render_line().unwrap();
        assert_eq!(
            line,
            "L111000004:\"0xH00d0=1_p0xH00d0!=1\":\"0xH00a1=0\":\"0xH00d0=2\":\
             \"M:0x00e0\":MILLISECS:Stage 1 Speedrun:Fastest time:1"
        );
    }

    #[test]
    fn test_line_round_trip() {
        let lb = sample();
        let parsed = Leaderboard::parse_line(&lb.render_line().unwrap()).unwrap();
        assert_eq!(parsed, lb);
    }

    #[test]
    fn test_empty_value_rejected() {
        let lb = sample().set_value(Vec::<crate::condition::Condition>::new());
        assert_eq!(
            lb.render_line().unwrap_err(),
            Error::EmptyGroup { group: "value" }
        );
    }

    #[test]
    fn test_unmeasured_value_rejected() {
        let lb = sample().set_value(word(0xe0).eq(lit(1)));
        assert_eq!(
            lb.render_line().unwrap_err(),
            Error::MeasuredRequired { group: "value" }
        );
    }
}
