//! Price range buckets offered by the filter controls

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

const SEPARATOR: char = '-';
const OPEN_UPPER: &str = "above";

/// Symbolic price range token
///
/// Serialized as its token: `"300-1000"` or `"5000-above"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PriceRange {
    /// `min-max`, both bounds inclusive
    Between { min: u64, max: u64 },
    /// `min-above`, no upper bound
    Above { min: u64 },
}

impl PriceRange {
    /// Ranges offered by the price dropdown, in display order
    pub const PRESETS: [PriceRange; 4] = [
        PriceRange::Between { min: 0, max: 300 },
        PriceRange::Between { min: 300, max: 1000 },
        PriceRange::Between { min: 1000, max: 5000 },
        PriceRange::Above { min: 5000 },
    ];

    pub fn min(&self) -> u64 {
        match *self {
            Self::Between { min, .. } | Self::Above { min } => min,
        }
    }

    pub fn max(&self) -> Option<u64> {
        match *self {
            Self::Between { max, .. } => Some(max),
            Self::Above { .. } => None,
        }
    }

    /// Human-readable label, e.g. `$1,000 - $5,000` or `$5,000 & Above`
    pub fn label(&self) -> String {
        match *self {
            Self::Between { min, max } => {
                format!("${} - ${}", group_thousands(min), group_thousands(max))
            }
            Self::Above { min } => format!("${} & Above", group_thousands(min)),
        }
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Between { min, max } => write!(f, "{min}{SEPARATOR}{max}"),
            Self::Above { min } => write!(f, "{min}{SEPARATOR}{OPEN_UPPER}"),
        }
    }
}

impl FromStr for PriceRange {
    type Err = ParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        let (low, high) = token
            .split_once(SEPARATOR)
            .ok_or_else(|| ParseError::MissingSeparator(token.to_string()))?;

        let parse_bound = |bound: &str| {
            bound.parse::<u64>().map_err(|_| ParseError::InvalidBound {
                token: token.to_string(),
                bound: bound.to_string(),
            })
        };

        let min = parse_bound(low)?;
        if high.eq_ignore_ascii_case(OPEN_UPPER) {
            return Ok(Self::Above { min });
        }
        let max = parse_bound(high)?;
        if min > max {
            return Err(ParseError::Inverted(token.to_string()));
        }
        Ok(Self::Between { min, max })
    }
}

impl TryFrom<String> for PriceRange {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PriceRange> for String {
    fn from(range: PriceRange) -> Self {
        range.to_string()
    }
}
