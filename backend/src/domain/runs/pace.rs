//! Pace values attached to active and archived runs.

use std::fmt;
use std::str::FromStr;

/// Text form of [`Pace::Unavailable`].
pub const UNAVAILABLE_PACE: &str = "N/A";

/// Running pace.
///
/// No pace model is wired in by default, so most runs carry
/// [`Pace::Unavailable`].
///
/// # Examples
/// ```
/// use running_late::domain::Pace;
///
/// assert_eq!(Pace::Unavailable.to_string(), "N/A");
/// assert_eq!("315".parse::<Pace>(), Ok(Pace::SecondsPerKilometre(315)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pace {
    #[default]
    Unavailable,
    SecondsPerKilometre(u32),
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str(UNAVAILABLE_PACE),
            Self::SecondsPerKilometre(seconds) => write!(f, "{seconds}"),
        }
    }
}

/// Stored pace text that is neither `N/A` nor a whole number of seconds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised pace value: {0}")]
pub struct PaceParseError(String);

impl FromStr for Pace {
    type Err = PaceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == UNAVAILABLE_PACE {
            return Ok(Self::Unavailable);
        }
        trimmed
            .parse::<u32>()
            .map(Self::SecondsPerKilometre)
            .map_err(|_| PaceParseError(s.to_owned()))
    }
}
