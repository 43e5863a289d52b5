use std::fmt::{self, Display};

use crate::errors::InvalidLevelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
/// How much of a value is rendered
///
/// Raw integer levels are converted with [`TryFrom`], which rejects anything
/// outside of `{0, 1, 2}`.
///
/// # Example
/// ```rust
/// use objrepr::Level;
///
/// assert_eq!(Level::try_from(1_i64), Ok(Level::Expanded));
/// assert!(Level::try_from(3_i64).is_err());
/// ```
pub enum Level {
    /// Short, single line output
    #[default]
    Short = 0,
    /// Multi-line output with all public-facing data
    Expanded = 1,
    /// Multi-line output with everything, for diagnostics
    Debug = 2,
}

impl Level {
    /// The level used for the children of a container rendered at this level
    ///
    /// [`Level::Short`] has no lower level and returns itself.
    pub fn lower(self) -> Level {
        match self {
            Level::Short | Level::Expanded => Level::Short,
            Level::Debug => Level::Expanded,
        }
    }

    pub fn is_single_line(self) -> bool {
        self == Level::Short
    }
}

impl TryFrom<i64> for Level {
    type Error = InvalidLevelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Level::Short),
            1 => Ok(Level::Expanded),
            2 => Ok(Level::Debug),
            other => Err(InvalidLevelError(other)),
        }
    }
}

impl From<Level> for i64 {
    fn from(level: Level) -> i64 {
        level as i64
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}
