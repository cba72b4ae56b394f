use std::fmt;
use std::str::FromStr;

/// A discrete time step. Step 0 is the first step; the last one is the horizon.
pub type Step = usize;

/// Dense identifier of an operation inside one [`DependencyGraph`].
///
/// Identifiers follow the lexicographic order of operation names, so
/// comparing two `OpId`s compares their names.
///
/// [`DependencyGraph`]: crate::dag::DependencyGraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OpId(pub(crate) usize);

impl OpId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for OpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op#{}", self.0)
    }
}

/// Row ordering for the printed schedule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Assigned step, then name (default).
    #[default]
    Step,
    Name,
    /// ASAP step, then name.
    Asap,
    /// Slack, then name; critical operations come first.
    Slack,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "step" => Ok(SortKey::Step),
            "name" => Ok(SortKey::Name),
            "asap" => Ok(SortKey::Asap),
            "slack" => Ok(SortKey::Slack),
            other => Err(format!(
                "invalid sort key: {other} (expected \"step\", \"name\", \"asap\" or \"slack\")"
            )),
        }
    }
}
