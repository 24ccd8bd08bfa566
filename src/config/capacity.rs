use std::str::FromStr;

/// What to do when the canonical alphabet has no fresh symbol for an identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum CapacityPolicy {
    /// Fail with a [CapacityError](crate::types::err::CapacityError).
    Reject = 0,

    /// Continue the alphabet with multi-letter symbols: `AA`, `AB`, …
    Extend,
}

impl std::fmt::Display for CapacityPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reject => write!(f, "reject"),
            Self::Extend => write!(f, "extend"),
        }
    }
}

impl CapacityPolicy {
    /// The minimum CapacityPolicy type.
    pub const MIN: CapacityPolicy = CapacityPolicy::Reject;

    /// The maximum CapacityPolicy type.
    pub const MAX: CapacityPolicy = CapacityPolicy::Extend;
}

impl FromStr for CapacityPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reject" | "Reject" => Ok(Self::Reject),

            "extend" | "Extend" => Ok(Self::Extend),

            _unknown_string => Err(()),
        }
    }
}
