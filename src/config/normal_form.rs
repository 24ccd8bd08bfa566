use std::str::FromStr;

/// The two-level form a simplification is written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum NormalForm {
    /// Whichever of the two forms has fewer literals, preferring a sum of products on ties.
    Auto = 0,

    /// A disjunction of conjunctions.
    Sop,

    /// A conjunction of disjunctions.
    Pos,
}

impl std::fmt::Display for NormalForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Sop => write!(f, "sop"),
            Self::Pos => write!(f, "pos"),
        }
    }
}

impl NormalForm {
    /// The minimum NormalForm type.
    pub const MIN: NormalForm = NormalForm::Auto;

    /// The maximum NormalForm type.
    pub const MAX: NormalForm = NormalForm::Pos;
}

impl FromStr for NormalForm {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),

            "sop" | "dnf" => Ok(Self::Sop),

            "pos" | "cnf" => Ok(Self::Pos),

            _unknown_string => Err(()),
        }
    }
}
