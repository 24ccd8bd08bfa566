/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library.
These are intended to provide useful information for following a batch through the pipeline and/or fixing issues.

Note, no log implementation is provided by the library.
The cli installs [env_logger](https://docs.rs/env_logger/latest/env_logger/) when built with the `log` feature.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to the [normalizer](crate::normalizer)
    pub const NORMALIZER: &str = "normalizer";

    /// Logs related to the [mapping cache](crate::normalizer::MappingCache)
    pub const MAPPING_CACHE: &str = "mapping_cache";

    /// Logs related to [simplification](crate::simplify)
    pub const SIMPLIFY: &str = "simplify";

    /// Logs related to the [expression store](crate::store)
    pub const STORE: &str = "store";

    /// Logs related to [verification](crate::verifier)
    pub const VERIFY: &str = "verify";

    /// Logs related to [BCP](crate::procedures::bcp)
    pub const PROPAGATION: &str = "propagation";

    /// Logs related to [decisions](crate::procedures::decision)
    pub const DECISION: &str = "decision";

    /// Logs related to [backtracking](crate::procedures::backtrack)
    pub const BACKTRACK: &str = "backtrack";

    /// Logs related to [reports](crate::reports)
    pub const REPORT: &str = "report";

    /// Logs related to the [pipeline](crate::pipeline)
    pub const PIPELINE: &str = "pipeline";

    /// Logs related to [narration](crate::narrate)
    pub const NARRATION: &str = "narration";
}
