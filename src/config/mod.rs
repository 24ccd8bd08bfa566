/*!
Configuration of a pipeline.

Primary configuration is [Config].
All configuration for a run is contained within a config, and each stage clones the part of the configuration relevant to it.

```rust
# use otter_simplify::config::{CapacityPolicy, Config};
let mut config = Config::default();
assert_eq!(config.normalizer.capacity.value, CapacityPolicy::Reject);

assert!(config.verifier.workers.set_within_bounds(4));
assert!(!config.verifier.workers.set_within_bounds(0));
assert_eq!(config.verifier.workers.value, 4);
```
*/

mod config_option;
pub use config_option::ConfigOption;

mod capacity;
pub use capacity::CapacityPolicy;

mod normal_form;
pub use normal_form::NormalForm;

pub mod stages;
use stages::{NormalizerConfig, PipelineConfig, SimplifierConfig, VerifierConfig};

/// Representation for the probability of choosing `true`
pub type PolarityLean = f64;

/// The primary configuration structure.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Configuration of the normalizer.
    pub normalizer: NormalizerConfig,

    /// Configuration of the simplifier.
    pub simplifier: SimplifierConfig,

    /// Configuration of the verifier, and the contexts it builds.
    pub verifier: VerifierConfig,

    /// Configuration of the pipeline.
    pub pipeline: PipelineConfig,
}
