//! Generic structures, not tied to any particular part of the pipeline.

pub mod random;
