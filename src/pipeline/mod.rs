/*!
The pipeline, from raw expressions to a verification summary.

Stages run strictly in sequence, each on the whole batch:

```none
raw lines --> normalize --> simplify --> verify --> (narrate)
               |             |            |
               |             |            +-> VerificationSummary
               |             +-> SimplifyOutcome, with the expression store
               +-> NormalizeOutcome
```

Each stage takes the outcome of the stage before by value, so no stage can run before the stage it depends on.

A failure of some expression at some stage is recorded as a [StageFailure], and the expression takes no further part.
Only failures of infrastructure, e.g. an unreadable input file, halt a run, as a [PipelineError].

# Output

[run_file](Pipeline::run_file) writes, to the output directory:
- `expressions.csv`, the expression store, which is read back for verification.
- `mappings.txt`, the mapping of each record.
- `verification_results.txt`, the summary.
- `nl_outputs/nl_{index}.txt`, the narration of each record, if narration is enabled.

```rust
# use otter_simplify::pipeline::Pipeline;
# use otter_simplify::config::Config;
let pipeline = Pipeline::new(Config::default());
let verified = pipeline.run_text("a && b\n# a comment\n\nx || !x\nA XOR B\n");

assert_eq!(verified.store.len(), 2);
assert_eq!(verified.store.records()[1].simplified, "true");
assert_eq!(verified.summary.equivalent, 2);
assert_eq!(verified.summary.normalization_failures(), 1);
```
*/

use std::{
    io::Read,
    path::{Path, PathBuf},
};

use crate::{
    config::Config,
    misc::log::targets,
    narrate::{self, Narrator, TemplateNarrator},
    normalizer::{NormalizedExpression, Normalizer, VariableMapping},
    reports::{FailureStage, StageFailure, VerificationSummary},
    sat::{ContextEngine, SatEngine},
    simplify::{simplify_normalized, QuineMcCluskey, SimplifiedExpression, Simplifier},
    store::{ExpressionRecord, ExpressionStore},
    types::err::{ErrorKind, PipelineError},
    verifier::Verifier,
};

/// The name of the persisted expression store.
pub const EXPRESSIONS_FILE: &str = "expressions.csv";

/// The name of the persisted mappings.
pub const MAPPINGS_FILE: &str = "mappings.txt";

/// The name of the written summary.
pub const RESULTS_FILE: &str = "verification_results.txt";

/// The name of the directory of narrations.
pub const NARRATION_DIRECTORY: &str = "nl_outputs";

/// A line of input, with its (1-based) line number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputLine {
    pub line: usize,
    pub raw: String,
}

/// A raw expression which was normalized.
#[derive(Clone, Debug)]
pub struct NormalizedLine {
    pub input: InputLine,
    pub normalized: NormalizedExpression,
    pub mapping: VariableMapping,
}

/// The outcome of normalization.
#[derive(Clone, Debug, Default)]
pub struct NormalizeOutcome {
    /// Each normalized expression, in input order.
    pub normalized: Vec<NormalizedLine>,

    /// Each expression which failed normalization, in input order.
    pub failures: Vec<StageFailure>,

    /// Hits of the mapping cache.
    pub cache_hits: usize,
}

/// The outcome of simplification.
#[derive(Clone, Debug, Default)]
pub struct SimplifyOutcome {
    /// A record of each simplified expression, in input order.
    pub store: ExpressionStore,

    /// The simplification of each record, indexed as the store.
    pub simplified: Vec<SimplifiedExpression>,

    /// Each expression which failed normalization or simplification, in input order.
    pub failures: Vec<StageFailure>,
}

/// The outcome of verification.
#[derive(Clone, Debug, Default)]
pub struct VerifyOutcome {
    pub store: ExpressionStore,

    /// The simplification of each record, indexed as the store.
    pub simplified: Vec<SimplifiedExpression>,

    pub summary: VerificationSummary,
}

/// The outcome of a run on some file.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    pub verified: VerifyOutcome,

    /// A count of narrations written.
    pub narrations: usize,

    /// The directory to which output was written.
    pub output_dir: PathBuf,
}

/// The lines of `text` which hold an expression, skipping empty lines and comments (lines beginning with `#`).
pub fn input_lines(text: &str) -> Vec<InputLine> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let trimmed = line.trim();
            match trimmed.is_empty() || trimmed.starts_with('#') {
                true => None,
                false => Some(InputLine {
                    line: index + 1,
                    raw: trimmed.to_string(),
                }),
            }
        })
        .collect()
}

/// The text of the file at `path`.
///
/// With the `xz` feature, a file with extension `xz` is decompressed.
pub fn read_input(path: &Path) -> Result<String, PipelineError> {
    if !path.exists() {
        return Err(PipelineError::MissingInput(path.to_path_buf()));
    }

    let read_error = |e: std::io::Error| PipelineError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let file = std::fs::File::open(path).map_err(read_error)?;
    let mut text = String::new();

    match path.extension() {
        #[cfg(feature = "xz")]
        Some(extension) if extension == "xz" => {
            xz2::read::XzDecoder::new(std::io::BufReader::new(file))
                .read_to_string(&mut text)
                .map_err(read_error)?;
        }

        _ => {
            std::io::BufReader::new(file)
                .read_to_string(&mut text)
                .map_err(read_error)?;
        }
    }

    Ok(text)
}

/// A pipeline, with an engine for each stage.
pub struct Pipeline {
    config: Config,
    simplifier: Box<dyn Simplifier>,
    verifier: Verifier,
    narrator: Box<dyn Narrator>,
}

impl Pipeline {
    /// A pipeline with the engines shipped with the library.
    pub fn new(config: Config) -> Self {
        let simplifier = Box::new(QuineMcCluskey::new(config.simplifier.clone()));
        let sat_engine = Box::new(ContextEngine::new(config.verifier.clone()));
        Self::with_engines(config, simplifier, sat_engine, Box::new(TemplateNarrator))
    }

    /// A pipeline with the given engines.
    pub fn with_engines(
        config: Config,
        simplifier: Box<dyn Simplifier>,
        sat_engine: Box<dyn SatEngine>,
        narrator: Box<dyn Narrator>,
    ) -> Self {
        let verifier = Verifier::with_engine(config.verifier.clone(), sat_engine);
        Pipeline {
            config,
            simplifier,
            verifier,
            narrator,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Normalizes each of `lines`, with a mapping cache for the batch.
    pub fn normalize(&self, lines: Vec<InputLine>) -> NormalizeOutcome {
        let mut normalizer = Normalizer::new(self.config.normalizer.clone());
        let mut outcome = NormalizeOutcome::default();

        for input in lines {
            match normalizer.normalize(&input.raw) {
                Ok((normalized, mapping)) => outcome.normalized.push(NormalizedLine {
                    input,
                    normalized,
                    mapping,
                }),

                Err(error) => {
                    log::warn!(target: targets::NORMALIZER, "Line {}: {error}", input.line);
                    outcome.failures.push(StageFailure {
                        line: input.line,
                        raw: input.raw,
                        stage: FailureStage::Normalization,
                        error,
                    });
                }
            }
        }

        outcome.cache_hits = normalizer.cache().hits;
        log::info!(
            target: targets::PIPELINE,
            "Normalized {} expressions, with {} failures and {} cache hits",
            outcome.normalized.len(),
            outcome.failures.len(),
            outcome.cache_hits
        );
        outcome
    }

    /// Simplifies each normalized expression of `outcome`, appending a record of each to a fresh store.
    pub fn simplify(&self, outcome: NormalizeOutcome) -> SimplifyOutcome {
        let mut simplified_outcome = SimplifyOutcome {
            failures: outcome.failures,
            ..Default::default()
        };

        for line in outcome.normalized {
            match simplify_normalized(self.simplifier.as_ref(), &line.normalized) {
                Ok(simplified) => {
                    let record = ExpressionRecord::new(&line.normalized.text, &simplified.text);
                    simplified_outcome.store.append(record, line.mapping);
                    simplified_outcome.simplified.push(simplified);
                }

                Err(error) => {
                    log::warn!(target: targets::SIMPLIFY, "Line {}: {error}", line.input.line);
                    simplified_outcome.failures.push(StageFailure {
                        line: line.input.line,
                        raw: line.input.raw,
                        stage: FailureStage::Simplification,
                        error: ErrorKind::Simplification(error),
                    });
                }
            }
        }

        simplified_outcome.failures.sort_by_key(|failure| failure.line);
        simplified_outcome
    }

    /// Verifies each record of the store of `outcome`.
    pub fn verify(&self, outcome: SimplifyOutcome) -> VerifyOutcome {
        let records = outcome.store.records();
        let verdicts = self.verifier.verify_all(records);
        let summary = VerificationSummary::from_verdicts(records, verdicts, outcome.failures);

        VerifyOutcome {
            store: outcome.store,
            simplified: outcome.simplified,
            summary,
        }
    }

    /// Writes a narration of each simplified expression to `directory`, returning a count of narrations written.
    ///
    /// Failures are logged, and otherwise ignored.
    pub fn narrate(&self, outcome: &VerifyOutcome, directory: &Path) -> usize {
        if let Err(e) = std::fs::create_dir_all(directory) {
            log::error!(target: targets::NARRATION, "{}: {e}", directory.display());
            return 0;
        }

        let mut written = 0;
        for (index, simplified) in outcome.simplified.iter().enumerate() {
            let Some(mapping) = outcome.store.mapping(index) else {
                continue;
            };

            let result = self
                .narrator
                .narrate(&simplified.expr, mapping)
                .and_then(|narration| {
                    let statement = mapping.restore(&simplified.expr).to_string();
                    narrate::write_narration(directory, index, &statement, &narration)
                });

            match result {
                Ok(_) => written += 1,
                Err(e) => log::warn!(target: targets::NARRATION, "Record {index}: {e}"),
            }
        }
        written
    }

    /// Runs each stage on `text`, read as lines of input.
    pub fn run_text(&self, text: &str) -> VerifyOutcome {
        let normalized = self.normalize(input_lines(text));
        let simplified = self.simplify(normalized);
        self.verify(simplified)
    }

    /// Runs each stage on the file at `input`, writing output to `output_dir`.
    pub fn run_file(&self, input: &Path, output_dir: &Path) -> Result<RunOutcome, PipelineError> {
        let text = read_input(input)?;
        log::info!(target: targets::PIPELINE, "Read {}", input.display());

        std::fs::create_dir_all(output_dir).map_err(|e| PipelineError::Write {
            path: output_dir.to_path_buf(),
            message: e.to_string(),
        })?;

        let normalized = self.normalize(input_lines(&text));
        let simplified = self.simplify(normalized);

        let expressions_path = output_dir.join(EXPRESSIONS_FILE);
        simplified.store.write_csv(&expressions_path)?;
        simplified.store.write_mappings(&output_dir.join(MAPPINGS_FILE))?;

        // Verification reads the records back from the persisted store.
        let persisted = ExpressionStore::read_csv(&expressions_path)?;
        let verified = self.verify(SimplifyOutcome {
            store: simplified.store.with_records(persisted)?,
            ..simplified
        });
        verified.summary.write(&output_dir.join(RESULTS_FILE))?;

        let narrations = match self.config.pipeline.narrate.value {
            true => self.narrate(&verified, &output_dir.join(NARRATION_DIRECTORY)),
            false => 0,
        };

        Ok(RunOutcome {
            verified,
            narrations,
            output_dir: output_dir.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    #[test]
    fn comments_and_blanks() {
        let lines = input_lines("# header\n\n  a && b  \n\t\n#a || b\nc\n");
        assert_eq!(
            lines,
            vec![
                InputLine {
                    line: 3,
                    raw: "a && b".to_string()
                },
                InputLine {
                    line: 6,
                    raw: "c".to_string()
                },
            ]
        );
    }

    #[test]
    fn failures_in_line_order() {
        let mut config = Config::default();
        config.simplifier.max_atoms.value = 2;
        let pipeline = Pipeline::new(config);

        let verified = pipeline.run_text("a && b && c\nx ^ y\np || q\n");
        let lines = verified
            .summary
            .failures
            .iter()
            .map(|failure| (failure.line, failure.stage))
            .collect::<Vec<_>>();
        assert_eq!(
            lines,
            vec![
                (1, FailureStage::Simplification),
                (2, FailureStage::Normalization)
            ]
        );
        assert_eq!(verified.summary.total, 1);
    }
}
