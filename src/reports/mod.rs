/*!
Reports on a run.

A [VerificationSummary] is built from the ordered verdicts of the verifier, together with the failures of earlier stages.
The summary keeps the order of records, and keeps every finding: no finding is merged with another.

The written form of a summary begins:

```none
Verification Summary:
====================
Total pairs processed: 3
Equivalent pairs: 1
Non-equivalent pairs: 1
Errors: 1
Normalization failures: 0
Simplification failures: 0
```

And continues with a section for each non-empty list of findings: non-equivalent pairs, verification errors, and stage failures.
*/

use std::path::Path;

use crate::{
    misc::log::targets,
    store::ExpressionRecord,
    types::err::{ErrorKind, PipelineError},
    verifier::VerificationVerdict,
};

/// A record, with a verdict other than equivalence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finding {
    /// The index of the record in the store.
    pub index: usize,

    pub record: ExpressionRecord,

    pub verdict: VerificationVerdict,
}

/// The stage at which an expression failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureStage {
    Normalization,
    Simplification,
}

impl std::fmt::Display for FailureStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normalization => write!(f, "normalization"),
            Self::Simplification => write!(f, "simplification"),
        }
    }
}

/// An expression which failed before verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageFailure {
    /// The (1-based) line of the expression in the input.
    pub line: usize,

    /// The raw expression.
    pub raw: String,

    pub stage: FailureStage,

    pub error: ErrorKind,
}

/// A summary of verification, and of the failures of earlier stages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VerificationSummary {
    /// A count of records verified.
    pub total: usize,

    /// A count of records found equivalent.
    pub equivalent: usize,

    /// A count of records found not equivalent.
    pub non_equivalent: usize,

    /// A count of records for which verification failed.
    pub errors: usize,

    /// Each non-equivalent record, in order.
    pub non_equivalent_findings: Vec<Finding>,

    /// Each record for which verification failed, in order.
    pub error_findings: Vec<Finding>,

    /// Each failure of an earlier stage, in order.
    pub failures: Vec<StageFailure>,
}

impl VerificationSummary {
    /// A summary of `verdicts`, each the verdict on the record of the same index in `records`.
    pub fn from_verdicts(
        records: &[ExpressionRecord],
        verdicts: Vec<VerificationVerdict>,
        failures: Vec<StageFailure>,
    ) -> Self {
        let mut summary = VerificationSummary {
            failures,
            ..Default::default()
        };

        for (index, (record, verdict)) in records.iter().zip(verdicts).enumerate() {
            summary.total += 1;
            let finding = |verdict| Finding {
                index,
                record: record.clone(),
                verdict,
            };

            match verdict {
                VerificationVerdict::Equivalent => summary.equivalent += 1,

                VerificationVerdict::NonEquivalent(_) => {
                    summary.non_equivalent += 1;
                    summary.non_equivalent_findings.push(finding(verdict));
                }

                VerificationVerdict::Error(_) => {
                    summary.errors += 1;
                    summary.error_findings.push(finding(verdict));
                }
            }
        }

        log::info!(
            target: targets::REPORT,
            "{} records: {} equivalent, {} not equivalent, {} errors, {} stage failures",
            summary.total,
            summary.equivalent,
            summary.non_equivalent,
            summary.errors,
            summary.failures.len()
        );

        summary
    }

    /// A count of expressions which failed normalization.
    pub fn normalization_failures(&self) -> usize {
        self.count_failures(FailureStage::Normalization)
    }

    /// A count of expressions which failed simplification.
    pub fn simplification_failures(&self) -> usize {
        self.count_failures(FailureStage::Simplification)
    }

    fn count_failures(&self, stage: FailureStage) -> usize {
        self.failures
            .iter()
            .filter(|failure| failure.stage == stage)
            .count()
    }

    /// Whether every record was found equivalent, and no expression failed.
    pub fn all_equivalent(&self) -> bool {
        self.equivalent == self.total && self.failures.is_empty()
    }

    /// Writes the summary to the file at `path`.
    pub fn write(&self, path: &Path) -> Result<(), PipelineError> {
        std::fs::write(path, self.to_string()).map_err(|e| PipelineError::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

fn write_heading(f: &mut std::fmt::Formatter<'_>, heading: &str) -> std::fmt::Result {
    write!(f, "\n{heading}\n{}\n", "=".repeat(heading.len()))
}

fn write_finding(f: &mut std::fmt::Formatter<'_>, finding: &Finding) -> std::fmt::Result {
    writeln!(f, "\nPair {}:", finding.index + 1)?;
    writeln!(f, "Original: {}", finding.record.original)?;
    writeln!(f, "Simplified: {}", finding.record.simplified)?;

    match &finding.verdict {
        VerificationVerdict::NonEquivalent(counterexample) => {
            writeln!(f, "Counterexample:")?;
            for (symbol, value) in counterexample.model.iter() {
                writeln!(f, "  {symbol} = {value}")?;
            }
            writeln!(f, "Original value: {}", counterexample.original_value)?;
            writeln!(f, "Simplified value: {}", counterexample.simplified_value)
        }
        VerificationVerdict::Error(e) => writeln!(f, "Error: {e}"),
        VerificationVerdict::Equivalent => Ok(()),
    }
}

impl std::fmt::Display for VerificationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Verification Summary:")?;
        writeln!(f, "====================")?;
        writeln!(f, "Total pairs processed: {}", self.total)?;
        writeln!(f, "Equivalent pairs: {}", self.equivalent)?;
        writeln!(f, "Non-equivalent pairs: {}", self.non_equivalent)?;
        writeln!(f, "Errors: {}", self.errors)?;
        writeln!(f, "Normalization failures: {}", self.normalization_failures())?;
        writeln!(f, "Simplification failures: {}", self.simplification_failures())?;

        if !self.non_equivalent_findings.is_empty() {
            write_heading(f, "Non-equivalent Pairs:")?;
            for finding in &self.non_equivalent_findings {
                write_finding(f, finding)?;
            }
        }

        if !self.error_findings.is_empty() {
            write_heading(f, "Verification Errors:")?;
            for finding in &self.error_findings {
                write_finding(f, finding)?;
            }
        }

        if !self.failures.is_empty() {
            write_heading(f, "Stage Failures:")?;
            for failure in &self.failures {
                writeln!(f, "\nLine {}: {}", failure.line, failure.raw)?;
                writeln!(f, "Stage: {}", failure.stage)?;
                writeln!(f, "Kind: {}", failure.error.kind_name())?;
                writeln!(f, "Message: {}", failure.error)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod report_tests {
    use crate::types::err::{FormatError, VerificationError};

    use super::*;

    #[test]
    fn counts_and_order() {
        let records = vec![
            ExpressionRecord::new("A", "A"),
            ExpressionRecord::new("A", "!A"),
            ExpressionRecord::new("A", "B"),
        ];
        let verdicts = vec![
            VerificationVerdict::Equivalent,
            VerificationVerdict::Error(VerificationError::TimeUp),
            VerificationVerdict::Error(VerificationError::Worker("lost".to_string())),
        ];
        let failures = vec![StageFailure {
            line: 2,
            raw: "a XOR b".to_string(),
            stage: FailureStage::Normalization,
            error: ErrorKind::Format(FormatError::UnknownOperator {
                token: "XOR".to_string(),
                position: 2,
            }),
        }];

        let summary = VerificationSummary::from_verdicts(&records, verdicts, failures);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.equivalent, 1);
        assert_eq!(summary.errors, 2);
        assert_eq!(summary.error_findings[0].index, 1);
        assert_eq!(summary.error_findings[1].index, 2);
        assert_eq!(summary.normalization_failures(), 1);
        assert!(!summary.all_equivalent());

        let report = summary.to_string();
        assert!(report.starts_with(
            "Verification Summary:\n====================\nTotal pairs processed: 3\n"
        ));
        assert!(report.contains("Normalization failures: 1\n"));
        assert!(report.contains("\nPair 2:\nOriginal: A\nSimplified: !A\nError: solver time limit reached\n"));
        assert!(report.contains("Kind: FormatError\n"));
        assert!(!report.contains("Non-equivalent Pairs:"));
    }
}
