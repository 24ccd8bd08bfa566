use std::path::PathBuf;

use otter_simplify::{
    config::Config,
    narrate::TemplateNarrator,
    pipeline::{self, Pipeline},
    reports::FailureStage,
    sat::ContextEngine,
    simplify::Simplifier,
    store::ExpressionStore,
    structures::expression::Expr,
    types::err::{ErrorKind, FormatError, PipelineError, SimplificationFailure},
};

mod examples {
    use super::*;

    #[test]
    fn conjunction() {
        let verified = Pipeline::new(Config::default()).run_text("A && B\n");

        assert_eq!(verified.store.records()[0].original, "A && B");
        assert_eq!(verified.store.records()[0].simplified, "A && B");
        assert_eq!(verified.summary.equivalent, 1);
        assert_eq!(verified.summary.errors, 0);
    }

    #[test]
    fn excluded_middle() {
        let verified = Pipeline::new(Config::default()).run_text("X || !X\n");

        assert_eq!(verified.store.mapping(0).unwrap().len(), 1);
        assert_eq!(verified.store.records()[0].simplified, "true");
        assert!(verified.summary.all_equivalent());
    }

    #[test]
    fn unsupported_operator() {
        let verified = Pipeline::new(Config::default()).run_text("A XOR B\n");

        assert!(verified.store.is_empty());
        assert_eq!(verified.summary.total, 0);
        assert_eq!(verified.summary.normalization_failures(), 1);
        assert!(matches!(
            verified.summary.failures[0].error,
            ErrorKind::Format(FormatError::UnknownOperator { .. })
        ));
        assert!(!verified.summary.all_equivalent());
    }
}

mod batches {
    use super::*;

    const BATCH: &str = "\
a && b
a XOR b
x || !x
(p || q) && (p || r)
a &&
speed > 5 => brake_on
v0 || v1 || v2 || v3 || v4 || v5 || v6 || v7 || v8 || v9 || v10 || v11 || v12 || v13
";

    #[test]
    fn counts() {
        let verified = Pipeline::new(Config::default()).run_text(BATCH);
        let summary = &verified.summary;

        assert_eq!(summary.normalization_failures(), 2);
        assert_eq!(summary.simplification_failures(), 1);
        assert_eq!(summary.total, verified.store.len());
        assert_eq!(summary.total, 4);
        assert_eq!(
            summary.total,
            summary.equivalent + summary.non_equivalent + summary.errors
        );

        let lines = summary
            .failures
            .iter()
            .map(|failure| failure.line)
            .collect::<Vec<_>>();
        assert_eq!(lines, vec![2, 5, 7]);
        assert_eq!(summary.failures[2].stage, FailureStage::Simplification);
    }

    #[test]
    fn simplification_time_limit() {
        let mut config = Config::default();
        config.simplifier.max_atoms.value = 16;
        config.simplifier.time_limit.value = std::time::Duration::from_nanos(1);

        let wide = (0..16)
            .map(|index| format!("v{index}"))
            .collect::<Vec<_>>()
            .join(" || ");
        let verified = Pipeline::new(config).run_text(&format!("{wide}\n"));
        let summary = &verified.summary;

        assert_eq!(summary.total, 0);
        assert_eq!(summary.simplification_failures(), 1);
        assert_eq!(summary.failures[0].stage, FailureStage::Simplification);
        assert!(matches!(
            &summary.failures[0].error,
            ErrorKind::Simplification(error) if error.failure == SimplificationFailure::TimeUp
        ));
    }

    #[test]
    fn parallel_is_sequential() {
        let sequential = Pipeline::new(Config::default()).run_text(BATCH);

        let mut config = Config::default();
        config.verifier.workers.value = 3;
        let parallel = Pipeline::new(config).run_text(BATCH);

        assert_eq!(sequential.summary, parallel.summary);
        assert_eq!(sequential.summary.to_string(), parallel.summary.to_string());
    }
}

mod engines {
    use super::*;

    /// Drops the last conjunct of a conjunction.
    struct Careless;

    impl Simplifier for Careless {
        fn simplify(&self, expr: &Expr) -> Result<Expr, SimplificationFailure> {
            match expr {
                Expr::And(conjuncts) if conjuncts.len() > 1 => {
                    Ok(Expr::and(conjuncts[..conjuncts.len() - 1].to_vec()))
                }
                other => Ok(other.clone()),
            }
        }
    }

    #[test]
    fn unsound_simplifier() {
        let config = Config::default();
        let pipeline = Pipeline::with_engines(
            config.clone(),
            Box::new(Careless),
            Box::new(ContextEngine::new(config.verifier.clone())),
            Box::new(TemplateNarrator),
        );

        let verified = pipeline.run_text("a && b\na || b\nc && (c || d)\n");
        let summary = &verified.summary;

        assert_eq!(summary.total, 3);
        assert_eq!(summary.equivalent, 2);
        assert_eq!(summary.non_equivalent, 1);
        assert_eq!(summary.non_equivalent_findings[0].index, 0);

        let report = summary.to_string();
        assert!(report.contains("\nPair 1:\nOriginal: A && B\nSimplified: A\nCounterexample:\n  A = true\n  B = false\n"));
    }
}

mod files {
    use super::*;

    #[test]
    fn outputs() {
        let directory = tempfile::tempdir().unwrap();
        let input = directory.path().join("expressions.txt");
        std::fs::write(&input, "# doors\ndoor_open and not (speed>5)\nlocked || !locked\n").unwrap();
        let output = directory.path().join("out");

        let outcome = Pipeline::new(Config::default())
            .run_file(&input, &output)
            .unwrap();
        assert_eq!(outcome.narrations, 2);

        let records = ExpressionStore::read_csv(&output.join(pipeline::EXPRESSIONS_FILE)).unwrap();
        assert_eq!(records, outcome.verified.store.records());
        assert_eq!(outcome.verified.summary.total, records.len());

        let mappings = std::fs::read_to_string(output.join(pipeline::MAPPINGS_FILE)).unwrap();
        assert!(mappings.contains("A -> \"door_open\"\nB -> \"speed > 5\"\n"));

        let results = std::fs::read_to_string(output.join(pipeline::RESULTS_FILE)).unwrap();
        assert!(results.starts_with("Verification Summary:\n"));
        assert!(results.contains("Equivalent pairs: 2\n"));

        let narration = std::fs::read_to_string(
            output.join(pipeline::NARRATION_DIRECTORY).join("nl_0.txt"),
        )
        .unwrap();
        assert!(narration.starts_with("Logical Statement:\ndoor_open && !(speed > 5)\n\nFinal Combined Translation:\n"));
    }

    #[test]
    fn verified_from_file() {
        let directory = tempfile::tempdir().unwrap();
        let input = directory.path().join("expressions.txt");
        std::fs::write(&input, "x > 1 && (y >= 2 || z)\nnot (p or q)\np || (q && !q)\n").unwrap();
        let output = directory.path().join("out");

        let pipeline = Pipeline::new(Config::default());
        let outcome = pipeline.run_file(&input, &output).unwrap();
        let in_memory = pipeline.run_text(&std::fs::read_to_string(&input).unwrap());

        let persisted = ExpressionStore::read_csv(&output.join(pipeline::EXPRESSIONS_FILE)).unwrap();
        assert_eq!(persisted, outcome.verified.store.records());
        assert_eq!(persisted, in_memory.store.records());
        assert_eq!(outcome.verified.summary, in_memory.summary);
        assert!(outcome.verified.summary.all_equivalent());
    }

    #[test]
    fn no_narration() {
        let directory = tempfile::tempdir().unwrap();
        let input = directory.path().join("expressions.txt");
        std::fs::write(&input, "a || b\n").unwrap();
        let output = directory.path().join("out");

        let mut config = Config::default();
        config.pipeline.narrate.value = false;
        let outcome = Pipeline::new(config).run_file(&input, &output).unwrap();

        assert_eq!(outcome.narrations, 0);
        assert!(!output.join(pipeline::NARRATION_DIRECTORY).exists());
    }

    #[test]
    fn missing_input() {
        let directory = tempfile::tempdir().unwrap();
        let input = directory.path().join("absent.txt");

        assert_eq!(
            Pipeline::new(Config::default())
                .run_file(&input, directory.path())
                .err(),
            Some(PipelineError::MissingInput(input))
        );
    }

    #[test]
    fn fixtures() {
        let pattern = format!("{}/tests/specs/*.txt", env!("CARGO_MANIFEST_DIR"));
        let mut count = 0;

        for entry in glob::glob(&pattern).unwrap() {
            let path: PathBuf = entry.unwrap();
            let directory = tempfile::tempdir().unwrap();

            let outcome = Pipeline::new(Config::default())
                .run_file(&path, directory.path())
                .unwrap();
            let summary = &outcome.verified.summary;

            assert!(summary.total > 0, "{path:?}");
            assert!(summary.all_equivalent(), "{path:?}\n{summary}");
            count += 1;
        }

        assert!(count >= 3);
    }
}
