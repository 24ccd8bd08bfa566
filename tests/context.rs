use std::time::Duration;

use otter_simplify::{
    config::stages::VerifierConfig,
    context::{Context, Report},
    structures::{expression::Expr, literal::CLiteral},
    types::err::SolveError,
};

fn lit(int: i32) -> CLiteral {
    CLiteral::new(int.unsigned_abs(), int > 0)
}

/// Clauses placing `pigeons` pigeons into `pigeons - 1` holes, with p_ij as atom i * holes + j + 1.
fn pigeonhole(context: &mut Context, pigeons: i32) {
    let holes = pigeons - 1;
    for _ in 0..(pigeons * holes) {
        context.fresh_atom().unwrap();
    }
    for pigeon in 0..pigeons {
        let clause = (0..holes)
            .map(|hole| lit(pigeon * holes + hole + 1))
            .collect::<Vec<_>>();
        context.add_clause(clause).unwrap();
    }
    for hole in 0..holes {
        for a in 0..pigeons {
            for b in (a + 1)..pigeons {
                let clause = vec![lit(-(a * holes + hole + 1)), lit(-(b * holes + hole + 1))];
                context.add_clause(clause).unwrap();
            }
        }
    }
}

mod clauses {
    use super::*;

    #[test]
    fn one_literal() {
        let mut context = Context::from_config(&VerifierConfig::default());
        let p = context.fresh_atom().unwrap();
        assert!(context.add_clause(vec![CLiteral::new(p, true)]).is_ok());

        assert_eq!(context.solve(), Ok(Report::Satisfiable));
        assert_eq!(context.value_of(p), Some(true));
    }

    #[test]
    fn conflict() {
        let mut context = Context::from_config(&VerifierConfig::default());
        context.fresh_atom().unwrap();
        context.fresh_atom().unwrap();

        for clause in [vec![1, 2], vec![-1, -2], vec![1, -2], vec![-1, 2]] {
            let clause = clause.into_iter().map(lit).collect::<Vec<_>>();
            assert!(context.add_clause(clause).is_ok());
        }

        assert_eq!(context.solve(), Ok(Report::Unsatisfiable));
    }

    #[test]
    fn empty_clause() {
        let mut context = Context::from_config(&VerifierConfig::default());
        assert!(context.add_clause(Vec::<CLiteral>::new()).is_ok());
        assert_eq!(context.solve(), Ok(Report::Unsatisfiable));
    }

    #[test]
    fn unknown_atom() {
        let mut context = Context::from_config(&VerifierConfig::default());
        assert_eq!(
            context.add_clause(vec![lit(3)]),
            Err(SolveError::UnknownAtom)
        );
    }

    #[test]
    fn chain() {
        let mut context = Context::from_config(&VerifierConfig::default());
        for _ in 0..5 {
            context.fresh_atom().unwrap();
        }
        for (a, b) in [(1, 2), (2, 3), (3, 4), (4, 5)] {
            context.add_clause(vec![lit(-a), lit(b)]).unwrap();
        }
        context.add_clause(vec![lit(1)]).unwrap();

        assert_eq!(context.solve(), Ok(Report::Satisfiable));
        for atom in 1..=5 {
            assert_eq!(context.value_of(atom), Some(true));
        }
    }

    #[test]
    fn pigeons() {
        let mut context = Context::from_config(&VerifierConfig::default());
        pigeonhole(&mut context, 4);
        assert_eq!(context.solve(), Ok(Report::Unsatisfiable));
    }
}

mod expressions {
    use super::*;

    fn solve(text: &str) -> (Context, Report) {
        let mut context = Context::from_config(&VerifierConfig::default());
        context
            .assert_expression(&Expr::parse(text).unwrap())
            .unwrap();
        let report = context.solve().unwrap();
        (context, report)
    }

    #[test]
    fn models_satisfy() {
        for text in [
            "A && !B",
            "(A -> B) && A",
            "!(A || B) || C && D",
            "(A || B) && (!A || C) && (!B || !C)",
        ] {
            let (context, report) = solve(text);
            assert_eq!(report, Report::Satisfiable, "{text}");

            let value = |symbol: &str| {
                context
                    .atom_of(symbol)
                    .and_then(|atom| context.value_of(atom))
                    .unwrap_or(false)
            };
            assert!(Expr::parse(text).unwrap().evaluate(&value), "{text}");
        }
    }

    #[test]
    fn contradictions() {
        for text in [
            "A && !A",
            "(A -> B) && A && !B",
            "false",
            "!(A || !A)",
            "(A || B) && !A && !B",
        ] {
            assert_eq!(solve(text).1, Report::Unsatisfiable, "{text}");
        }
    }

    #[test]
    fn exclusive_disjunction() {
        let xor = Expr::xor(
            Expr::parse("A || B").unwrap(),
            Expr::parse("B || A").unwrap(),
        );
        let mut context = Context::from_config(&VerifierConfig::default());
        context.assert_expression(&xor).unwrap();
        assert_eq!(context.solve(), Ok(Report::Unsatisfiable));
    }
}

mod limits {
    use super::*;

    #[test]
    fn time_up() {
        let mut config = VerifierConfig::default();
        config.time_limit.value = Duration::from_nanos(1);

        let mut context = Context::from_config(&config);
        pigeonhole(&mut context, 9);
        assert_eq!(context.solve(), Ok(Report::TimeUp));
    }

    #[test]
    fn polarity_lean() {
        let mut config = VerifierConfig::default();
        config.polarity_lean.value = 1.0;

        let mut context = Context::from_config(&config);
        let p = context.fresh_atom().unwrap();
        let q = context.fresh_atom().unwrap();
        assert_eq!(context.solve(), Ok(Report::Satisfiable));
        assert_eq!(context.value_of(p), Some(true));
        assert_eq!(context.value_of(q), Some(true));
    }
}
