use std::time::Duration;

use otter_simplify::{
    config::{stages::SimplifierConfig, NormalForm},
    simplify::{QuineMcCluskey, Simplifier},
    structures::{expression::Expr, symbol::symbol},
    types::err::SimplificationFailure,
};

fn simplify(config: SimplifierConfig, text: &str) -> Expr {
    let engine = QuineMcCluskey::new(config);
    engine.simplify(&Expr::parse(text).unwrap()).unwrap()
}

fn agree(a: &Expr, b: &Expr) -> bool {
    let mut symbols = a.symbols();
    for symbol in b.symbols() {
        if !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    (0..(1_u32 << symbols.len())).all(|row| {
        let value = |symbol: &str| match symbols.iter().position(|s| s == symbol) {
            Some(index) => row & (1 << index) != 0,
            None => false,
        };
        a.evaluate(&value) == b.evaluate(&value)
    })
}

mod forms {
    use super::*;

    #[test]
    fn known_simplifications() {
        for (text, expected) in [
            ("A || !A", "true"),
            ("A && !A", "false"),
            ("A && (A || B)", "A"),
            ("A || A && B", "A"),
            ("A && B || A && !B", "A"),
            ("!(!A || !B)", "A && B"),
            ("(A || B) && (A || C)", "A || B && C"),
        ] {
            assert_eq!(
                simplify(SimplifierConfig::default(), text).to_string(),
                expected,
                "{text}"
            );
        }
    }

    #[test]
    fn requested_form() {
        let text = "(A || B) && (C || D)";

        let mut sop = SimplifierConfig::default();
        sop.form.value = NormalForm::Sop;
        let sop_expr = simplify(sop, text);
        assert!(matches!(sop_expr, Expr::Or(_)));
        assert_eq!(sop_expr.literal_count(), 8);

        let mut pos = SimplifierConfig::default();
        pos.form.value = NormalForm::Pos;
        let pos_expr = simplify(pos, text);
        assert!(matches!(pos_expr, Expr::And(_)));

        let auto_expr = simplify(SimplifierConfig::default(), text);
        assert_eq!(auto_expr, pos_expr);
        assert!(agree(&sop_expr, &pos_expr));
    }

    #[test]
    fn implications() {
        let text = "A && (A || B) -> C && C";

        let antecedent = simplify(SimplifierConfig::default(), text);
        assert_eq!(antecedent.to_string(), "A -> C && C");

        let mut whole = SimplifierConfig::default();
        whole.antecedent_only.value = false;
        let whole_expr = simplify(whole, text);
        assert_eq!(whole_expr.to_string(), "!A || C");
        assert!(agree(&antecedent, &whole_expr));
    }
}

mod soundness {
    use super::*;

    #[test]
    fn truth_table_is_kept() {
        let mut config = SimplifierConfig::default();
        config.antecedent_only.value = false;

        for text in [
            "A && B || C && D || !A && !D",
            "(A -> B) && (B -> C) && (C -> A)",
            "!(A && (B || !C)) || D && !E",
            "A && !B || !A && B",
            "(A || B || C) && (!A || !B) && (!B || !C) && (!A || !C)",
            "true && (A || false)",
        ] {
            let original = Expr::parse(text).unwrap();
            let simplified = simplify(config.clone(), text);
            assert!(agree(&original, &simplified), "{text} => {simplified}");
            assert!(Expr::parse(&simplified.to_string()).is_ok());
        }
    }

    #[test]
    fn atom_limit() {
        let mut config = SimplifierConfig::default();
        config.max_atoms.value = 3;
        let engine = QuineMcCluskey::new(config);

        let expr = Expr::parse("A && B && C && D").unwrap();
        assert_eq!(
            engine.simplify(&expr),
            Err(SimplificationFailure::TooManyAtoms { count: 4, limit: 3 })
        );
    }

    #[test]
    fn time_limit() {
        let wide = (0..8)
            .map(|pair| format!("{} && !{}", symbol(2 * pair), symbol(2 * pair + 1)))
            .collect::<Vec<_>>()
            .join(" || ");
        let expr = Expr::parse(&wide).unwrap();
        assert_eq!(expr.symbols().len(), 16);

        let mut config = SimplifierConfig::default();
        config.max_atoms.value = 16;
        config.time_limit.value = Duration::from_nanos(1);
        let engine = QuineMcCluskey::new(config);

        assert_eq!(engine.simplify(&expr), Err(SimplificationFailure::TimeUp));
    }
}
