use otter_simplify::{
    config::{stages::NormalizerConfig, CapacityPolicy},
    normalizer::{parse_raw, Normalizer},
    structures::expression::Expr,
    types::err::{CapacityError, ErrorKind, FormatError},
};

/// Whether `a` and `b` agree on every valuation of `symbols`.
fn same_truth_table(a: &Expr, b: &Expr, symbols: &[String]) -> bool {
    (0..(1_u32 << symbols.len())).all(|row| {
        let value = |symbol: &str| match symbols.iter().position(|s| s == symbol) {
            Some(index) => row & (1 << index) != 0,
            None => false,
        };
        a.evaluate(&value) == b.evaluate(&value)
    })
}

mod round_trip {
    use super::*;

    #[test]
    fn restored_truth_table() {
        let mut normalizer = Normalizer::new(NormalizerConfig::default());

        for raw in [
            "a && b",
            "door_open or not (speed>5)",
            "p implies (q & ~r) | s",
            "!(x + 1 == y) => (x+1==y || z)",
            "dw.mode && dw.mode -> dw.other",
            "TRUE and (a or False)",
        ] {
            let original = parse_raw(raw, &[]).unwrap();
            let (normalized, mapping) = normalizer.normalize(raw).unwrap();
            let restored = mapping.restore(&normalized.expr);

            assert!(
                same_truth_table(&original, &restored, &original.symbols()),
                "{raw} and {restored} differ"
            );
        }
    }

    #[test]
    fn mapping_is_injective_and_total() {
        let mut normalizer = Normalizer::new(NormalizerConfig::default());
        let raw = "alpha && beta || gamma && (alpha || delta) -> epsilon";
        let original = parse_raw(raw, &[]).unwrap();
        let (normalized, mapping) = normalizer.normalize(raw).unwrap();

        assert_eq!(mapping.len(), 5);
        for identifier in original.symbols() {
            let symbol = mapping.symbol_of(&identifier).unwrap();
            assert_eq!(mapping.original_of(&symbol), Some(identifier.as_str()));
        }

        let mut symbols = normalized.expr.symbols();
        symbols.sort();
        assert_eq!(symbols, vec!["A", "B", "C", "D", "E"]);
    }
}

mod options {
    use super::*;

    fn many_identifiers(count: usize) -> String {
        (0..count)
            .map(|index| format!("v{index}"))
            .collect::<Vec<_>>()
            .join(" || ")
    }

    #[test]
    fn capacity() {
        let raw = many_identifiers(27);

        let mut rejecting = Normalizer::new(NormalizerConfig::default());
        assert!(matches!(
            rejecting.normalize(&raw),
            Err(ErrorKind::Capacity(CapacityError::AlphabetExhausted { .. }))
        ));
        assert!(rejecting.normalize(&many_identifiers(26)).is_ok());

        let mut config = NormalizerConfig::default();
        config.capacity.value = CapacityPolicy::Extend;
        let mut extending = Normalizer::new(config);
        let (normalized, mapping) = extending.normalize(&raw).unwrap();
        assert!(normalized.text.ends_with("Z || AA"));
        assert_eq!(mapping.original_of("AA"), Some("v26"));
    }

    #[test]
    fn strip_prefixes() {
        let mut config = NormalizerConfig::default();
        config.strip_prefixes = vec!["dw.".to_string()];
        let mut normalizer = Normalizer::new(config);

        let (normalized, mapping) = normalizer.normalize("dw.p && (p || dw.q)").unwrap();
        assert_eq!(normalized.text, "A && (A || B)");
        assert_eq!(mapping.original_of("B"), Some("q"));
    }

    #[test]
    fn cache() {
        let mut normalizer = Normalizer::new(NormalizerConfig::default());
        let first = normalizer.normalize("a &&   b").unwrap();
        let second = normalizer.normalize(" a && b ").unwrap();
        assert_eq!(first, second);
        assert_eq!(normalizer.cache().hits, 1);

        let mut config = NormalizerConfig::default();
        config.cache.value = false;
        let mut uncached = Normalizer::new(config);
        let _ = uncached.normalize("a && b");
        let _ = uncached.normalize("a && b");
        assert_eq!(uncached.cache().hits, 0);
    }
}

mod rejections {
    use super::*;

    #[test]
    fn unsupported_syntax() {
        for raw in ["A XOR B", "a <-> b", "a <=> b", "a ^ b", "a nand b"] {
            assert!(
                matches!(
                    parse_raw(raw, &[]),
                    Err(FormatError::UnknownOperator { .. })
                ),
                "{raw}"
            );
        }
    }

    #[test]
    fn malformed() {
        assert_eq!(parse_raw("", &[]), Err(FormatError::Empty));
        assert_eq!(
            parse_raw("a && (b || c", &[]),
            Err(FormatError::UnbalancedParenthesis { position: 5 })
        );
        assert!(matches!(
            parse_raw("a || b)", &[]),
            Err(FormatError::UnbalancedParenthesis { .. })
        ));
        assert_eq!(parse_raw("a ||", &[]), Err(FormatError::UnexpectedEnd));
        assert!(matches!(
            parse_raw("a @ b", &[]),
            Err(FormatError::UnexpectedCharacter { character: '@', .. })
                | Err(FormatError::UnknownOperator { .. })
        ));
    }

    #[test]
    fn nesting() {
        let mut normalizer = Normalizer::new(NormalizerConfig::default());
        let limit = NormalizerConfig::default().max_depth.value;

        let grouped = |depth: usize| format!("{}a{}", "(".repeat(depth), ")".repeat(depth));
        let (normalized, _) = normalizer.normalize(&grouped(limit)).unwrap();
        assert_eq!(normalized.text, "A");
        assert_eq!(
            normalizer.normalize(&grouped(limit + 1)),
            Err(ErrorKind::Format(FormatError::TooDeep { position: limit }))
        );

        let negations = format!("{}a", "!".repeat(200_000));
        assert_eq!(
            normalizer.normalize(&negations),
            Err(ErrorKind::Format(FormatError::TooDeep { position: limit }))
        );

        let mut config = NormalizerConfig::default();
        config.max_depth.value = 2;
        let mut shallow = Normalizer::new(config);
        assert!(shallow.normalize("!(a || b)").is_ok());
        assert!(shallow.normalize("(x + 1) > y").is_ok());
        assert_eq!(
            shallow.normalize("!!(a)"),
            Err(ErrorKind::Format(FormatError::TooDeep { position: 2 }))
        );
    }
}
