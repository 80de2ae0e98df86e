//! Integration tests for parsing and printing qop assembly.

use qop_asm::{
    AccessorStyle, AsmConfig, ParseErrorKind, Parser, Printer, parse_operation, parse_operations,
    parse_type, print_operation,
};
use qop_ir::{Accessor, FamilyKind, IrError, ScalarParam, TypeRegistry, Value};

fn roundtrip(source: &str) -> String {
    let types = TypeRegistry::new();
    let op = parse_operation(source, &types).unwrap();
    print_operation(&op).unwrap()
}

#[test]
fn test_end_to_end_controlled_x() {
    let types = TypeRegistry::new();
    let source = "qop.cx %q0, %q1[2,4] : !qubit, !qureg<8> -> !qubit, !qureg<8>";
    let op = parse_operation(source, &types).unwrap();

    let operands = op.logical_operands().unwrap();
    assert_eq!(operands.len(), 2);
    assert_eq!(operands[0].value, Value::new("q0", types.qubit()));
    assert!(!operands[0].is_register_like());
    assert_eq!(operands[1].value.name, "q1");
    let accessor = operands[1].accessor.as_ref().unwrap();
    assert_eq!(accessor.start(), Some(&Accessor::Static(2)));
    assert_eq!(accessor.size(), Some(&Accessor::Static(4)));
    assert_eq!(accessor.step(), None);

    assert_eq!(print_operation(&op).unwrap(), source);
}

#[test]
fn test_canonical_forms() {
    let cases = [
        ("qop.h", "qop.h"),
        ("qop.h   %q[ ]  :  !qubit", "qop.h %q : !qubit"),
        (
            "qop.swap %a[0, 2],%b[1,2,1] : !qureg<4>,!qureg<4>",
            "qop.swap %a[0,2], %b[1,2,1] : !qureg<4>, !qureg<4>",
        ),
        ("qop.rz(1) %q : !qubit", "qop.rz(1.0) %q : !qubit"),
        (
            "qop.rz(%t) %q[%i] : f32, !qureg<> -> !qureg<>",
            "qop.rz(%t) %q[%i] : f32, !qureg<> -> !qureg<>",
        ),
        ("qop.t -> !op", "qop.t -> !op"),
        ("qop.adj %u : !op -> !op", "qop.adj %u : !op -> !op"),
        (
            "qop.cop %u, %c, %t[%k, 1] : !cop<1, op>, !qubit, !qureg<8>",
            "qop.cop %u, %c, %t[%k,1] : !cop<1, op>, !qubit, !qureg<8>",
        ),
        (
            "qop.circ @qft(3, %a[0,%n], %b, %c[%s, %z, 2]) {tag} : !qureg<>, !qubit, !qureg<16> -> !circ",
            "qop.circ @qft(3, %a[0,%n], %b, %c[%s,%z,2]) {tag} : !qureg<>, !qubit, !qureg<16> -> !circ",
        ),
        ("qop.circ @empty(0) -> !circ", "qop.circ @empty(0) -> !circ"),
        (
            "qop.x %q {b = true, a = [1, \"x\"], c = @sym} : !qubit",
            "qop.x %q {a = [1, \"x\"], b = true, c = @sym} : !qubit",
        ),
    ];
    for (source, expected) in cases {
        assert_eq!(roundtrip(source), expected, "{source}");
        // Canonical text is a fixed point.
        assert_eq!(roundtrip(expected), expected);
    }
}

#[test]
fn test_accessor_arity() {
    let types = TypeRegistry::new();
    for accessor in ["[2]", "[2,3]", "[2,3,1]", "[]", ""] {
        let source = format!("qop.x %r{accessor} : !qureg<>");
        assert!(parse_operation(&source, &types).is_ok(), "{source}");
    }

    let err = parse_operation("qop.x %r[2,3,1,0] : !qureg<>", &types).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::TooManyAccessors);

    let empty = parse_operation("qop.x %r[] : !qureg<>", &types).unwrap();
    let omitted = parse_operation("qop.x %r : !qureg<>", &types).unwrap();
    assert_eq!(empty, omitted);
}

#[test]
fn test_operand_type_count() {
    let types = TypeRegistry::new();
    let op = parse_operation("qop.x %a[%i] : !qureg<>", &types).unwrap();
    assert_eq!(op.operands[1], Value::new("i", types.index()));

    for (source, expected, actual) in [
        ("qop.x %a[%i]", 1, 0),
        ("qop.x %a[%i] : !qureg<>, index", 1, 2),
        ("qop.rz(%p) %a : !qubit", 2, 1),
        ("qop.cx %a, %b : !qubit", 2, 1),
    ] {
        let err = parse_operation(source, &types).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::OperandTypeCountMismatch { expected, actual },
            "{source}"
        );
        assert!(err.to_string().contains(&format!(
            "number of provided operand types ({actual}) doesn't match expected ({expected})"
        )));
    }
}

#[test]
fn test_type_constraints_through_parser() {
    let types = TypeRegistry::new();
    for source in ["qureg<1>", "qureg<0>", "qureg<-5>", "cop<0>"] {
        let err = parse_type(source, &types).unwrap_err();
        assert!(
            matches!(err.kind, ParseErrorKind::Ir(IrError::InvalidTypeParameter { .. })),
            "{source}"
        );
    }
    let err = parse_type("cop<2, qubit>", &types).unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::TypeSyntaxError { keyword, .. } if keyword == "cop"));

    assert_ne!(
        parse_type("qureg<2>", &types).unwrap(),
        parse_type("qureg<>", &types).unwrap()
    );
    assert_eq!(
        parse_type("cop<2, op>", &types).unwrap(),
        types.cop(2, Some(types.op())).unwrap()
    );
    assert_eq!(
        parse_type("!cop<2, circ>", &types).unwrap(),
        types.cop(2, Some(types.circ())).unwrap()
    );
}

#[test]
fn test_parametric_scalar_is_exclusive() {
    let types = TypeRegistry::new();
    let runtime = parse_operation("qop.ry(%a) %q : f64, !qubit", &types).unwrap();
    assert!(matches!(
        runtime.scalar_param().unwrap(),
        Some(ScalarParam::RuntimeOperand(v)) if v.name == "a"
    ));
    assert!(runtime.attributes.get("phi").is_none());

    let literal = parse_operation("qop.ry(-1.5e-3) %q : !qubit", &types).unwrap();
    assert!(matches!(
        literal.scalar_param().unwrap(),
        Some(ScalarParam::CompileTimeConstant(v)) if (v + 1.5e-3).abs() < 1e-15
    ));
    assert_eq!(literal.operands.len(), 1);
}

#[test]
fn test_families_cover_catalogue() {
    let types = TypeRegistry::new();
    let cases = [
        ("qop.sdg %q : !qubit", FamilyKind::FixedGate),
        ("qop.rx(0.1) %q : !qubit", FamilyKind::ParametricGate),
        ("qop.cop %u, %c : !op, !qubit", FamilyKind::ControlledWrapper),
        ("qop.adj %u : !op", FamilyKind::AdjointWrapper),
        ("qop.circ @f(1, %q) : !qubit -> !circ", FamilyKind::CircuitCall),
    ];
    for (source, kind) in cases {
        assert_eq!(parse_operation(source, &types).unwrap().family.kind, kind);
    }
}

#[test]
fn test_wrappers_reject_missing_operands() {
    let types = TypeRegistry::new();
    for (source, min) in [
        ("qop.cop -> !op", 2),
        ("qop.adj -> !op", 1),
        ("qop.cop %u : !op", 2),
    ] {
        let err = parse_operation(source, &types).unwrap_err();
        assert!(
            matches!(err.kind, ParseErrorKind::TooFewOperands { min: m, .. } if m == min),
            "{source}: {err}"
        );
    }
    // Bare fixed gates remain valid in their unapplied form.
    assert!(parse_operation("qop.h -> !op", &types).is_ok());
}

#[test]
fn test_overflowing_float_literals() {
    let types = TypeRegistry::new();
    for source in [
        "qop.rz(1e999) %q : !qubit",
        "qop.h %q {w = 1e999} : !qubit",
        "qop.rx(-2.5e400) %q : !qubit",
    ] {
        let err = parse_operation(source, &types).unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::LexerError(_)), "{source}: {err}");
    }
    assert_eq!(
        roundtrip("qop.rz(1e300) %q : !qubit"),
        "qop.rz(1e300) %q : !qubit"
    );
}

#[test]
fn test_unknown_keywords() {
    let types = TypeRegistry::new();
    let err = parse_operation("qop.ccx %a, %b, %c", &types).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnknownOperationKeyword("qop.ccx".into()));

    let err = parse_operation("qop.h %a : !qbit", &types).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnknownTypeKeyword("qbit".into()));
    assert_eq!((err.location.line, err.location.column), (1, 13));
}

#[test]
fn test_errors_carry_position() {
    let types = TypeRegistry::new();
    let source = "qop.h %a : !qubit\nqop.cx %a, %b[1,2,3,4] : !qubit, !qureg<>";
    let err = parse_operations(source, &types).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::TooManyAccessors);
    assert_eq!((err.location.line, err.location.column), (2, 21));
}

#[test]
fn test_custom_namespace() {
    let types = TypeRegistry::new();
    let config = AsmConfig::from_json(r#"{"namespace": "quantum", "accessor_style": "spaced"}"#)
        .unwrap();

    let mut parser = Parser::new("quantum.h %r[0,2] : !qureg<4>", &types, &config).unwrap();
    let op = parser.parse_operation().unwrap();
    assert_eq!(
        Printer::new(&config).print_operation(&op).unwrap(),
        "quantum.h %r[0, 2] : !qureg<4>"
    );
    assert_eq!(
        Printer::new(&AsmConfig::default().with_accessor_style(AccessorStyle::Compact))
            .print_operation(&op)
            .unwrap(),
        "qop.h %r[0,2] : !qureg<4>"
    );

    let mut parser = Parser::new("qop.h %r", &types, &config).unwrap();
    assert!(matches!(
        parser.parse_operation().unwrap_err().kind,
        ParseErrorKind::UnknownOperationKeyword(_)
    ));
}

#[test]
fn test_sequence_roundtrip() {
    let types = TypeRegistry::new();
    let source = "\
// prepare
qop.h %q0 : !qubit
qop.cx %q0, %q1[%i] : !qubit, !qureg<>
qop.circ @body(1, %q1) : !qureg<> -> !circ
";
    let ops = parse_operations(source, &types).unwrap();
    assert_eq!(ops.len(), 3);

    let config = AsmConfig::default();
    let printed = Printer::new(&config).print_operations(&ops).unwrap();
    assert_eq!(printed, source.trim_start_matches("// prepare\n"));
}

#[test]
fn test_parse_with_subscriber() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("qop_asm=trace,qop_ir=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();

    let types = TypeRegistry::new();
    let ops = parse_operations(
        "qop.cop %u, %c[%i], %t : !op, !qureg<>, !qubit -> !cop<1, op>",
        &types,
    )
    .unwrap();
    assert_eq!(ops[0].segment_sizes().unwrap(), &[1, 1, 1, 1, 0]);
}
