use std::fs;

use curvelang::{
    Environment, Error, SAMPLE_LIMIT,
    error::{ParseError, RuntimeError, SemanticError},
    interpreter::lexer::TokenKind,
    parse_program,
    render::{Curve, Recorder, RenderCall},
    run, tokenize,
    util::num::is_close,
};
use walkdir::WalkDir;

#[test]
fn demo_scripts_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "curve"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        let mut recorder = Recorder::new();
        if let Err(e) = run(&content, &mut recorder) {
            panic!("Demo {path:?} failed:\n{content}\nError: {e}");
        }
        assert!(recorder.calls.iter().any(|call| matches!(call, RenderCall::Draw(_))),
                "Demo {path:?} drew nothing");
    }

    assert!(count > 0, "No demo scripts found in demos");
}

fn assert_success(src: &str) -> (Environment, Recorder) {
    let mut recorder = Recorder::new();
    match run(src, &mut recorder) {
        Ok(env) => (env, recorder),
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn assert_failure(src: &str) -> Error {
    match run(src, Recorder::new()) {
        Ok(_) => panic!("Script succeeded but was expected to fail"),
        Err(e) => e,
    }
}

fn drawn(recorder: &Recorder) -> Vec<Curve> {
    recorder.curves().into_iter().cloned().collect()
}

#[test]
fn numeric_literals_tokenize_to_one_number() {
    for literal in ["0", "7", "42", "3.25", "0.5", ".5", "10.", "123456.789"] {
        let tokens = tokenize(literal);
        assert_eq!(tokens.len(), 2, "{literal}");
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].value, literal.parse::<f64>().ok());
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }
}

#[test]
fn second_decimal_point_starts_a_new_number() {
    let values: Vec<_> = tokenize("1.2.3").into_iter().filter_map(|t| t.value).collect();
    assert_eq!(values, [1.2, 0.3]);
}

#[test]
fn both_param_syntaxes_store_the_same_range() {
    for src in ["param x from -1 to 1 step 0.5", "param x [-1, 1, 0.5]"] {
        let (env, _) = assert_success(src);
        let range = env.param("x").unwrap();
        assert_eq!((range.start, range.end, range.step), (-1.0, 1.0, 0.5));
        assert_eq!(env.variables["x"], -1.0);
    }
}

#[test]
fn parabola_points_in_order() {
    let (_, recorder) = assert_success("param x from -2 to 2 step 1\ndraw x ** 2");
    assert_eq!(drawn(&recorder)[0].points,
               [(-2.0, 4.0), (-1.0, 1.0), (0.0, 0.0), (1.0, 1.0), (2.0, 4.0)]);
}

#[test]
fn power_is_left_associative() {
    let (env, _) = assert_success("y = 2 ** 3 ** 2");
    assert_eq!(env.variables["y"], 64.0);
}

#[test]
fn division_by_zero_sample_is_omitted() {
    let (_, recorder) = assert_success("param x from -2 to 2 step 1\ndraw 1 / x");
    assert_eq!(drawn(&recorder)[0].points,
               [(-2.0, -0.5), (-1.0, -1.0), (1.0, 1.0), (2.0, 0.5)]);
}

#[test]
fn parametric_circle_with_color() {
    let (_, recorder) =
        assert_success("param t from 0 to 6.283 step 0.1\ndraw cos(t), sin(t) with color red");
    let curves = drawn(&recorder);
    assert_eq!(curves.len(), 1);
    assert_eq!(curves[0].color.as_deref(), Some("red"));
    assert!(!curves[0].points.is_empty());
    for (x, y) in &curves[0].points {
        assert!(is_close(x * x + y * y, 1.0, 1e-9, 0.0));
    }
}

#[test]
fn formulas_follow_the_swept_parameter() {
    let (_, recorder) = assert_success("def f = x + 1\nparam x [0, 3, 1]\ndraw f");
    assert_eq!(drawn(&recorder)[0].points,
               [(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 4.0)]);
}

#[test]
fn formulas_follow_assignments() {
    let (_, recorder) = assert_success("param t [0, 1, 1]\nk = 1\ndef f = k * t\ndraw f\nclear\nk = 5\ndraw f");
    assert_eq!(drawn(&recorder)[0].points, [(0.0, 0.0), (1.0, 5.0)]);
}

#[test]
fn non_positive_step_aborts_the_run() {
    for src in ["param x from 0 to 1 step 0", "param x [0, 1, -0.5]\ndraw x"] {
        let error = assert_failure(src);
        assert!(matches!(error, Error::Semantic(SemanticError::NonPositiveStep { .. })));
    }
}

#[test]
fn reversed_range_aborts_the_run() {
    let error = assert_failure("param x from 1 to 0 step 0.5");
    assert!(matches!(error, Error::Semantic(SemanticError::InvalidRange { .. })));
}

#[test]
fn clear_keeps_constants_and_formulas() {
    let (env, recorder) =
        assert_success("let k = 2\ndef f = k * x\nparam x [1, 2, 1]\ndraw f\nclear\ndraw f + k");
    assert_eq!(env.lookup("k"), Some(2.0));
    let curves = drawn(&recorder);
    assert_eq!(curves.len(), 1);
    assert_eq!(curves[0].points, [(1.0, 4.0), (2.0, 6.0)]);
    assert!(recorder.calls.contains(&RenderCall::Clear));
}

#[test]
fn draw_needs_a_parameter() {
    let error = assert_failure("draw sin(1)");
    assert!(matches!(error, Error::Semantic(SemanticError::NoParameter { .. })));
}

#[test]
fn every_parameter_is_swept() {
    let (_, recorder) = assert_success("param a [0, 1, 1]\nparam b [0, 2, 1]\ndraw a * 10 + b");
    let curves = drawn(&recorder);
    assert_eq!(curves.len(), 2);
    assert_eq!(curves[0].points.len(), 2);
    assert_eq!(curves[1].points.len(), 3);
}

#[test]
fn assignment_errors_abort_the_run() {
    assert!(matches!(assert_failure("x = 1 / 0"),
                     Error::Runtime(RuntimeError::DivisionByZero { .. })));
    assert!(matches!(assert_failure("x = y"),
                     Error::Runtime(RuntimeError::UnknownVariable { .. })));
    assert!(matches!(assert_failure("let k = sqrt(-4)"),
                     Error::Runtime(RuntimeError::Math { .. })));
}

#[test]
fn sample_errors_do_not_abort_the_run() {
    let (_, recorder) = assert_success("param x [-1, 1, 1]\ndraw sqrt(x)\ndraw undefined_name");
    let curves = drawn(&recorder);
    assert_eq!(curves[0].points, [(0.0, 0.0), (1.0, 1.0)]);
    assert!(curves[1].points.is_empty());
}

#[test]
fn runaway_ranges_are_capped() {
    let (_, recorder) = assert_success("param x [0, 1000000, 0.5]\ndraw x");
    assert_eq!(drawn(&recorder)[0].points.len(), SAMPLE_LIMIT);
}

#[test]
fn malformed_assignment_is_dropped() {
    let (env, _) = assert_success("y 3\nz = 4");
    assert!(!env.variables.contains_key("y"));
    assert_eq!(env.variables["z"], 4.0);
}

#[test]
fn parse_errors_abort_before_execution() {
    let mut recorder = Recorder::new();
    let result = run("param x [0, 1, 1]\ndraw x\ndraw (x + 1", &mut recorder);
    assert!(matches!(result, Err(Error::Parse(ParseError::ExpectedClosingParen { .. }))));
    assert!(recorder.calls.is_empty());
}

#[test]
fn unrecognized_character_is_a_parse_error() {
    let error = assert_failure("param x [0, 1, 1]\ndraw x # 2");
    let Error::Parse(ParseError::UnrecognizedToken { token, position }) = &error else {
        panic!("unexpected error {error:?}");
    };
    assert_eq!(token, "#");
    assert_eq!((position.line, position.column), (2, 8));
    assert!(error.to_string().starts_with("Error on line 2, column 8:"));
}

#[test]
fn keywords_ignore_case() {
    let (_, recorder) = assert_success("PARAM X FROM 0 TO 1 STEP 1\nDraw SIN(x) With Color Red\nShow");
    assert_eq!(drawn(&recorder)[0].color.as_deref(), Some("red"));
    assert_eq!(recorder.calls.last(), Some(&RenderCall::Show(1)));
}

#[test]
fn recursive_formulas_are_runtime_errors() {
    let error = assert_failure("def f = g\ndef g = f\ny = f");
    assert!(matches!(error, Error::Runtime(RuntimeError::RecursiveFormula { .. })));
}

#[test]
fn variadic_builtins_need_more_than_one_argument() {
    assert!(matches!(assert_failure("y = max(3)"),
                     Error::Runtime(RuntimeError::ArgumentCount { .. })));
}

#[test]
fn statements_parse_in_order() {
    let statements = parse_program("let k = 1; def f = k; param t [0, 1, 1]; draw f; show; clear").unwrap();
    assert_eq!(statements.len(), 6);
}

#[test]
fn comments_are_ignored() {
    let (env, _) = assert_success("// leading comment\nx = 2 // trailing comment\n// y = 3");
    assert_eq!(env.variables["x"], 2.0);
    assert!(!env.variables.contains_key("y"));
}

#[test]
fn deeply_nested_expressions_are_parse_errors() {
    let parens = format!("y = {}1{}", "(".repeat(5000), ")".repeat(5000));
    let minus = format!("y = {}1", "-".repeat(100_000));
    let sum = format!("y = {}", vec!["x"; 100_000].join(" + "));
    for src in [parens, minus, sum] {
        let error = assert_failure(&src);
        assert!(matches!(error, Error::Parse(ParseError::NestingTooDeep { .. })),
                "unexpected error {error:?}");
        assert!(error.to_string().contains("nested too deeply"));
    }
}

#[test]
fn long_formula_chains_fail_per_sample() {
    let mut src = String::from("param x [0, 1, 1]\ndef f0 = x\n");
    for i in 1..1000 {
        src.push_str(&format!("def f{i} = f{} + 1\n", i - 1));
    }

    let (_, recorder) = assert_success(&format!("{src}draw f100\ndraw f999"));
    let curves = drawn(&recorder);
    assert_eq!(curves[0].points, [(0.0, 100.0), (1.0, 101.0)]);
    assert!(curves[1].points.is_empty());

    assert!(matches!(assert_failure(&format!("{src}y = f999")),
                     Error::Runtime(RuntimeError::NestingTooDeep { .. })));
}
