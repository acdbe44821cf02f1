//! Route selection tests against the public API
//!
//! Covers registration-order semantics: first perfect match wins, best fit
//! keeps the earliest of equal scores, and the catch-all only wins when
//! nothing structural scores higher.

use fitroute::router::{Resolution, RouteDeclarationError, RouteTable, RouteTableBuilder};
use fitroute::Response;
use http::Method;

fn noop(res: &mut Response, (): ()) {
    res.message(200, "")
}

fn table(routes: &[&str]) -> RouteTable {
    let mut builder = RouteTableBuilder::new();
    for template in routes {
        match template.matches('{').count() {
            0 => builder.get(template, noop),
            1 => builder.get(template, |_: &mut Response, (_,): (String,)| {}),
            _ => builder.get(template, |_: &mut Response, (_, _): (f64, f64)| {}),
        }
        .unwrap();
    }
    builder.build()
}

fn selected(table: &RouteTable, path: &[&str]) -> Option<String> {
    table
        .resolve(&Method::GET, path)
        .entry()
        .map(|entry| entry.template().to_string())
}

#[test]
fn test_literal_route_and_root() {
    let t = table(&["/", "/zoo/animals"]);
    assert_eq!(selected(&t, &[]), Some("/".to_string()));
    assert_eq!(
        selected(&t, &["zoo", "animals"]),
        Some("/zoo/animals".to_string())
    );
}

#[test]
fn test_first_perfect_match_wins() {
    let t = table(&["/name/{String}", "/name/bob"]);
    let resolution = t.resolve(&Method::GET, &["name", "bob"]);
    assert!(matches!(resolution, Resolution::Perfect(_)));
    assert_eq!(
        selected(&t, &["name", "bob"]),
        Some("/name/{String}".to_string())
    );
}

#[test]
fn test_best_fit_prefers_structural_match() {
    let t = table(&["*", "/calc/{Double}/{Double}"]);
    match t.resolve(&Method::GET, &["calc", "x", "2"]) {
        Resolution::BestFit { entry, score } => {
            assert_eq!(entry.template().as_str(), "/calc/{Double}/{Double}");
            assert_eq!(score, 6);
        }
        other => panic!("unexpected resolution {other:?}"),
    }
}

#[test]
fn test_catch_all_only_table() {
    let t = table(&["*"]);
    assert_eq!(selected(&t, &["*"]), Some("*".to_string()));
    assert_eq!(selected(&t, &[]), Some("*".to_string()));
    assert!(matches!(
        t.resolve(&Method::GET, &["x"]),
        Resolution::BestFit { score: 1, .. }
    ));
}

#[test]
fn test_nothing_scores() {
    let t = table(&["/a/b"]);
    assert!(matches!(
        t.resolve(&Method::GET, &["a", "c"]),
        Resolution::NoMatch
    ));
    assert!(matches!(
        t.resolve(&Method::PUT, &["a", "b"]),
        Resolution::NoRoutesForMethod
    ));
}

#[test]
fn test_declaration_errors_are_typed() {
    let mut builder = RouteTableBuilder::new();
    assert!(matches!(
        builder.get("/x/{Widget}", noop),
        Err(RouteDeclarationError::UnknownType { .. })
    ));
    assert!(matches!(
        builder.get("/x/{}", noop),
        Err(RouteDeclarationError::EmptyPlaceholder { .. })
    ));
    assert!(matches!(
        builder.route("BAD METHOD", "/x", noop),
        Err(RouteDeclarationError::InvalidMethod { .. })
    ));
    assert!(builder.build().is_empty());
}
