//! End-to-end tests for the demo arithmetic routes
//!
//! # Test Coverage
//!
//! - Integer routes win for integer operands
//! - Decimal operands fall through to the `Double` routes
//! - Undefined integer results answer `400`
//! - Anything else lands on the `*` catch-all (`418`)
//! - Method and near-miss failures answer `404` / `501`

use fitroute::math::{self, NOT_AN_OPERATION};
use fitroute::{Dispatcher, Request, Response, RouteTableBuilder};

fn dispatcher() -> Dispatcher {
    Dispatcher::new(math::routes())
}

fn get(dispatcher: &Dispatcher, target: &str) -> Response {
    dispatcher.dispatch(&Request::parse("GET", target).unwrap())
}

#[test]
fn test_integer_operations() {
    let d = dispatcher();
    let cases = [
        ("/add/3/4", "3 + 4 = 7"),
        ("/subtract/3/4", "3 - 4 = -1"),
        ("/multiply/6/7", "6 * 7 = 42"),
        ("/divide/7/2", "7 / 2 = 3"),
    ];
    for (target, body) in cases {
        let response = get(&d, target);
        assert_eq!(response.status(), 200, "{target}");
        assert_eq!(response.body(), body);
    }
}

#[test]
fn test_decimal_operands_use_double_routes() {
    let d = dispatcher();
    assert_eq!(get(&d, "/add/3.5/4").body(), "3.5 + 4.0 = 7.5");
    assert_eq!(get(&d, "/divide/1/0.5").body(), "1.0 / 0.5 = 2.0");
    assert_eq!(get(&d, "/multiply/1e2/3").body(), "100.0 * 3.0 = 300.0");
}

#[test]
fn test_integer_overflow_uses_double_routes() {
    let d = dispatcher();
    let response = get(&d, "/add/3000000000/1");
    assert_eq!(response.status(), 200);
    assert_eq!(response.body(), "3000000000.0 + 1.0 = 3000000001.0");
}

#[test]
fn test_registration_order_decides_overlap() {
    let mut builder = RouteTableBuilder::new();
    builder
        .get("/add/{Double}/{Double}", |res: &mut Response, (a, b): (f64, f64)| {
            res.message(200, format!("{a:.1} + {b:.1} = {:.1}", a + b))
        })
        .unwrap()
        .get("/add/{Integer}/{Integer}", |res: &mut Response, (a, b): (i32, i32)| {
            res.message(200, format!("{a} + {b} = {}", a + b))
        })
        .unwrap();
    let d = Dispatcher::from_table(builder.build());
    assert_eq!(get(&d, "/add/3/4").body(), "3.0 + 4.0 = 7.0");
}

#[test]
fn test_undefined_integer_results() {
    let d = dispatcher();
    let response = get(&d, "/divide/1/0");
    assert_eq!(response.status(), 400);
    assert_eq!(response.body(), "1 / 0 is undefined");

    let response = get(&d, "/multiply/2147483647/2");
    assert_eq!(response.status(), 400);
}

#[test]
fn test_double_division_by_zero_is_infinite() {
    let d = dispatcher();
    assert_eq!(get(&d, "/divide/1.0/0").body(), "1.0 / 0.0 = Infinity");
}

#[test]
fn test_catch_all() {
    let d = dispatcher();
    for target in ["/", "/foo", "/add/1", "/add/1/2/3", "/power/2/3"] {
        let response = get(&d, target);
        assert_eq!(response.status(), NOT_AN_OPERATION.0, "{target}");
        assert_eq!(response.body(), NOT_AN_OPERATION.1);
    }
}

#[test]
fn test_near_miss_outranks_catch_all() {
    let d = dispatcher();
    let response = get(&d, "/add/abc/4");
    assert_eq!(response.status(), 501);
    assert_eq!(response.body(), "No route matches GET /add/abc/4.");
}

#[test]
fn test_other_methods_have_no_routes() {
    let d = dispatcher();
    let response = d.dispatch(&Request::parse("post", "/add/3/4").unwrap());
    assert_eq!(response.status(), 404);
    assert_eq!(response.body(), "No POST routes exist.");
}
