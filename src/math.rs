//! Demo arithmetic handlers.
//!
//! Registers `add`, `subtract`, `multiply` and `divide` over `Integer` and
//! `Double` operands, plus a `*` catch-all answering `418`. Integer routes are
//! registered first, so `/add/3/4` is integer arithmetic and `/add/3.5/4`
//! falls through to the floating-point routes.

use crate::coerce::Value;
use crate::router::{RouteDeclarationError, RouteTable, RouteTableBuilder};
use crate::server::Response;

/// Status and body for paths that are not an operation.
pub const NOT_AN_OPERATION: (u16, &str) = (418, "Not an operation");

type IntOp = fn(i32, i32) -> Option<i32>;
type DoubleOp = fn(f64, f64) -> f64;

const OPERATIONS: [(&str, &str, IntOp, DoubleOp); 4] = [
    ("add", "+", i32::checked_add, |a, b| a + b),
    ("subtract", "-", i32::checked_sub, |a, b| a - b),
    ("multiply", "*", i32::checked_mul, |a, b| a * b),
    ("divide", "/", i32::checked_div, |a, b| a / b),
];

/// Register the arithmetic routes on `builder`.
pub fn register(builder: &mut RouteTableBuilder) -> Result<(), RouteDeclarationError> {
    builder.get("*", |res: &mut Response, (): ()| {
        res.message(NOT_AN_OPERATION.0, NOT_AN_OPERATION.1)
    })?;

    for (name, symbol, op, _) in OPERATIONS {
        builder.get(
            &format!("/{name}/{{Integer}}/{{Integer}}"),
            move |res: &mut Response, (one, two): (i32, i32)| match op(one, two) {
                Some(result) => res.message(200, format!("{one} {symbol} {two} = {result}")),
                None => res.message(400, format!("{one} {symbol} {two} is undefined")),
            },
        )?;
    }

    for (name, symbol, _, op) in OPERATIONS {
        builder.get(
            &format!("/{name}/{{Double}}/{{Double}}"),
            move |res: &mut Response, (one, two): (f64, f64)| {
                res.message(
                    200,
                    format!(
                        "{} {symbol} {} = {}",
                        Value::Double(one),
                        Value::Double(two),
                        Value::Double(op(one, two))
                    ),
                )
            },
        )?;
    }

    Ok(())
}

/// The demo route table.
pub fn routes() -> Result<RouteTable, RouteDeclarationError> {
    let mut builder = RouteTable::builder();
    register(&mut builder)?;
    Ok(builder.build())
}
