//! # Coerce Module
//!
//! Converts raw path segments into typed values.
//!
//! ## Overview
//!
//! A route template names the type of each placeholder (`/add/{Integer}/{Integer}`).
//! The name is resolved against a [`CoercerRegistry`] once, at registration time,
//! and the resolved [`Coercer`] is stored inside the template. At request time the
//! coercer turns the raw segment into a [`Value`] or fails with a [`CoercionError`].
//!
//! ## Built-in Types
//!
//! | Name        | Rust type | Accepts                                   |
//! |-------------|-----------|-------------------------------------------|
//! | `String`    | `String`  | anything                                  |
//! | `Integer`   | `i32`     | base-10 signed integer                    |
//! | `Long`      | `i64`     | base-10 signed integer                    |
//! | `Short`     | `i16`     | base-10 signed integer                    |
//! | `Byte`      | `i8`      | base-10 signed integer                    |
//! | `Double`    | `f64`     | decimal or exponential notation           |
//! | `Float`     | `f32`     | decimal or exponential notation           |
//! | `Boolean`   | `bool`    | `true` / `false`, ASCII case-insensitive  |
//! | `Character` | `char`    | exactly one character                     |
//!
//! ## Extending
//!
//! ```rust
//! use fitroute::coerce::{CoercerRegistry, CoercionError, Value};
//!
//! let mut registry = CoercerRegistry::default();
//! registry.register("Hex", |raw| {
//!     u32::from_str_radix(raw, 16)
//!         .map(|v| Value::Long(i64::from(v)))
//!         .map_err(|e| CoercionError::invalid("Hex", raw, e))
//! });
//! assert_eq!(registry.coerce("Hex", "ff").unwrap(), Value::Long(255));
//! ```
//!
//! Matching and dispatch never look at type names again after registration, so
//! adding a type only touches the registry.

mod core;
#[cfg(test)]
mod tests;

pub use core::{
    Args, Coercer, CoercerRegistry, CoercionError, FromParam, FromParams, Value,
    MAX_INLINE_PARAMS,
};
