//! Blockfall (workspace facade crate).
//!
//! The engine lives in dedicated crates under `crates/`; this package
//! re-exports them as `blockfall::{core,types}` and hosts the headless driver.

pub use blockfall_core as core;
pub use blockfall_types as types;
