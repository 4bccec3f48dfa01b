//! Firebird protocol constants.
//!
//! - [`sql_type`], column wire type codes
//! - [`tpb`], transaction parameter buffer tags
pub mod sql_type;
pub mod tpb;

pub use sql_type::SqlType;
