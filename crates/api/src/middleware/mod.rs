//! Request extractors.
//!
//! - [`operator::Operator`] -- Identifies the operator issuing a mutation.

pub mod operator;
