//! Query filters and the fluent filter builder.
//!
//! Filters are predicates over [Document](crate::document::Document)s, built through
//! the fluent [field] entry point and combined with [Filter::and], [Filter::or], and
//! [not]. Repositories evaluate filters against collection scans; equality lookups on
//! declared unique fields go through secondary indexes instead.

mod basic_filters;
mod filter;
mod fluent;
mod logical_filters;

pub use basic_filters::*;
pub use filter::*;
pub use fluent::*;
pub use logical_filters::*;
