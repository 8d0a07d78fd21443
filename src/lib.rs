//! # campenc — SQL++ to CAMP S-expression encoding
//!
//! Translates parsed SQL++ query ASTs into the canonical, parenthesized
//! textual encoding consumed by the downstream CAMP rule compiler, and
//! models the CAMP pattern/rule calculus that encoding denotes.
//!
//! ## Quick example
//!
//! ```rust
//! use campenc::prelude::*;
//!
//! // SELECT * FROM Customers AS c
//! let query = Query::select(SelectExpression::block(SelectBlock::new(
//!     SelectClause::regular(vec![Projection::star()]),
//!     FromClause::new(vec![FromTerm::new("$c", Expr::var("$Customers"))]),
//! )));
//!
//! let encoding = campenc::encode(&query).unwrap();
//! assert_eq!(
//!     encoding,
//!     "(query (select (all ) ) (from (aliasAs \"c\" (table \"Customers\" ) ) ) ) "
//! );
//! ```
//!
//! The upstream dialect parser is an external collaborator: it owns
//! tokenization and node construction and hands trees across the process
//! boundary as JSON (see [`service::invoke`]). This crate intentionally
//! supports a documented subset of the dialect and fails closed on the
//! rest rather than guessing.

pub mod ast;
pub mod camp;
pub mod encoder;
pub mod error;
pub mod service;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::camp::{CompoundRule, Pattern, PatternKind, Rule, RuleKind};
    pub use crate::encoder::Encoder;
    pub use crate::error::*;
    pub use crate::service::{EncodeRequest, invoke};
}

/// Encode a query with default options (date-name heuristic off).
pub fn encode(query: &ast::Query) -> Result<String, error::EncodeError> {
    encoder::Encoder::new().encode(query)
}
