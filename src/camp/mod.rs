//! The CAMP target calculus: the pattern and rule node families whose
//! grammar the encoder's output denotes.
//!
//! Both families are closed tagged sums with fixed per-kind arity. Nodes
//! are immutable once built and own their operands exclusively, so trees
//! are acyclic by construction. Serializing a node back to the canonical
//! encoding is a declared capability of every node but is still an
//! extension point: `emit` writes nothing useful yet.

pub mod pattern;
pub mod rule;

pub use pattern::{BinaryOperator, Constant, Pattern, PatternKind, UnaryOperator};
pub use rule::{CompoundRule, Rule, RuleKind};
