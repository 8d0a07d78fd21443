//! Abstract syntax tree for the supported SQL++ subset.
//!
//! These are the node shapes the upstream parser hands across the process
//! boundary (as JSON, hence the serde derives on every node). The parser
//! owns tokenization, grammar recovery and node construction; this crate
//! only reads the trees. Shapes that parse upstream but have no encoding
//! case yet (CASE, index access, list/record constructors, quantifiers,
//! LIMIT) are kept in the tree so the encoder can fail closed on them by
//! name instead of guessing.

pub mod operators;

pub use operators::{OperatorKind, UnaryKind};

use serde::{Deserialize, Serialize};

/// A top-level query as delivered by the upstream parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// The query body. Only select-expression bodies encode.
    pub body: Expr,
}

impl Query {
    /// Wrap a select expression as a complete query.
    pub fn select(select: SelectExpression) -> Self {
        Self {
            body: Expr::Select(Box::new(select)),
        }
    }
}

/// A variable reference. Upstream prefixes every variable name with `$`
/// to mark variable-ness; [`VarRef::decoded`] strips the marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarRef {
    /// The raw identifier, `$`-prefixed by upstream convention.
    pub name: String,
    /// Whether this reference introduces a fresh variable.
    #[serde(default)]
    pub is_new: bool,
    /// Whether this reference is a namespaced "named value" access.
    #[serde(default)]
    pub named_value_access: bool,
}

impl VarRef {
    /// A plain (not fresh, not named-value) reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_new: false,
            named_value_access: false,
        }
    }

    /// The identifier with the upstream `$` marker stripped.
    pub fn decoded(&self) -> &str {
        self.name.strip_prefix('$').unwrap_or(&self.name)
    }
}

/// Literal values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Integer(i64),
    Long(i64),
    Boolean(bool),
    String(String),
    Double(f64),
    Null,
    Missing,
}

/// An expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Literal(Literal),
    Variable(VarRef),
    /// Field access: `expr.field`.
    FieldAccess { expr: Box<Expr>, field: String },
    /// A function call, optionally namespaced.
    Call {
        #[serde(default)]
        namespace: Option<String>,
        name: String,
        args: Vec<Expr>,
    },
    /// A flat operator chain: `operands.len() == operators.len() + 1`.
    Operator {
        operands: Vec<Expr>,
        operators: Vec<OperatorKind>,
    },
    Unary { op: UnaryKind, expr: Box<Expr> },
    /// A (sub)query expression.
    Select(Box<SelectExpression>),
    /// CASE expression; parses upstream, no encoding case yet.
    Case {
        operand: Option<Box<Expr>>,
        when_then: Vec<(Expr, Expr)>,
        otherwise: Option<Box<Expr>>,
    },
    /// Index access `expr[index]`; no encoding case yet.
    IndexAccess { expr: Box<Expr>, index: Box<Expr> },
    /// `[...]` list constructor; no encoding case yet.
    ListConstructor(Vec<Expr>),
    /// `{...}` record constructor; no encoding case yet.
    RecordConstructor(Vec<(String, Expr)>),
    /// SOME/EVERY quantifier; no encoding case yet.
    Quantified {
        every: bool,
        bindings: Vec<(VarRef, Expr)>,
        satisfies: Box<Expr>,
    },
}

impl Expr {
    /// A string literal.
    pub fn string(value: impl Into<String>) -> Self {
        Expr::Literal(Literal::String(value.into()))
    }

    /// An integer literal.
    pub fn int(value: i64) -> Self {
        Expr::Literal(Literal::Integer(value))
    }

    /// A boolean literal.
    pub fn boolean(value: bool) -> Self {
        Expr::Literal(Literal::Boolean(value))
    }

    /// A variable reference (pass the raw, `$`-prefixed name).
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(VarRef::new(name))
    }

    /// A field access on an expression.
    pub fn field(expr: Expr, field: impl Into<String>) -> Self {
        Expr::FieldAccess {
            expr: Box::new(expr),
            field: field.into(),
        }
    }

    /// An un-namespaced function call.
    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            namespace: None,
            name: name.into(),
            args,
        }
    }

    /// A single binary operator application.
    pub fn binary(op: OperatorKind, left: Expr, right: Expr) -> Self {
        Expr::Operator {
            operands: vec![left, right],
            operators: vec![op],
        }
    }

    /// A flat n-ary operator chain.
    pub fn chain(operands: Vec<Expr>, operators: Vec<OperatorKind>) -> Self {
        Expr::Operator { operands, operators }
    }

    /// A unary operator application.
    pub fn unary(op: UnaryKind, expr: Expr) -> Self {
        Expr::Unary {
            op,
            expr: Box::new(expr),
        }
    }
}

/// A select expression: a set operation plus optional trailing clauses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectExpression {
    pub set_op: SelectSetOperation,
    #[serde(default)]
    pub order_by: Option<OrderByClause>,
    #[serde(default)]
    pub limit: Option<LimitClause>,
}

impl SelectExpression {
    pub fn new(set_op: SelectSetOperation) -> Self {
        Self {
            set_op,
            order_by: None,
            limit: None,
        }
    }

    /// Wrap a single select block with no set operation.
    pub fn block(block: SelectBlock) -> Self {
        Self::new(SelectSetOperation {
            left: SetOperationInput::Block(block),
            rights: vec![],
        })
    }

    pub fn with_order_by(mut self, order_by: OrderByClause) -> Self {
        self.order_by = Some(order_by);
        self
    }
}

/// A set operation over select inputs (UNION / INTERSECT).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectSetOperation {
    pub left: SetOperationInput,
    #[serde(default)]
    pub rights: Vec<SetOperationRight>,
}

/// Either side of a set operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SetOperationInput {
    Block(SelectBlock),
    Subquery(Box<SelectExpression>),
}

/// The right-hand part of a set operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetOperationRight {
    pub op: SetOpKind,
    /// True when set semantics (DISTINCT) were requested.
    #[serde(default)]
    pub set_semantics: bool,
    pub input: SetOperationInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetOpKind {
    Union,
    Intersect,
}

/// A single SELECT ... FROM ... block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectBlock {
    pub select: SelectClause,
    pub from: FromClause,
    #[serde(default)]
    pub where_clause: Option<Expr>,
    #[serde(default)]
    pub group_by: Option<GroupByClause>,
    #[serde(default)]
    pub having: Option<Expr>,
}

impl SelectBlock {
    pub fn new(select: SelectClause, from: FromClause) -> Self {
        Self {
            select,
            from,
            where_clause: None,
            group_by: None,
            having: None,
        }
    }

    pub fn with_where(mut self, predicate: Expr) -> Self {
        self.where_clause = Some(predicate);
        self
    }

    pub fn with_group_by(mut self, group_by: GroupByClause) -> Self {
        self.group_by = Some(group_by);
        self
    }

    pub fn with_having(mut self, predicate: Expr) -> Self {
        self.having = Some(predicate);
        self
    }
}

/// The SELECT clause proper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectClause {
    #[serde(default)]
    pub distinct: bool,
    pub projection: SelectProjection,
}

impl SelectClause {
    /// A regular (projection-list) select clause.
    pub fn regular(projections: Vec<Projection>) -> Self {
        Self {
            distinct: false,
            projection: SelectProjection::Regular(projections),
        }
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }
}

/// Regular projection list vs SELECT VALUE element form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectProjection {
    Regular(Vec<Projection>),
    /// SELECT VALUE; parses upstream, no encoding case yet.
    Element(Expr),
}

/// One projected column. Upstream materializes an explicit name for every
/// projection even when it is redundant; the encoder elides those.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub expr: Option<Expr>,
    #[serde(default)]
    pub star: bool,
}

impl Projection {
    /// A named projection of an expression.
    pub fn named(name: impl Into<String>, expr: Expr) -> Self {
        Self {
            name: Some(name.into()),
            expr: Some(expr),
            star: false,
        }
    }

    /// The `*` projection.
    pub fn star() -> Self {
        Self {
            name: None,
            expr: None,
            star: true,
        }
    }
}

/// The FROM clause: one or more juxtaposed terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FromClause {
    pub terms: Vec<FromTerm>,
}

impl FromClause {
    pub fn new(terms: Vec<FromTerm>) -> Self {
        Self { terms }
    }
}

/// One FROM term: a bound variable over an expression. Upstream always
/// materializes the binding name, even when it just restates the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FromTerm {
    pub var: VarRef,
    pub expr: Expr,
    /// True when UNNEST/NEST correlate clauses are attached. Unsupported.
    #[serde(default)]
    pub correlated: bool,
    /// AT positional variable, if any. Unsupported.
    #[serde(default)]
    pub positional_var: Option<VarRef>,
}

impl FromTerm {
    /// A plain term binding `var` (raw, `$`-prefixed) over an expression.
    pub fn new(var: impl Into<String>, expr: Expr) -> Self {
        Self {
            var: VarRef::new(var),
            expr,
            correlated: false,
            positional_var: None,
        }
    }
}

/// The GROUP BY clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupByClause {
    pub pairs: Vec<GroupByPair>,
    /// Decoration list present. Unsupported.
    #[serde(default)]
    pub decor_list: bool,
    /// Explicit GROUP AS variable. Unsupported.
    #[serde(default)]
    pub group_var: Option<VarRef>,
    /// Hash group-by hint. Unsupported.
    #[serde(default)]
    pub hash_hint: bool,
    /// WITH map present. Unsupported.
    #[serde(default)]
    pub with_map: bool,
}

impl GroupByClause {
    pub fn new(pairs: Vec<GroupByPair>) -> Self {
        Self {
            pairs,
            decor_list: false,
            group_var: None,
            hash_hint: false,
            with_map: false,
        }
    }
}

/// One grouping key with its upstream-materialized binding variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupByPair {
    pub var: VarRef,
    pub expr: Expr,
}

impl GroupByPair {
    pub fn new(var: impl Into<String>, expr: Expr) -> Self {
        Self {
            var: VarRef::new(var),
            expr,
        }
    }
}

/// The ORDER BY clause.
///
/// Upstream extras beyond a plain key list (window frames, tuple counts,
/// range maps) are unrepresentable here on purpose: the encoder has no
/// translation for them, so they are rejected at the boundary instead of
/// carried in the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderByClause {
    pub items: Vec<OrderItem>,
}

impl OrderByClause {
    pub fn new(items: Vec<OrderItem>) -> Self {
        Self { items }
    }
}

/// One ordering key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub expr: Expr,
    pub order: Order,
}

impl OrderItem {
    pub fn asc(expr: Expr) -> Self {
        Self {
            expr,
            order: Order::Asc,
        }
    }

    pub fn desc(expr: Expr) -> Self {
        Self {
            expr,
            order: Order::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    Asc,
    Desc,
}

/// The LIMIT clause. Parses upstream; no encoding case yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitClause {
    pub limit: Expr,
    #[serde(default)]
    pub offset: Option<Expr>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoded_strips_marker() {
        assert_eq!(VarRef::new("$customer").decoded(), "customer");
        assert_eq!(VarRef::new("customer").decoded(), "customer");
    }

    #[test]
    fn test_builders_produce_expected_shapes() {
        let e = Expr::binary(OperatorKind::Eq, Expr::var("$a"), Expr::int(3));
        match e {
            Expr::Operator { operands, operators } => {
                assert_eq!(operands.len(), 2);
                assert_eq!(operators, vec![OperatorKind::Eq]);
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn test_query_round_trips_through_json() {
        let query = Query::select(SelectExpression::block(SelectBlock::new(
            SelectClause::regular(vec![Projection::star()]),
            FromClause::new(vec![FromTerm::new("$c", Expr::var("$Customers"))]),
        )));
        let json = serde_json::to_string(&query).unwrap();
        let back: Query = serde_json::from_str(&json).unwrap();
        assert_eq!(back, query);
    }
}
