//! Canonical S-expression encoder for SQL++ query ASTs.
//!
//! Converts a parsed query tree into the parenthesized textual encoding
//! consumed by the downstream rule compiler. The traversal is a single
//! exhaustive match over the closed node set: every supported kind appends
//! its text and recurses into children in a fixed order, and every shape
//! without a translation case fails closed with an error naming it.
//!
//! Output is append-only with one documented exception: the closing
//! terminator of a set-operation encoding is stripped before ORDER BY and
//! LIMIT are spliced in, so those clauses land inside the enclosing node.
//!
//! Quoted strings are emitted with no escaping of embedded quotes or
//! backslashes; that is the wire format the downstream parser expects.

pub mod dates;
pub mod tables;

use crate::ast::*;
use crate::error::{EncodeError, EncodeResult};

/// Recursion ceiling. Query nesting is expected to be shallow; this turns
/// a pathological input into an error instead of a stack overflow.
const MAX_DEPTH: usize = 512;

/// The encoding traversal.
///
/// Holds only configuration; each call to [`Encoder::encode`] owns its own
/// output buffer, so independent translations may run concurrently with no
/// coordination.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    use_date_name_heuristic: bool,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable name-based date inference (`...date` suffixes).
    pub fn with_date_name_heuristic(mut self, enabled: bool) -> Self {
        self.use_date_name_heuristic = enabled;
        self
    }

    /// Encode a top-level query. Only select-expression bodies are
    /// supported.
    pub fn encode(&self, query: &Query) -> EncodeResult<String> {
        let mut out = String::new();
        match &query.body {
            Expr::Select(select) => self.select_expression(select, &mut out, 0)?,
            _ => {
                return Err(EncodeError::malformed(
                    "Can't handle query whose body isn't a select expression",
                ));
            }
        }
        Ok(out)
    }

    fn deeper(&self, depth: usize) -> EncodeResult<usize> {
        if depth >= MAX_DEPTH {
            return Err(EncodeError::malformed("query nesting too deep"));
        }
        Ok(depth + 1)
    }

    fn expr(&self, expr: &Expr, out: &mut String, depth: usize) -> EncodeResult<()> {
        let depth = self.deeper(depth)?;
        match expr {
            Expr::Literal(lit) => literal(lit, out),
            Expr::Variable(var) => {
                append_string_node("ref", var.decoded(), out);
                Ok(())
            }
            Expr::FieldAccess { expr, field } => {
                node_with_string("deref", field, out);
                self.expr(expr, out, depth)?;
                out.push_str(") ");
                Ok(())
            }
            Expr::Call {
                namespace,
                name,
                args,
            } => self.call(namespace.as_deref(), name, args, out, depth),
            Expr::Operator {
                operands,
                operators,
            } => self.operator_chain(operands, operators, out, depth),
            Expr::Unary { op, expr } => {
                let verb = tables::unary_verb_for(*op)
                    .ok_or_else(|| EncodeError::operator(op.token()))?;
                out.push('(');
                out.push_str(verb);
                out.push(' ');
                self.expr(expr, out, depth)?;
                out.push_str(") ");
                Ok(())
            }
            Expr::Select(select) => self.select_expression(select, out, depth),
            Expr::Case { .. } => Err(EncodeError::UnsupportedConstruct("case expression")),
            Expr::IndexAccess { .. } => Err(EncodeError::UnsupportedConstruct("index accessor")),
            Expr::ListConstructor(_) => {
                Err(EncodeError::UnsupportedConstruct("list constructor"))
            }
            Expr::RecordConstructor(_) => {
                Err(EncodeError::UnsupportedConstruct("record constructor"))
            }
            Expr::Quantified { .. } => {
                Err(EncodeError::UnsupportedConstruct("quantified expression"))
            }
        }
    }

    fn call(
        &self,
        namespace: Option<&str>,
        name: &str,
        args: &[Expr],
        out: &mut String,
        depth: usize,
    ) -> EncodeResult<()> {
        let full_name = match namespace {
            Some(ns) if !ns.is_empty() => format!("{ns}.{name}"),
            _ => name.to_string(),
        };
        // Upstream parses count(*) as count(1); treat that argument list
        // as empty so both spellings encode identically.
        let mut args = args;
        if full_name == "count"
            && args.len() == 1
            && matches!(&args[0], Expr::Literal(Literal::Integer(1) | Literal::Long(1)))
        {
            args = &[];
        }
        // Upstream treats "not" as a function; it gets its own node.
        if full_name == "not" && args.len() == 1 {
            out.push_str("(not ");
            self.expr(&args[0], out, depth)?;
            out.push_str(") ");
            return Ok(());
        }
        out.push_str("(function ");
        append_string(&full_name, out);
        for arg in args {
            self.expr(arg, out, depth)?;
        }
        out.push_str(") ");
        Ok(())
    }

    /// Fold a flat operator chain into left-associative binary nests:
    /// operands `e0..e3` with operators `o0..o2` encode as
    /// `((e0 o0 e1) o1 e2) o2 e3`.
    fn operator_chain(
        &self,
        operands: &[Expr],
        operators: &[OperatorKind],
        out: &mut String,
        depth: usize,
    ) -> EncodeResult<()> {
        if operators.is_empty() || operands.len() != operators.len() + 1 {
            return Err(EncodeError::malformed(
                "Not yet handling operator expressions that aren't binary",
            ));
        }
        if operators.len() == 1 {
            return self.binary(operators[0], &operands[0], &operands[1], out, depth);
        }
        let last_op = operators[operators.len() - 1];
        let prefix = Expr::Operator {
            operands: operands[..operands.len() - 1].to_vec(),
            operators: operators[..operators.len() - 1].to_vec(),
        };
        self.binary(last_op, &prefix, &operands[operands.len() - 1], out, depth)
    }

    /// Encode one binary operation, first consulting the date rewrite.
    fn binary(
        &self,
        op: OperatorKind,
        left: &Expr,
        right: &Expr,
        out: &mut String,
        depth: usize,
    ) -> EncodeResult<()> {
        if let Some(rewritten) =
            dates::maybe_transform(op, left, right, self.use_date_name_heuristic)?
        {
            return self.expr(&rewritten, out, depth);
        }
        let verb = tables::verb_for(op).ok_or_else(|| EncodeError::operator(op.token()))?;
        out.push('(');
        out.push_str(verb);
        out.push(' ');
        self.expr(left, out, depth)?;
        self.expr(right, out, depth)?;
        out.push_str(") ");
        Ok(())
    }

    fn select_expression(
        &self,
        select: &SelectExpression,
        out: &mut String,
        depth: usize,
    ) -> EncodeResult<()> {
        let depth = self.deeper(depth)?;
        self.set_operation(&select.set_op, out, depth)?;
        // The set operation closed its own node; strip that terminator so
        // ORDER BY and LIMIT land inside it. Only trailing whitespace is
        // assumed to follow, without re-validation.
        let last_paren = out
            .rfind(')')
            .ok_or_else(|| EncodeError::malformed("select expression produced no encoding"))?;
        out.truncate(last_paren);
        if let Some(order_by) = &select.order_by {
            self.order_by(order_by, out, depth)?;
        }
        if select.limit.is_some() {
            return Err(EncodeError::UnsupportedConstruct("limit clause"));
        }
        out.push_str(") ");
        Ok(())
    }

    fn set_operation(
        &self,
        node: &SelectSetOperation,
        out: &mut String,
        depth: usize,
    ) -> EncodeResult<()> {
        if node.rights.is_empty() {
            return self.set_input(&node.left, out, depth);
        }
        if node.rights.len() > 1 {
            return Err(EncodeError::malformed(
                "No support for multiple right inputs in a set operation",
            ));
        }
        let right = &node.rights[0];
        let tag = match right.op {
            SetOpKind::Union => "union",
            SetOpKind::Intersect => "intersect",
        };
        out.push_str("(query (");
        out.push_str(tag);
        out.push_str(if right.set_semantics {
            " (distinct) "
        } else {
            " "
        });
        self.set_input(&node.left, out, depth)?;
        self.set_input(&right.input, out, depth)?;
        out.push_str(") ) ");
        Ok(())
    }

    fn set_input(
        &self,
        input: &SetOperationInput,
        out: &mut String,
        depth: usize,
    ) -> EncodeResult<()> {
        match input {
            SetOperationInput::Block(block) => self.select_block(block, out, depth),
            SetOperationInput::Subquery(select) => self.select_expression(select, out, depth),
        }
    }

    fn select_block(
        &self,
        block: &SelectBlock,
        out: &mut String,
        depth: usize,
    ) -> EncodeResult<()> {
        out.push_str("(query (select ");
        self.select_clause(&block.select, out, depth)?;
        out.push_str(") ");
        self.from_clause(&block.from, out, depth)?;
        if let Some(predicate) = &block.where_clause {
            out.push_str("(where ");
            self.expr(predicate, out, depth)?;
            out.push_str(") ");
        }
        if let Some(group_by) = &block.group_by {
            self.group_by(group_by, out, depth)?;
        }
        if let Some(predicate) = &block.having {
            out.push_str("(having ");
            self.expr(predicate, out, depth)?;
            out.push_str(") ");
        }
        out.push_str(") ");
        Ok(())
    }

    fn select_clause(
        &self,
        clause: &SelectClause,
        out: &mut String,
        depth: usize,
    ) -> EncodeResult<()> {
        if clause.distinct {
            out.push_str("(distinct) ");
        }
        match &clause.projection {
            SelectProjection::Regular(projections) => {
                for projection in projections {
                    self.projection(projection, out, depth)?;
                }
                Ok(())
            }
            SelectProjection::Element(_) => {
                Err(EncodeError::UnsupportedConstruct("select element"))
            }
        }
    }

    fn projection(
        &self,
        projection: &Projection,
        out: &mut String,
        depth: usize,
    ) -> EncodeResult<()> {
        let mut name = projection.name.as_deref();
        if let (Some(n), Some(expr)) = (name, &projection.expr) {
            // Upstream names every projected column; elide the annotation
            // when it just restates the projected reference.
            if !is_distinct_name(n, expr) {
                name = None;
            }
        }
        if let Some(n) = name {
            append_string_node("as", n, out);
        }
        if let Some(expr) = &projection.expr {
            return self.expr(expr, out, depth);
        }
        if projection.star {
            out.push_str("(all ) ");
            return Ok(());
        }
        Err(EncodeError::malformed(
            "Cannot deal with a projection without an expression or a star",
        ))
    }

    fn from_clause(
        &self,
        clause: &FromClause,
        out: &mut String,
        depth: usize,
    ) -> EncodeResult<()> {
        out.push_str("(from ");
        // Multiple terms desugar into an implicit join, matching the
        // convention of the sibling dialect encoders.
        self.implicit_join(&clause.terms, out, depth)?;
        out.push_str(") ");
        Ok(())
    }

    /// Fold the FROM-term list into a left-associative nest of `join`
    /// nodes: `k` terms produce exactly `k - 1` wrappers.
    ///
    /// The fold recurses once per term, so it counts against the depth
    /// ceiling like every other recursion: a flat term list is still
    /// nesting in the output.
    fn implicit_join(
        &self,
        terms: &[FromTerm],
        out: &mut String,
        depth: usize,
    ) -> EncodeResult<()> {
        let depth = self.deeper(depth)?;
        match terms {
            [] => Err(EncodeError::malformed("FROM clause has no terms")),
            [term] => self.from_term(term, out, depth),
            [prefix @ .., last] => {
                out.push_str("(join ");
                self.implicit_join(prefix, out, depth)?;
                self.from_term(last, out, depth)?;
                out.push_str(") ");
                Ok(())
            }
        }
    }

    fn from_term(&self, term: &FromTerm, out: &mut String, depth: usize) -> EncodeResult<()> {
        if term.correlated {
            return Err(EncodeError::malformed(
                "Cannot handle correlate clauses in FromTerm",
            ));
        }
        if term.positional_var.is_some() {
            return Err(EncodeError::malformed(
                "Cannot handle positional variables in FromTerm",
            ));
        }
        let aliased = is_distinct_binding(&term.var, &term.expr);
        if aliased {
            // aliasAs marks tables and subquery-like bindings; plain "as"
            // is reserved for columns.
            node_with_string("aliasAs", term.var.decoded(), out);
        }
        if let Expr::Variable(var) = &term.expr {
            // A bare reference in term position names a table, not a
            // variable.
            append_string_node("table", var.decoded(), out);
        } else {
            self.expr(&term.expr, out, depth)?;
        }
        if aliased {
            out.push_str(") ");
        }
        Ok(())
    }

    fn group_by(
        &self,
        clause: &GroupByClause,
        out: &mut String,
        depth: usize,
    ) -> EncodeResult<()> {
        if clause.decor_list {
            return Err(EncodeError::malformed("Not supporting DecorList in group by"));
        }
        if clause.group_var.is_some() {
            return Err(EncodeError::malformed("Not supporting GroupVar in group by"));
        }
        if clause.hash_hint {
            return Err(EncodeError::malformed(
                "Not supporting HashGroupByHint in group by",
            ));
        }
        if clause.with_map {
            return Err(EncodeError::malformed("Not supporting WithMap in group by"));
        }
        out.push_str("(groupBy ");
        for pair in &clause.pairs {
            if is_distinct_binding(&pair.var, &pair.expr) {
                append_string_node("as", pair.var.decoded(), out);
            }
            self.expr(&pair.expr, out, depth)?;
        }
        out.push_str(") ");
        Ok(())
    }

    fn order_by(
        &self,
        clause: &OrderByClause,
        out: &mut String,
        depth: usize,
    ) -> EncodeResult<()> {
        out.push_str("(orderBy ");
        for item in &clause.items {
            let ordering = match item.order {
                Order::Asc => "ascending",
                Order::Desc => "descending",
            };
            out.push('(');
            out.push_str(ordering);
            out.push(' ');
            self.expr(&item.expr, out, depth)?;
            out.push_str(") ");
        }
        out.push_str(") ");
        Ok(())
    }
}

/// Whether a projection name differs from the default name its expression
/// already implies. Non-distinct names are elided entirely; the downstream
/// consumer infers them from the bare reference.
fn is_distinct_name(name: &str, expr: &Expr) -> bool {
    if let Expr::Variable(var) = expr {
        if var.is_new || var.named_value_access {
            return true;
        }
        if var.name.strip_prefix('$') == Some(name) {
            return false;
        }
    }
    true
}

/// Binding-side dual of [`is_distinct_name`], for FROM terms and group-by
/// pairs whose name is itself a variable.
fn is_distinct_binding(var: &VarRef, expr: &Expr) -> bool {
    if var.named_value_access {
        return true;
    }
    is_distinct_name(var.decoded(), expr)
}

fn literal(lit: &Literal, out: &mut String) -> EncodeResult<()> {
    match lit {
        Literal::Integer(v) | Literal::Long(v) => {
            out.push_str(&v.to_string());
            out.push(' ');
        }
        Literal::Boolean(v) => {
            out.push_str(if *v { "true" } else { "false" });
            out.push(' ');
        }
        Literal::String(v) => append_string(v, out),
        Literal::Double(v) => {
            out.push_str(&format!("{v:.6}"));
            out.push(' ');
        }
        Literal::Null => return Err(EncodeError::UnsupportedConstruct("literals of type null")),
        Literal::Missing => {
            return Err(EncodeError::UnsupportedConstruct("literals of type missing"));
        }
    }
    Ok(())
}

/// Append a quoted string with a trailing blank. No escaping of embedded
/// quotes: that is the wire format.
fn append_string(s: &str, out: &mut String) {
    out.push('"');
    out.push_str(s);
    out.push_str("\" ");
}

/// Append a closed string-argument node: `(tag "arg" ) `.
fn append_string_node(tag: &str, arg: &str, out: &mut String) {
    out.push('(');
    out.push_str(tag);
    out.push_str(" \"");
    out.push_str(arg);
    out.push_str("\" ) ");
}

/// Like [`append_string_node`] but leaves the node open for more children.
fn node_with_string(tag: &str, arg: &str, out: &mut String) {
    out.push('(');
    out.push_str(tag);
    out.push_str(" \"");
    out.push_str(arg);
    out.push_str("\" ");
}
