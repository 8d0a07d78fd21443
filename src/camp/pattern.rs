//! CAMP patterns: the expression layer of the calculus.

/// The closed set of pattern kinds. Tag names follow the downstream
/// compiler's grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Const,
    Unop,
    Binop,
    Map,
    Assert,
    OrElse,
    It,
    LetIt,
    GetConstant,
    Env,
    LetEnv,
    Left,
    Right,
}

impl PatternKind {
    /// The kind's tag in the canonical encoding.
    pub fn tag(&self) -> &'static str {
        match self {
            PatternKind::Const => "pconst",
            PatternKind::Unop => "punop",
            PatternKind::Binop => "pbinop",
            PatternKind::Map => "pmap",
            PatternKind::Assert => "passert",
            PatternKind::OrElse => "porElse",
            PatternKind::It => "pit",
            PatternKind::LetIt => "pletIt",
            PatternKind::GetConstant => "pgetconstant",
            PatternKind::Env => "penv",
            PatternKind::LetEnv => "pletEnv",
            PatternKind::Left => "pleft",
            PatternKind::Right => "pright",
        }
    }
}

/// Constant data embedded in a `pconst` pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Null,
    Int(i64),
    Bool(bool),
    Str(String),
}

/// Unary operators applicable in a `punop` pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    Identity,
    Neg,
    Count,
    /// Project a record field.
    Dot(String),
    /// Build a single-field record.
    Rec(String),
}

/// Binary operators applicable in a `pbinop` pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Equal,
    Lt,
    Le,
    Plus,
    Minus,
    And,
    Or,
    Concat,
    Union,
}

/// A CAMP pattern. Operand arity is fixed by the variant, so a node with
/// the wrong operand count cannot be constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Const(Constant),
    Unop(UnaryOperator, Box<Pattern>),
    Binop(BinaryOperator, Box<Pattern>, Box<Pattern>),
    Map(Box<Pattern>),
    Assert(Box<Pattern>),
    OrElse(Box<Pattern>, Box<Pattern>),
    It,
    LetIt(Box<Pattern>, Box<Pattern>),
    GetConstant(String),
    Env,
    LetEnv(Box<Pattern>, Box<Pattern>),
    Left,
    Right,
}

impl Pattern {
    pub fn kind(&self) -> PatternKind {
        match self {
            Pattern::Const(_) => PatternKind::Const,
            Pattern::Unop(..) => PatternKind::Unop,
            Pattern::Binop(..) => PatternKind::Binop,
            Pattern::Map(_) => PatternKind::Map,
            Pattern::Assert(_) => PatternKind::Assert,
            Pattern::OrElse(..) => PatternKind::OrElse,
            Pattern::It => PatternKind::It,
            Pattern::LetIt(..) => PatternKind::LetIt,
            Pattern::GetConstant(_) => PatternKind::GetConstant,
            Pattern::Env => PatternKind::Env,
            Pattern::LetEnv(..) => PatternKind::LetEnv,
            Pattern::Left => PatternKind::Left,
            Pattern::Right => PatternKind::Right,
        }
    }

    /// How many pattern operands this node carries.
    pub fn arity(&self) -> usize {
        match self {
            Pattern::Const(_)
            | Pattern::It
            | Pattern::GetConstant(_)
            | Pattern::Env
            | Pattern::Left
            | Pattern::Right => 0,
            Pattern::Unop(..) | Pattern::Map(_) | Pattern::Assert(_) => 1,
            Pattern::Binop(..)
            | Pattern::OrElse(..)
            | Pattern::LetIt(..)
            | Pattern::LetEnv(..) => 2,
        }
    }

    /// The first operand. Consumers must not ask a kind with arity 0.
    pub fn operand1(&self) -> Option<&Pattern> {
        match self {
            Pattern::Unop(_, p) | Pattern::Map(p) | Pattern::Assert(p) => Some(p),
            Pattern::Binop(_, p, _)
            | Pattern::OrElse(p, _)
            | Pattern::LetIt(p, _)
            | Pattern::LetEnv(p, _) => Some(p),
            _ => None,
        }
    }

    /// The second operand. Consumers must not ask a kind with arity < 2.
    pub fn operand2(&self) -> Option<&Pattern> {
        match self {
            Pattern::Binop(_, _, p)
            | Pattern::OrElse(_, p)
            | Pattern::LetIt(_, p)
            | Pattern::LetEnv(_, p) => Some(p),
            _ => None,
        }
    }

    /// Serialize this pattern into the canonical encoding.
    ///
    /// Extension point for the later compiler stage; writes nothing yet.
    pub fn emit(&self, _out: &mut String) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_matches_kind() {
        assert_eq!(Pattern::It.arity(), 0);
        assert_eq!(Pattern::Map(Box::new(Pattern::It)).arity(), 1);
        let binop = Pattern::Binop(
            BinaryOperator::Equal,
            Box::new(Pattern::It),
            Box::new(Pattern::Env),
        );
        assert_eq!(binop.arity(), 2);
    }

    #[test]
    fn test_operand_access_stops_at_arity() {
        let assert_p = Pattern::Assert(Box::new(Pattern::It));
        assert_eq!(assert_p.operand1(), Some(&Pattern::It));
        assert_eq!(assert_p.operand2(), None);
        assert_eq!(Pattern::Left.operand1(), None);

        let let_env = Pattern::LetEnv(Box::new(Pattern::Env), Box::new(Pattern::It));
        assert_eq!(let_env.operand1(), Some(&Pattern::Env));
        assert_eq!(let_env.operand2(), Some(&Pattern::It));
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(Pattern::It.kind().tag(), "pit");
        assert_eq!(Pattern::GetConstant("WORLD".into()).kind().tag(), "pgetconstant");
        assert_eq!(
            Pattern::OrElse(Box::new(Pattern::Left), Box::new(Pattern::Right))
                .kind()
                .tag(),
            "porElse"
        );
    }

    #[test]
    fn test_emit_is_a_stub() {
        let mut out = String::new();
        Pattern::Const(Constant::Int(1)).emit(&mut out);
        assert!(out.is_empty());
    }
}
