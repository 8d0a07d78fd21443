//! Verb tables: source operator tokens to canonical encoding verbs.
//!
//! Pure lookups over process-wide constant tables. A missing entry is not
//! itself an error; callers decide whether absence is fatal.

use crate::ast::{OperatorKind, UnaryKind};

/// The canonical verb for a binary operator, if one is defined.
pub fn verb_for(op: OperatorKind) -> Option<&'static str> {
    match op {
        OperatorKind::Gt => Some("greater_than"),
        OperatorKind::Lt => Some("less_than"),
        OperatorKind::Eq => Some("equal"),
        OperatorKind::Neq => Some("not_equal"),
        OperatorKind::And => Some("and"),
        OperatorKind::Like => Some("like"),
        OperatorKind::Div => Some("divide"),
        OperatorKind::Mul => Some("multiply"),
        OperatorKind::In => Some("isIn"),
        // TODO the rest of these
        _ => None,
    }
}

/// The canonical verb for a unary operator, if one is defined.
pub fn unary_verb_for(op: UnaryKind) -> Option<&'static str> {
    match op {
        UnaryKind::Exists => Some("exists"),
        // TODO the rest of these
        _ => None,
    }
}

/// The date-function name substituted for an operator when heuristic type
/// inference decides the operation involves dates.
pub fn date_verb_for(op: OperatorKind) -> Option<&'static str> {
    match op {
        OperatorKind::Ge => Some("date_ge"),
        OperatorKind::Gt => Some("date_gt"),
        OperatorKind::Le => Some("date_le"),
        OperatorKind::Lt => Some("date_lt"),
        OperatorKind::Minus => Some("date_minus"),
        OperatorKind::Neq => Some("date_ne"),
        OperatorKind::Plus => Some("date_plus"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_lookup() {
        assert_eq!(verb_for(OperatorKind::Gt), Some("greater_than"));
        assert_eq!(verb_for(OperatorKind::In), Some("isIn"));
        assert_eq!(verb_for(OperatorKind::Ge), None);
        assert_eq!(verb_for(OperatorKind::Or), None);
    }

    #[test]
    fn test_unary_verb_lookup() {
        assert_eq!(unary_verb_for(UnaryKind::Exists), Some("exists"));
        assert_eq!(unary_verb_for(UnaryKind::Negative), None);
    }

    #[test]
    fn test_date_verb_lookup() {
        assert_eq!(date_verb_for(OperatorKind::Ge), Some("date_ge"));
        assert_eq!(date_verb_for(OperatorKind::Plus), Some("date_plus"));
        assert_eq!(date_verb_for(OperatorKind::Eq), None);
    }
}
