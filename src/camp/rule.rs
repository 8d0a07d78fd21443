//! CAMP rules: the statement layer of the calculus.

use crate::camp::pattern::Pattern;

/// The closed set of rule kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    When,
    Not,
    Return,
    Global,
    Compound,
}

/// A CAMP rule. Rules are immutable once built; composition goes through
/// [`Rule::compound`], which owns the flattening invariant.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Match a pattern against each working-memory element.
    When(Pattern),
    /// Require that no element matches the pattern.
    Not(Pattern),
    /// Produce the pattern's value as the rule's result.
    Return(Pattern),
    /// Match against the whole working memory at once.
    Global(Pattern),
    /// An ordered concatenation of other rules.
    Compound(CompoundRule),
}

impl Rule {
    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::When(_) => RuleKind::When,
            Rule::Not(_) => RuleKind::Not,
            Rule::Return(_) => RuleKind::Return,
            Rule::Global(_) => RuleKind::Global,
            Rule::Compound(_) => RuleKind::Compound,
        }
    }

    /// Combine two rules, left before right.
    ///
    /// If either side is itself compound, its member list is spliced in
    /// rather than nested, so a compound's members are always flat and
    /// preserve left-to-right input order.
    pub fn compound(left: Rule, right: Rule) -> Rule {
        let mut members = Vec::new();
        match left {
            Rule::Compound(compound) => members.extend(compound.members),
            other => members.push(other),
        }
        match right {
            Rule::Compound(compound) => members.extend(compound.members),
            other => members.push(other),
        }
        Rule::Compound(CompoundRule { members })
    }

    /// Serialize this rule into the canonical encoding.
    ///
    /// Extension point for the later compiler stage; writes nothing yet.
    pub fn emit(&self, _out: &mut String) {}
}

/// A flat, ordered list of member rules.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundRule {
    members: Vec<Rule>,
}

impl CompoundRule {
    /// The member rules, in order. Read-only; compounds never change
    /// after construction.
    pub fn members(&self) -> &[Rule] {
        &self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camp::pattern::Pattern;

    fn a() -> Rule {
        Rule::When(Pattern::It)
    }

    fn b() -> Rule {
        Rule::Not(Pattern::Left)
    }

    fn c() -> Rule {
        Rule::Return(Pattern::Env)
    }

    fn members_of(rule: &Rule) -> &[Rule] {
        match rule {
            Rule::Compound(compound) => compound.members(),
            other => panic!("expected a compound rule, got {other:?}"),
        }
    }

    #[test]
    fn test_compound_of_two_simple_rules() {
        let rule = Rule::compound(a(), b());
        assert_eq!(rule.kind(), RuleKind::Compound);
        assert_eq!(members_of(&rule), &[a(), b()]);
    }

    #[test]
    fn test_left_nested_compound_flattens() {
        let rule = Rule::compound(Rule::compound(a(), b()), c());
        assert_eq!(members_of(&rule), &[a(), b(), c()]);
    }

    #[test]
    fn test_right_nested_compound_flattens() {
        let rule = Rule::compound(a(), Rule::compound(b(), c()));
        assert_eq!(members_of(&rule), &[a(), b(), c()]);
    }

    #[test]
    fn test_deep_nesting_stays_flat() {
        let left = Rule::compound(Rule::compound(a(), b()), c());
        let right = Rule::compound(b(), Rule::compound(c(), a()));
        let rule = Rule::compound(left, right);
        assert_eq!(members_of(&rule), &[a(), b(), c(), b(), c(), a()]);
    }

    #[test]
    fn test_emit_is_a_stub() {
        let mut out = String::new();
        Rule::compound(a(), b()).emit(&mut out);
        assert!(out.is_empty());
    }
}
