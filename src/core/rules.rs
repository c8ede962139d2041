//! Substitution rules and the rule tree.
//!
//! A rule rewrites text inside one file; the tree assigns ordered rule lists
//! to files, mirroring the template's directory layout. Every replacement
//! that touches a given file lives in exactly one leaf, so the engine can do
//! one read, one fold, one write per file.

use indexmap::IndexMap;

use regex::{NoExpand, Regex};

use super::error::SubstitutionError;

// ============================================================================
// Rules
// ============================================================================

/// How much of the file a matching rule rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Only the first occurrence.
    First,
    /// Every occurrence.
    All,
}

/// Text matcher for a rule.
///
/// Regex patterns are carried as source text and compiled at application
/// time, which keeps tree construction total; a malformed pattern surfaces
/// from the engine as a [`SubstitutionError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    Literal(String),
    Regex(String),
}

/// A single substitution step for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Slot left by a condition that evaluated false. Applying it returns
    /// the content unchanged; keeping the slot preserves the positional
    /// correspondence between built trees and the static rule definitions.
    NoOp,

    Replace {
        pattern: Pattern,
        mode: MatchMode,
        replacement: String,
    },
}

impl Rule {
    /// Replace the first occurrence of a literal.
    pub fn literal(pattern: &str, replacement: &str) -> Rule {
        Rule::Replace {
            pattern: Pattern::Literal(pattern.to_string()),
            mode: MatchMode::First,
            replacement: replacement.to_string(),
        }
    }

    /// Replace every occurrence of a literal.
    pub fn literal_all(pattern: &str, replacement: &str) -> Rule {
        Rule::Replace {
            pattern: Pattern::Literal(pattern.to_string()),
            mode: MatchMode::All,
            replacement: replacement.to_string(),
        }
    }

    /// Replace the first regex match. The replacement is taken verbatim,
    /// with no capture-group expansion.
    pub fn regex(pattern: &str, replacement: &str) -> Rule {
        Rule::Replace {
            pattern: Pattern::Regex(pattern.to_string()),
            mode: MatchMode::First,
            replacement: replacement.to_string(),
        }
    }

    /// Replace every regex match, verbatim replacement.
    pub fn regex_all(pattern: &str, replacement: &str) -> Rule {
        Rule::Replace {
            pattern: Pattern::Regex(pattern.to_string()),
            mode: MatchMode::All,
            replacement: replacement.to_string(),
        }
    }

    /// Gate a rule on a bootstrap condition. A false condition yields the
    /// no-op slot instead of dropping the rule.
    pub fn when(condition: bool, rule: Rule) -> Rule {
        if condition {
            rule
        } else {
            Rule::NoOp
        }
    }

    /// True for the slot produced by a false condition.
    pub fn is_noop(&self) -> bool {
        matches!(self, Rule::NoOp)
    }

    /// Apply this rule to file content, producing the next content.
    ///
    /// A pattern that does not occur is not an error: the content passes
    /// through unchanged.
    pub fn apply(&self, content: &str) -> Result<String, SubstitutionError> {
        match self {
            Rule::NoOp => Ok(content.to_string()),
            Rule::Replace {
                pattern,
                mode,
                replacement,
            } => match pattern {
                Pattern::Literal(needle) => Ok(match mode {
                    MatchMode::First => content.replacen(needle.as_str(), replacement, 1),
                    MatchMode::All => content.replace(needle.as_str(), replacement),
                }),
                Pattern::Regex(source) => {
                    let re = Regex::new(source).map_err(|e| SubstitutionError::Pattern {
                        pattern: source.clone(),
                        source: e,
                    })?;
                    let replaced = match mode {
                        MatchMode::First => re.replace(content, NoExpand(replacement)),
                        MatchMode::All => re.replace_all(content, NoExpand(replacement)),
                    };
                    Ok(replaced.into_owned())
                }
            },
        }
    }
}

// ============================================================================
// Rule tree
// ============================================================================

/// A node in the rule tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleNode {
    /// Directory: child name to subtree, in declaration order.
    Dir(IndexMap<String, RuleNode>),
    /// File: ordered rule list. Later rules see earlier rules' output.
    File(Vec<Rule>),
}

impl RuleNode {
    /// Build a directory node from (name, child) pairs.
    pub fn dir(children: Vec<(&str, RuleNode)>) -> RuleNode {
        RuleNode::Dir(
            children
                .into_iter()
                .map(|(name, node)| (name.to_string(), node))
                .collect(),
        )
    }

    /// Build a file node from its ordered rule list.
    pub fn file(rules: Vec<Rule>) -> RuleNode {
        RuleNode::File(rules)
    }

    /// Number of applicable (non-placeholder) rules in the subtree.
    pub fn active_rules(&self) -> usize {
        match self {
            RuleNode::Dir(children) => children.values().map(RuleNode::active_rules).sum(),
            RuleNode::File(rules) => rules.iter().filter(|r| !r.is_noop()).count(),
        }
    }
}
