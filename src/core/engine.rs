//! Substitution engine.
//!
//! Walks the generated tree in lock-step with the rule tree and rewrites
//! each referenced file exactly once: one read, one ordered fold over the
//! file's rules, at most one write. Files the tree does not mention are
//! never touched.

use std::path::Path;

use super::error::SubstitutionError;
use super::rules::{Rule, RuleNode};

/// Apply a rule tree to the project rooted at `root`.
///
/// Directory nodes recurse by joining the child name onto the accumulated
/// path; file nodes get a single read-modify-write. A file named by the tree
/// must exist on disk.
pub fn apply(tree: &RuleNode, root: &Path) -> Result<(), SubstitutionError> {
    match tree {
        RuleNode::Dir(children) => {
            for (name, child) in children {
                apply(child, &root.join(name))?;
            }
            Ok(())
        }
        RuleNode::File(rules) => rewrite_file(rules, root),
    }
}

/// Fold the ordered rule list over one file's content.
fn rewrite_file(rules: &[Rule], path: &Path) -> Result<(), SubstitutionError> {
    let original = std::fs::read_to_string(path).map_err(|e| SubstitutionError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut content = original.clone();
    for rule in rules {
        content = rule.apply(&content)?;
    }

    // Unchanged content keeps the file (and its mtime) untouched.
    if content == original {
        return Ok(());
    }

    std::fs::write(path, content).map_err(|e| SubstitutionError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}
