//! Indentation-driven outline parser for bulk category import.
//!
//! Turns free text into a sequence of parented insertions: each non-blank
//! line becomes one category, indentation depth decides parentage. The parser
//! is pure — it produces a plan with intra-plan parent references and leaves
//! the actual arena insertion (and anchoring) to the caller.

/// One planned insertion from an outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    /// Trimmed display name for the new category
    pub name: String,
    /// Index of the parent insertion earlier in the plan,
    /// None for anchor-level entries
    pub parent: Option<usize>,
}

/// Parse indentation-formatted text into an insertion plan.
///
/// Rules (single pass, O(n) in lines):
/// - blank and whitespace-only lines are skipped entirely and do not reset
///   the hierarchy;
/// - `indent` is the count of leading whitespace characters — tabs and spaces
///   each count one column, no tab expansion, so mixed indentation is
///   visually misleading but deterministic;
/// - a stack of `(plan_index, indent)` tracks the right-edge ancestor path;
///   entries with `indent >=` the current line are popped, so a line at the
///   same indentation becomes a sibling, not a child;
/// - the parent is the new stack top, or anchor level when the stack is
///   empty.
pub fn plan(text: &str) -> Vec<Insertion> {
    let mut insertions: Vec<Insertion> = Vec::new();
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for line in text.lines() {
        let name = line.trim();
        if name.is_empty() {
            continue;
        }
        let indent = line.chars().take_while(|c| c.is_whitespace()).count();

        while let Some(&(_, top_indent)) = stack.last() {
            if top_indent >= indent {
                stack.pop();
            } else {
                break;
            }
        }

        let parent = stack.last().map(|&(index, _)| index);
        let index = insertions.len();
        insertions.push(Insertion {
            name: name.to_string(),
            parent,
        });
        stack.push((index, indent));
    }

    insertions
}
