// Reconciliation: turn provider suggestions into the modified text
use crate::types::{Change, Suggestion};

/// Number suggestions as `change-0`, `change-1`, ... in provider order.
pub fn assign_ids(suggestions: Vec<Suggestion>) -> Vec<Change> {
    suggestions
        .into_iter()
        .enumerate()
        .map(|(i, s)| Change {
            id: format!("change-{}", i),
            original: s.original,
            inclusive: s.inclusive,
        })
        .collect()
}

/// Apply every change as a global literal replacement, in order.
///
/// Each change sees the output of the previous ones, so overlapping phrases
/// depend on the order the provider returned them in.
pub fn apply_changes(text: &str, changes: &[Change]) -> String {
    let mut modified = text.to_string();
    for change in changes {
        if change.original.is_empty() {
            continue;
        }
        modified = modified.replace(&change.original, &change.inclusive);
    }
    modified
}
