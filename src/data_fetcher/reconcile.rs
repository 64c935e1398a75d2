//! Task catalog reconciliation
//!
//! Answers routinely reference task ids the authoritative catalog has never
//! heard of: tasks deleted mid-game, dialect mismatches, or ad hoc bonus
//! tasks. The merged catalog must still resolve every answered id, so
//! unknown references get synthesized placeholders.

use crate::data_fetcher::models::{Answer, TaskDefinition};
use std::collections::HashSet;
use tracing::debug;

/// Merge the authoritative task catalog with tasks discovered only through
/// answer references.
///
/// Authoritative entries keep their upstream order. Every answer is walked
/// in the given order; a `task_id` absent from the known set synthesizes a
/// placeholder appended after all authoritative entries, in first-discovery
/// order. The output contains no duplicate ids and resolves every answered
/// task id.
pub fn reconcile_tasks(
    authoritative: Vec<TaskDefinition>,
    answers: &[Answer],
) -> Vec<TaskDefinition> {
    let mut known: HashSet<String> = authoritative.iter().map(|t| t.id.clone()).collect();
    let mut catalog = authoritative;

    for answer in answers {
        if answer.task_id.is_empty() || known.contains(&answer.task_id) {
            continue;
        }
        debug!(task_id = %answer.task_id, "Synthesizing placeholder for answer-only task");
        known.insert(answer.task_id.clone());
        catalog.push(TaskDefinition::synthetic(&answer.task_id));
    }

    catalog
}
