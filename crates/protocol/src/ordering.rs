//! Per-column task ordering.
//!
//! Column membership is never stored: the tasks shown in a column are always
//! derived from the current flat task list by [`ordered`].

use std::sync::Arc;

use crate::model::Task;

/// Returns the tasks of `column_id`, latest deadline first.
///
/// The sort is stable, so tasks sharing a deadline keep their relative order
/// from `tasks`. The input is left untouched.
///
/// # Examples
///
/// ```
/// use kanban_protocol::{Deadline, Task, ordered};
///
/// let tasks = vec![
///     Task::new("t1", "c1", "Write spec", Deadline::from_millis(100)),
///     Task::new("t2", "c1", "Review", Deadline::from_millis(200)),
///     Task::new("t3", "other", "X", Deadline::from_millis(300)),
/// ];
///
/// let titles: Vec<_> = ordered(&tasks, "c1").into_iter().map(|t| t.title).collect();
/// assert_eq!(titles, ["Review", "Write spec"]);
/// ```
#[must_use]
pub fn ordered(tasks: &[Task], column_id: &str) -> Vec<Task> {
    let mut matching: Vec<Task> = tasks
        .iter()
        .filter(|task| task.column_id == column_id)
        .cloned()
        .collect();
    matching.sort_by(|a, b| b.deadline.cmp(&a.deadline));
    matching
}

/// Memoizes [`ordered`] for one column.
///
/// The cached result is reused as long as the same task list (by `Arc`
/// identity) is asked for the same column.
#[derive(Debug, Default)]
pub struct MemoizedOrdering {
    source: Option<Arc<Vec<Task>>>,
    column_id: String,
    result: Vec<Task>,
    #[cfg(test)]
    computations: usize,
}

impl MemoizedOrdering {
    /// Creates an empty memo.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the ordered tasks of `column_id` within `tasks`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use kanban_protocol::{Deadline, MemoizedOrdering, Task};
    ///
    /// let tasks = Arc::new(vec![Task::new("t1", "c1", "Only", Deadline::from_millis(1))]);
    /// let mut memo = MemoizedOrdering::new();
    ///
    /// let first = memo.get(&tasks, "c1").as_ptr();
    /// assert_eq!(memo.get(&tasks, "c1").as_ptr(), first);
    /// ```
    pub fn get(&mut self, tasks: &Arc<Vec<Task>>, column_id: &str) -> &[Task] {
        let fresh = self
            .source
            .as_ref()
            .is_some_and(|source| Arc::ptr_eq(source, tasks))
            && self.column_id == column_id;

        if !fresh {
            self.result = ordered(tasks, column_id);
            self.source = Some(Arc::clone(tasks));
            column_id.clone_into(&mut self.column_id);
            #[cfg(test)]
            {
                self.computations += 1;
            }
        }

        &self.result
    }

    #[cfg(test)]
    fn computations(&self) -> usize {
        self.computations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Deadline;

    fn task(id: &str, column: &str, deadline: i64) -> Task {
        Task::new(id, column, id.to_uppercase(), Deadline::from_millis(deadline))
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(ordered(&[], "c1").is_empty());
    }

    #[test]
    fn unmatched_column_gives_empty_output() {
        let tasks = vec![task("t1", "c1", 1), task("t2", "c2", 2)];
        assert!(ordered(&tasks, "nope").is_empty());
    }

    #[test]
    fn ties_keep_input_order() {
        let tasks = vec![
            task("a", "c1", 5),
            task("b", "c1", 9),
            task("c", "c1", 5),
            task("d", "c1", 5),
        ];
        let ids: Vec<_> = ordered(&tasks, "c1").into_iter().map(|t| t.id).collect();
        assert_eq!(ids, ["b", "a", "c", "d"]);
    }

    #[test]
    fn input_is_not_mutated() {
        let tasks = vec![task("t1", "c1", 1), task("t2", "c1", 2)];
        let before = tasks.clone();
        let _ = ordered(&tasks, "c1");
        assert_eq!(tasks, before);
    }

    #[test]
    fn memo_recomputes_on_new_list_or_column() {
        let first = Arc::new(vec![task("t1", "c1", 1), task("t2", "c2", 2)]);
        let mut memo = MemoizedOrdering::new();

        assert_eq!(memo.get(&first, "c1").len(), 1);
        assert_eq!(memo.get(&first, "c1").len(), 1);
        assert_eq!(memo.computations(), 1);

        // Equal contents, different allocation.
        let second = Arc::new((*first).clone());
        assert_eq!(memo.get(&second, "c1").len(), 1);
        assert_eq!(memo.computations(), 2);

        assert_eq!(memo.get(&second, "c2")[0].id, "t2");
        assert_eq!(memo.computations(), 3);
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use crate::model::Deadline;
    use proptest::prelude::*;

    prop_compose! {
        fn arb_task()(
            id in "[a-z]{1,8}",
            column in prop_oneof![Just("c1"), Just("c2"), Just("c3")],
            deadline in -1_000i64..1_000,
        ) -> Task {
            Task::new(id, column, "title", Deadline::from_millis(deadline))
        }
    }

    proptest! {
        /// Only tasks of the requested column are returned.
        #[test]
        fn only_matching_tasks(tasks in prop::collection::vec(arb_task(), 0..40)) {
            let result = ordered(&tasks, "c1");
            prop_assert!(result.iter().all(|t| t.column_id == "c1"));
            let expected = tasks.iter().filter(|t| t.column_id == "c1").count();
            prop_assert_eq!(result.len(), expected);
        }

        /// Deadlines never increase along the result.
        #[test]
        fn deadlines_descend(tasks in prop::collection::vec(arb_task(), 0..40)) {
            let result = ordered(&tasks, "c2");
            for pair in result.windows(2) {
                prop_assert!(pair[0].deadline >= pair[1].deadline);
            }
        }

        /// The memo always agrees with a direct computation.
        #[test]
        fn memo_matches_direct(tasks in prop::collection::vec(arb_task(), 0..40)) {
            let tasks = Arc::new(tasks);
            let mut memo = MemoizedOrdering::new();
            for column in ["c1", "c2", "c1", "c3"] {
                let direct = ordered(&tasks, column);
                prop_assert_eq!(memo.get(&tasks, column), direct.as_slice());
            }
        }
    }
}
