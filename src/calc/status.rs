use crate::data::Task;

/// Completion summary of one day's task list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayStatus {
    /// No tasks (absent key or empty list).
    None,
    /// At least one task still open.
    Incomplete,
    /// Every task done.
    Complete,
}

impl DayStatus {
    pub fn of(tasks: &[Task]) -> Self {
        if tasks.is_empty() {
            DayStatus::None
        } else if tasks.iter().all(|t| t.completed) {
            DayStatus::Complete
        } else {
            DayStatus::Incomplete
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayStatus::None => "none",
            DayStatus::Incomplete => "incomplete",
            DayStatus::Complete => "complete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, completed: bool) -> Task {
        Task {
            id,
            text: format!("task {id}"),
            completed,
        }
    }

    #[test]
    fn test_empty_list_is_none() {
        assert_eq!(DayStatus::of(&[]), DayStatus::None);
    }

    #[test]
    fn test_all_done_is_complete() {
        let tasks = vec![task(1, true), task(2, true)];
        assert_eq!(DayStatus::of(&tasks), DayStatus::Complete);
    }

    #[test]
    fn test_single_done_is_complete() {
        assert_eq!(DayStatus::of(&[task(1, true)]), DayStatus::Complete);
    }

    #[test]
    fn test_any_open_is_incomplete() {
        let tasks = vec![task(1, true), task(2, false), task(3, true)];
        assert_eq!(DayStatus::of(&tasks), DayStatus::Incomplete);
    }

    #[test]
    fn test_none_done_is_incomplete() {
        let tasks = vec![task(1, false), task(2, false)];
        assert_eq!(DayStatus::of(&tasks), DayStatus::Incomplete);
    }

    #[test]
    fn test_labels() {
        assert_eq!(DayStatus::None.label(), "none");
        assert_eq!(DayStatus::Incomplete.label(), "incomplete");
        assert_eq!(DayStatus::Complete.label(), "complete");
    }
}
