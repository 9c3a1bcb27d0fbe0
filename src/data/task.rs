use crate::calc::DayStatus;
use chrono::Local;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub text: String,
    pub completed: bool,
}

/// In-memory mapping of date key -> ordered task list.
///
/// Every mutation is a single [`TaskStore::update`] on one key; other keys
/// are never touched. An absent key and an empty list both mean "no tasks".
#[derive(Debug, Default)]
pub struct TaskStore {
    lists: HashMap<String, Vec<Task>>,
    /// Highest id handed out so far.
    last_id: i64,
}

impl TaskStore {
    pub fn tasks(&self, key: &str) -> &[Task] {
        self.lists.get(key).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn status(&self, key: &str) -> DayStatus {
        DayStatus::of(self.tasks(key))
    }

    /// Replaces the list stored under `key` with `f(current list or empty)`.
    pub fn update<F>(&mut self, key: &str, f: F)
    where
        F: FnOnce(Vec<Task>) -> Vec<Task>,
    {
        let current = self.lists.remove(key).unwrap_or_default();
        self.lists.insert(key.to_string(), f(current));
    }

    pub fn toggle(&mut self, key: &str, id: i64) {
        self.update(key, |tasks| {
            tasks
                .into_iter()
                .map(|mut t| {
                    if t.id == id {
                        t.completed = !t.completed;
                    }
                    t
                })
                .collect()
        });
    }

    pub fn delete(&mut self, key: &str, id: i64) {
        self.update(key, |tasks| tasks.into_iter().filter(|t| t.id != id).collect());
    }

    /// Appends a new open task. Blank text is ignored and returns `None`.
    pub fn add(&mut self, key: &str, text: &str) -> Option<i64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = self.next_id(Local::now().timestamp_millis());
        let task = Task {
            id,
            text: text.to_string(),
            completed: false,
        };
        self.update(key, |mut tasks| {
            tasks.push(task);
            tasks
        });
        Some(id)
    }

    /// Replaces a task's text. Blank text leaves the original untouched.
    pub fn rename(&mut self, key: &str, id: i64, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.update(key, |tasks| {
            tasks
                .into_iter()
                .map(|mut t| {
                    if t.id == id {
                        t.text = text.to_string();
                    }
                    t
                })
                .collect()
        });
    }

    /// Creation-timestamp id, bumped past the last one so ids stay unique
    /// and increasing even within the same millisecond.
    fn next_id(&mut self, now_millis: i64) -> i64 {
        let id = now_millis.max(self.last_id + 1);
        self.last_id = id;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "2024-03-15";
    const OTHER: &str = "2024-03-16";

    fn ids(store: &TaskStore, key: &str) -> Vec<i64> {
        store.tasks(key).iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_tasks_absent_key_is_empty() {
        let store = TaskStore::default();
        assert!(store.tasks(KEY).is_empty());
        assert!(store.lists.is_empty());
    }

    #[test]
    fn test_add_trims_and_appends() {
        let mut store = TaskStore::default();
        let id = store.add(KEY, " buy milk ").unwrap();
        let tasks = store.tasks(KEY);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, id);
        assert_eq!(tasks[0].text, "buy milk");
        assert!(!tasks[0].completed);
    }

    #[test]
    fn test_add_blank_is_ignored() {
        let mut store = TaskStore::default();
        assert_eq!(store.add(KEY, ""), None);
        assert_eq!(store.add(KEY, "   "), None);
        assert!(store.tasks(KEY).is_empty());
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut store = TaskStore::default();
        store.add(KEY, "a");
        store.add(KEY, "b");
        store.add(KEY, "c");
        let texts: Vec<_> = store.tasks(KEY).iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_ids_unique_and_increasing() {
        let mut store = TaskStore::default();
        let a = store.add(KEY, "a").unwrap();
        let b = store.add(KEY, "b").unwrap();
        let c = store.add(OTHER, "c").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_next_id_never_repeats_when_clock_stalls() {
        let mut store = TaskStore::default();
        assert_eq!(store.next_id(1000), 1000);
        assert_eq!(store.next_id(1000), 1001);
        assert_eq!(store.next_id(900), 1002);
        assert_eq!(store.next_id(5000), 5000);
    }

    #[test]
    fn test_toggle_flips_only_matching_task() {
        let mut store = TaskStore::default();
        let a = store.add(KEY, "a").unwrap();
        let b = store.add(KEY, "b").unwrap();
        store.toggle(KEY, a);
        let tasks = store.tasks(KEY);
        assert!(tasks[0].completed);
        assert!(!tasks[1].completed);
        assert_eq!(ids(&store, KEY), vec![a, b]);

        store.toggle(KEY, a);
        assert!(!store.tasks(KEY)[0].completed);
    }

    #[test]
    fn test_toggle_missing_id_is_noop() {
        let mut store = TaskStore::default();
        store.add(KEY, "a");
        let before = store.tasks(KEY).to_vec();
        store.toggle(KEY, -1);
        assert_eq!(store.tasks(KEY), before.as_slice());
    }

    #[test]
    fn test_delete_removes_one_and_keeps_order() {
        let mut store = TaskStore::default();
        let a = store.add(KEY, "a").unwrap();
        let b = store.add(KEY, "b").unwrap();
        let c = store.add(KEY, "c").unwrap();
        store.delete(KEY, b);
        assert_eq!(ids(&store, KEY), vec![a, c]);
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let mut store = TaskStore::default();
        let a = store.add(KEY, "a").unwrap();
        store.delete(KEY, a + 100);
        assert_eq!(ids(&store, KEY), vec![a]);
    }

    #[test]
    fn test_rename_trims() {
        let mut store = TaskStore::default();
        let a = store.add(KEY, "old").unwrap();
        store.rename(KEY, a, "  new ");
        assert_eq!(store.tasks(KEY)[0].text, "new");
    }

    #[test]
    fn test_rename_blank_keeps_original() {
        let mut store = TaskStore::default();
        let a = store.add(KEY, "keep me").unwrap();
        store.rename(KEY, a, "");
        store.rename(KEY, a, "   ");
        assert_eq!(store.tasks(KEY)[0].text, "keep me");
    }

    #[test]
    fn test_mutations_do_not_leak_across_keys() {
        let mut store = TaskStore::default();
        let other = store.add(OTHER, "other").unwrap();
        let a = store.add(KEY, "a").unwrap();
        store.toggle(KEY, a);
        store.rename(KEY, a, "renamed");
        store.delete(KEY, a);
        // same id used against the wrong key must not reach OTHER
        store.toggle(KEY, other);
        let others = store.tasks(OTHER);
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].text, "other");
        assert!(!others[0].completed);
    }

    #[test]
    fn test_update_replaces_only_given_key() {
        let mut store = TaskStore::default();
        store.add(OTHER, "x");
        store.update(KEY, |_| {
            vec![Task {
                id: 7,
                text: "seven".to_string(),
                completed: true,
            }]
        });
        assert_eq!(store.tasks(KEY)[0].id, 7);
        assert_eq!(store.tasks(OTHER)[0].text, "x");
    }

    #[test]
    fn test_status_scenario() {
        let mut store = TaskStore::default();
        assert_eq!(store.status(KEY), DayStatus::None);
        let a = store.add(KEY, "a").unwrap();
        let b = store.add(KEY, "b").unwrap();
        store.toggle(KEY, a);
        assert_eq!(store.status(KEY), DayStatus::Incomplete);
        store.toggle(KEY, b);
        assert_eq!(store.status(KEY), DayStatus::Complete);
        store.delete(KEY, a);
        store.delete(KEY, b);
        assert_eq!(store.status(KEY), DayStatus::None);
        assert_eq!(store.status(OTHER), DayStatus::None);
    }
}
