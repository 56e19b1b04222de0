use std::collections::HashSet;

use crate::model::task::Task;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reconciliation {
    pub merged: Vec<Task>,
    pub push_local_only: Vec<Task>,
}

/// The remote copy wins for any id present on both sides. Local tasks the
/// server does not know are kept and scheduled for push.
pub fn reconcile(local: &[Task], remote: &[Task]) -> Reconciliation {
    let mut remote_ids: HashSet<i64> = HashSet::with_capacity(remote.len());
    let mut merged = Vec::with_capacity(remote.len() + local.len());

    for task in remote {
        // a remote row without an id cannot be addressed again
        let Some(id) = task.id else { continue };
        if remote_ids.insert(id) {
            merged.push(task.clone());
        }
    }

    let mut push_local_only = Vec::new();
    let mut pushed_ids: HashSet<i64> = HashSet::new();

    for task in local {
        if let Some(id) = task.id {
            if remote_ids.contains(&id) || !pushed_ids.insert(id) {
                continue;
            }
        }
        merged.push(task.clone());
        push_local_only.push(task.clone());
    }

    Reconciliation {
        merged,
        push_local_only,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Level;
    use chrono::{TimeZone, Utc};

    fn task(id: Option<i64>, title: &str) -> Task {
        let at = Utc.with_ymd_and_hms(2024, 1, 12, 12, 0, 0).unwrap();
        let mut t = Task::new(title.to_string(), String::new(), Level::Medium, Level::Medium, at, at);
        t.id = id;
        t
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn remote_wins_and_local_only_is_pushed() {
        let local = vec![task(Some(1), "A"), task(Some(2), "B(local)")];
        let remote = vec![task(Some(2), "B(server)"), task(Some(3), "C")];

        let result = reconcile(&local, &remote);

        assert_eq!(titles(&result.merged), vec!["B(server)", "C", "A"]);
        assert_eq!(titles(&result.push_local_only), vec!["A"]);
    }

    #[test]
    fn unsynced_tasks_are_always_pushed() {
        let local = vec![task(None, "draft 1"), task(None, "draft 2"), task(Some(5), "known")];
        let remote = vec![task(Some(5), "known(server)")];

        let result = reconcile(&local, &remote);

        assert_eq!(titles(&result.merged), vec!["known(server)", "draft 1", "draft 2"]);
        assert_eq!(titles(&result.push_local_only), vec!["draft 1", "draft 2"]);
    }

    #[test]
    fn empty_local_yields_remote() {
        let remote = vec![task(Some(1), "A"), task(Some(2), "B")];
        let result = reconcile(&[], &remote);
        assert_eq!(result.merged, remote);
        assert!(result.push_local_only.is_empty());
    }

    #[test]
    fn empty_remote_repushes_everything() {
        let local = vec![task(Some(1), "A"), task(None, "B")];
        let result = reconcile(&local, &[]);
        assert_eq!(result.merged, local);
        assert_eq!(result.push_local_only, local);
    }

    #[test]
    fn reconciling_again_is_a_no_op() {
        let local = vec![task(Some(1), "A"), task(Some(2), "B(local)"), task(None, "draft")];
        let remote = vec![task(Some(2), "B(server)"), task(Some(3), "C")];

        let first = reconcile(&local, &remote);
        let second = reconcile(&first.merged, &remote);

        assert_eq!(second.merged, first.merged);
    }

    #[test]
    fn every_remote_id_keeps_remote_values() {
        let local = vec![task(Some(1), "one(local)"), task(Some(2), "two(local)"), task(Some(4), "four")];
        let remote = vec![task(Some(1), "one(server)"), task(Some(2), "two(server)"), task(Some(3), "three")];

        let result = reconcile(&local, &remote);

        for r in &remote {
            let found: Vec<_> = result.merged.iter().filter(|m| m.id == r.id).collect();
            assert_eq!(found, vec![r]);
        }
        assert_eq!(titles(&result.push_local_only), vec!["four"]);
        assert!(result.merged.iter().any(|m| m.id == Some(4)));
    }

    #[test]
    fn remote_rows_without_id_are_dropped() {
        let local = vec![task(Some(1), "A")];
        let remote = vec![task(None, "orphan"), task(Some(2), "B")];

        let first = reconcile(&local, &remote);
        let second = reconcile(&first.merged, &remote);

        assert_eq!(titles(&first.merged), vec!["B", "A"]);
        assert_eq!(titles(&first.push_local_only), vec!["A"]);
        assert_eq!(second.merged, first.merged);
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let local = vec![task(Some(9), "nine first"), task(Some(9), "nine second")];
        let remote = vec![task(Some(1), "one first"), task(Some(1), "one second")];

        let result = reconcile(&local, &remote);

        assert_eq!(titles(&result.merged), vec!["one first", "nine first"]);
        assert_eq!(titles(&result.push_local_only), vec!["nine first"]);
    }
}
