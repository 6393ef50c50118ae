//! Display ordering for a check's execution history.

use crate::event::Check;

/// Status codes of prior executions, oldest first.
///
/// History arrives unordered; entries are sorted ascending by executed time
/// over a borrowed view, so the event itself is never touched. The sort is
/// stable: entries sharing a timestamp keep their input order. Timestamps
/// are the sort key only and do not appear in the result.
pub fn sorted_status_history(check: &Check) -> Vec<String> {
    let mut entries: Vec<_> = check.history.iter().collect();
    entries.sort_by_key(|entry| entry.executed);
    entries
        .into_iter()
        .map(|entry| entry.status.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::CheckHistory;

    fn check_with_history(history: Vec<CheckHistory>) -> Check {
        Check {
            name: "check1".to_string(),
            status: 1,
            output: String::new(),
            executed: 0,
            interval: 60,
            history,
        }
    }

    #[test]
    fn sorts_ascending_by_executed_time() {
        let check = check_with_history(vec![
            CheckHistory { status: 2, executed: 30 },
            CheckHistory { status: 0, executed: 10 },
            CheckHistory { status: 1, executed: 20 },
        ]);
        assert_eq!(sorted_status_history(&check), vec!["0", "1", "2"]);
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let check = check_with_history(vec![
            CheckHistory { status: 7, executed: 10 },
            CheckHistory { status: 8, executed: 10 },
            CheckHistory { status: 9, executed: 5 },
            CheckHistory { status: 6, executed: 10 },
        ]);
        assert_eq!(sorted_status_history(&check), vec!["9", "7", "8", "6"]);
    }

    #[test]
    fn leaves_the_event_history_untouched() {
        let check = check_with_history(vec![
            CheckHistory { status: 2, executed: 30 },
            CheckHistory { status: 0, executed: 10 },
        ]);
        let _ = sorted_status_history(&check);
        assert_eq!(check.history[0].executed, 30);
        assert_eq!(check.history[1].executed, 10);
    }

    #[test]
    fn empty_history_yields_empty_list() {
        let check = check_with_history(Vec::new());
        assert!(sorted_status_history(&check).is_empty());
    }
}
