//! Thread-per-item execution with deterministically ordered output.
//!
//! One thread per batch item, unbounded (implicitly bounded by argument
//! count). Workers hand their result back through a channel keyed by the
//! item's original index; a single collector drains the channel and emits
//! results strictly in index order, so batch output is deterministic no
//! matter which download finishes first.

use std::collections::HashMap;
use std::sync::mpsc;

/// Runs `worker` once per item on its own thread and invokes `emit` for every
/// outcome in strictly increasing index order. Every item is always attempted;
/// a failing worker only affects its own slot.
pub fn run_ordered<T, W, E>(items: &[String], worker: W, mut emit: E)
where
    T: Send,
    W: Fn(usize, &str) -> T + Sync,
    E: FnMut(usize, &str, T),
{
    let (tx, rx) = mpsc::channel::<(usize, T)>();
    std::thread::scope(|scope| {
        for (index, name) in items.iter().enumerate() {
            let tx = tx.clone();
            let worker = &worker;
            scope.spawn(move || {
                let outcome = worker(index, name.as_str());
                // The collector hanging up early is not a worker error.
                let _ = tx.send((index, outcome));
            });
        }
        drop(tx);

        let mut pending: HashMap<usize, T> = HashMap::new();
        let mut next = 0usize;
        for (index, outcome) in rx {
            pending.insert(index, outcome);
            while let Some(ready) = pending.remove(&next) {
                emit(next, &items[next], ready);
                next += 1;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_emit_order_matches_input_order() {
        // First item is artificially slow, last is instant; emission order
        // must still follow the input.
        let items: Vec<String> = (0..8).map(|i| format!("item{i}")).collect();
        let mut seen = Vec::new();
        run_ordered(
            &items,
            |index, _name| {
                if index == 0 {
                    std::thread::sleep(Duration::from_millis(150));
                }
                index
            },
            |index, name, outcome| {
                assert_eq!(index, outcome);
                seen.push(name.to_string());
            },
        );
        assert_eq!(seen, items);
    }

    #[test]
    fn test_every_item_attempted_despite_failures() {
        let items: Vec<String> = (0..5).map(|i| format!("item{i}")).collect();
        let mut outcomes = Vec::new();
        run_ordered(
            &items,
            |index, _name| if index % 2 == 0 { Err(index) } else { Ok(index) },
            |_, _, outcome: Result<usize, usize>| outcomes.push(outcome),
        );
        assert_eq!(outcomes.len(), items.len());
        assert_eq!(outcomes.iter().filter(|o| o.is_err()).count(), 3);
    }

    #[test]
    fn test_empty_batch_emits_nothing() {
        let mut count = 0;
        run_ordered(&[], |_, _| (), |_, _, _| count += 1);
        assert_eq!(count, 0);
    }
}
