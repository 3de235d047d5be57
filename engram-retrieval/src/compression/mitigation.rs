//! Context-ordering mitigation ("lost in the middle").
//!
//! Attention degrades toward the middle of a long context window; these
//! reorderings move the highest-ranked items toward the boundaries of
//! the block handed to the model.

use engram_core::config::MitigationStrategy;

/// Reorder a ranked list according to the mitigation strategy.
///
/// Input order is rank order, best first. Output order is placement
/// order for the context window.
pub fn reorder<T>(items: Vec<T>, strategy: MitigationStrategy) -> Vec<T> {
    match strategy {
        MitigationStrategy::None => items,
        MitigationStrategy::Edges => edges(items),
        MitigationStrategy::Interleave => interleave(items),
        MitigationStrategy::ReverseMiddle => reverse_middle(items),
    }
}

/// Best item first, second-best last, third second, alternating
/// front/back so the most relevant items sit at the boundaries.
fn edges<T>(items: Vec<T>) -> Vec<T> {
    let n = items.len();
    let mut slots: Vec<Option<T>> = (0..n).map(|_| None).collect();
    let mut front = 0;
    let mut back = n;
    for (rank, item) in items.into_iter().enumerate() {
        if rank % 2 == 0 {
            slots[front] = Some(item);
            front += 1;
        } else {
            back -= 1;
            slots[back] = Some(item);
        }
    }
    slots.into_iter().flatten().collect()
}

/// Alternate between the top half and the bottom half of the ranked list.
fn interleave<T>(items: Vec<T>) -> Vec<T> {
    let n = items.len();
    let mid = n.div_ceil(2);
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    let mut out = Vec::with_capacity(n);
    for i in 0..mid {
        if let Some(item) = slots[i].take() {
            out.push(item);
        }
        if let Some(item) = slots.get_mut(mid + i).and_then(Option::take) {
            out.push(item);
        }
    }
    out
}

/// Keep the first and last elements fixed, reverse everything between.
fn reverse_middle<T>(mut items: Vec<T>) -> Vec<T> {
    let n = items.len();
    if n > 3 {
        items[1..n - 1].reverse();
    }
    items
}
