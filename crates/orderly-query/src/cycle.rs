use crate::sort::SortExpression;

/// Cycle error for toggle resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleError {
    NoCandidates,
}

impl std::fmt::Display for CycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CycleError::NoCandidates => write!(f, "toggle cycle has no candidate orderings"),
        }
    }
}

impl std::error::Error for CycleError {}

/// Iterate consecutive pairs of `items`, closing the cycle with a final
/// `(last, first)` pair. A single item pairs with itself.
pub fn cycle_pairs<T>(items: &[T]) -> impl Iterator<Item = (&T, &T)> {
    let wrap = items.last().zip(items.first());
    items.windows(2).map(|w| (&w[0], &w[1])).chain(wrap)
}

/// Return the candidate following `current` in the cycle.
///
/// An empty `current`, or one that matches no candidate, resolves to the
/// first candidate, the starting state when no sort has been applied yet.
/// Matching is exact on the full composite expression; a reordered or
/// partial expression does not count.
///
/// An empty candidate list is a caller contract violation: the calling
/// layer must always supply at least one authored ordering state.
pub fn next_state<'a>(
    current: &SortExpression,
    candidates: &'a [SortExpression],
) -> Result<&'a SortExpression, CycleError> {
    let first = candidates.first().ok_or(CycleError::NoCandidates)?;
    if current.is_empty() {
        return Ok(first);
    }
    for (state, next) in cycle_pairs(candidates) {
        if state == current {
            return Ok(next);
        }
    }
    Ok(first)
}
