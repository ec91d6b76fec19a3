mod criteria;
mod cycle;
mod sort;

pub use criteria::{AllowPattern, CriteriaTable, PatternError};
pub use cycle::{CycleError, cycle_pairs, next_state};
pub use sort::{SortDirection, SortExpression, SortKey};
