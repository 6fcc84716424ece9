//! Instrumented k-th order statistic selection.
//!
//! Two engines compute the k-th smallest element (1-indexed) of an integer
//! sequence: the deterministic [`median_of_medians`] selector and the naive
//! first-element-pivot [`quickselect`]. Besides the value, each run returns
//! the ordered list of [`Step`]s it took and the [`RecursionNode`] tree of its
//! recursive calls, so that a front end can replay the search decision by
//! decision.

pub mod driver;
pub mod grouping;
pub mod median_of_medians;
pub mod partition;
pub mod quickselect;
pub mod trace;

pub use driver::{parse_sequence, run, Comparison, RunConfig, SelectionMode};
pub use median_of_medians::{median_of_medians, MedianOfMedians};
pub use partition::{three_way_partition, Partition};
pub use quickselect::{quickselect, QuickSelect};
pub use trace::{
    AlgorithmStats, Complexity, NodeKind, RecursionNode, Replay, Step, StepKind, Trace,
};

/// Outcome of one instrumented selection run.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// The k-th smallest element.
    pub value: i64,
    /// Every recorded step, in execution order.
    pub steps: Vec<Step>,
    /// Root of the recursion tree.
    pub tree: RecursionNode,
}

/// A selection algorithm that records its own execution.
pub trait InstrumentedSelect {
    fn name(&self) -> &'static str;

    fn complexity(&self) -> Complexity;

    /// Returns the `rank`-th smallest element of `arr` (1-indexed) together
    /// with the trace of the search.
    ///
    /// # Panics
    ///
    /// Panics if `arr` is empty or `rank` is not in `1..=arr.len()`.
    fn select(&self, arr: &[i64], rank: usize) -> Selection;

    fn stats(&self, selection: &Selection) -> AlgorithmStats {
        AlgorithmStats::from_steps(self.name(), self.complexity(), &selection.steps)
    }
}

fn check_rank(arr: &[i64], rank: usize) {
    assert!(!arr.is_empty(), "cannot select from an empty sequence");
    assert!(
        (1..=arr.len()).contains(&rank),
        "rank {} is out of bounds for {} elements",
        rank,
        arr.len()
    );
}
