use log::{debug, trace};

use crate::cs::selection::grouping::{
    lower_median, sort_group, sort_groups, split_into_groups, GROUP_SIZE,
};
use crate::cs::selection::partition::three_way_partition;
use crate::cs::selection::trace::{Complexity, NodeKind, RecursionNode, Step, StepKind, Trace};
use crate::cs::selection::{check_rank, InstrumentedSelect, Selection};

pub const NAME: &str = "Median of Medians";

pub const COMPLEXITY: Complexity = Complexity {
    best: "O(n)",
    average: "O(n)",
    worst: "O(n)",
};

/// Deterministic linear-time selection (Blum, Floyd, Pratt, Rivest, Tarjan).
#[derive(Debug, Clone, Copy, Default)]
pub struct MedianOfMedians;

impl InstrumentedSelect for MedianOfMedians {
    fn name(&self) -> &'static str {
        NAME
    }

    fn complexity(&self) -> Complexity {
        COMPLEXITY
    }

    fn select(&self, arr: &[i64], rank: usize) -> Selection {
        median_of_medians(arr, rank)
    }
}

/// Finds the `k`-th smallest element of `arr` (1-indexed) with the median of
/// medians algorithm, recording every step and recursive call.
///
/// The input is split into groups of five, the group medians are collected
/// and the engine recurses on them to find a pivot. That pivot is guaranteed
/// to have at least roughly 30% of the elements on each side, so the
/// partition it produces discards a constant fraction of the input on every
/// round and the total work stays linear.
///
/// # Arguments
///
/// * `arr` - The sequence to select from. It is not modified.
/// * `k` - Target rank, `1 <= k <= arr.len()`.
///
/// # Panics
///
/// Panics if `arr` is empty or `k` is out of range.
///
/// # Examples
///
/// ```
/// use kselect::cs::selection::{median_of_medians, StepKind};
///
/// let selection = median_of_medians(&[3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5], 6);
/// assert_eq!(selection.value, 4);
/// assert_eq!(selection.steps.last().map(|s| s.kind), Some(StepKind::Result));
/// assert_eq!(selection.tree.result, Some(4));
/// ```
///
/// # Complexity
///
/// * Time: O(n) in the worst case
/// * Space: O(n) for the buckets, plus the recorded trace
pub fn median_of_medians(arr: &[i64], k: usize) -> Selection {
    check_rank(arr, k);
    let mut ctx = Context {
        trace: Trace::new(),
        original_len: arr.len(),
    };
    let root = RecursionNode::new("root", None, arr, k, 0, NodeKind::Main);
    let (value, tree) = select(arr, k, root, &mut ctx);
    Selection {
        value,
        steps: ctx.trace.into_steps(),
        tree,
    }
}

struct Context {
    trace: Trace,
    /// Length of the top-level input; every ignored percentage refers to it.
    original_len: usize,
}

/// One invocation. `node` arrives with its id, parent, depth and kind set and
/// is returned with its result and children filled in.
fn select(
    arr: &[i64],
    k: usize,
    mut node: RecursionNode,
    ctx: &mut Context,
) -> (i64, RecursionNode) {
    let depth = node.depth;
    ctx.trace.count_operation();
    trace!(
        "median of medians {} ({}): {} elements, k={}",
        node.id,
        node.kind,
        arr.len(),
        k
    );

    if arr.len() == 1 {
        let value = arr[0];
        ctx.trace.push(
            Step::new(
                StepKind::Result,
                depth,
                format!("Only one element left: result is {}", value),
                arr,
            )
            .with_result(value),
        );
        node.result = Some(value);
        return (value, node);
    }

    if arr.len() <= GROUP_SIZE {
        let sorted = sort_group(arr, ctx.trace.comparisons_mut());
        ctx.trace.push(
            Step::new(
                StepKind::Sort,
                depth,
                format!("Small array (<= {}): sorting it directly", GROUP_SIZE),
                arr,
            )
            .with_groups(&[sorted.clone()]),
        );
        ctx.trace.push(
            Step::new(
                StepKind::Extract,
                depth,
                format!(
                    "Selecting element {} of the sorted array (index {})",
                    k,
                    k - 1
                ),
                &sorted,
            )
            .with_rank(k),
        );
        let value = sorted[k - 1];
        ctx.trace.push(
            Step::new(StepKind::Result, depth, format!("Result found: {}", value), &sorted)
                .with_result(value),
        );
        node.result = Some(value);
        return (value, node);
    }

    let groups = split_into_groups(arr, GROUP_SIZE);
    ctx.trace.push(
        Step::new(
            StepKind::Divide,
            depth,
            format!("Dividing into {} groups of up to {} elements", groups.len(), GROUP_SIZE),
            arr,
        )
        .with_groups(&groups),
    );

    let sorted_groups = sort_groups(&groups, ctx.trace.comparisons_mut());
    ctx.trace.push(
        Step::new(
            StepKind::Sort,
            depth,
            format!("Sorting each group ({} groups)", sorted_groups.len()),
            arr,
        )
        .with_groups(&sorted_groups),
    );

    let medians: Vec<i64> = sorted_groups.iter().map(|g| lower_median(g)).collect();
    ctx.trace.push(
        Step::new(
            StepKind::Extract,
            depth,
            format!("Extracting {} medians", medians.len()),
            arr,
        )
        .with_groups(&sorted_groups)
        .with_medians(&medians),
    );

    let medians_rank = medians.len().div_ceil(2);
    ctx.trace.push(
        Step::new(
            StepKind::Recurse,
            depth,
            format!(
                "Recursing on the {} medians with k={} to find the pivot",
                medians.len(),
                medians_rank
            ),
            &medians,
        )
        .with_medians(&medians)
        .with_rank(medians_rank),
    );
    let child = RecursionNode::new(
        node.child_id("medians"),
        Some(node.id.as_str()),
        &medians,
        medians_rank,
        depth + 1,
        NodeKind::Medians,
    );
    let (pivot, child) = select(&medians, medians_rank, child, ctx);
    node.attach(child);

    ctx.trace.push(
        Step::new(
            StepKind::Extract,
            depth,
            format!("Median of medians found: {}", pivot),
            arr,
        )
        .with_pivot(pivot),
    );

    let parts = three_way_partition(arr, &pivot, ctx.trace.comparisons_mut());
    ctx.trace.push(
        Step::new(
            StepKind::Partition,
            depth,
            format!("Partitioning around pivot {}", pivot),
            arr,
        )
        .with_pivot(pivot)
        .with_partition(&parts),
    );

    let (size_l, size_e, size_r) = parts.sizes();
    ctx.trace.push(
        Step::new(
            StepKind::BoundaryExplanation,
            depth,
            format!(
                "Checking boundary conditions: |L|={}, |E|={}, |R|={}, k={}",
                size_l, size_e, size_r, k
            ),
            arr,
        )
        .with_pivot(pivot)
        .with_partition(&parts)
        .with_rank(k),
    );

    let n = ctx.original_len;

    // The pivot occurs in `arr`, so `size_e >= 1` and `|L| == k - 1` always lands here.
    if size_l < k && k <= size_l + size_e {
        let step = Step::new(
            StepKind::BoundaryDecision,
            depth,
            if size_l == k - 1 {
                format!("|L| = k-1: the pivot {} is the answer", pivot)
            } else {
                format!("k falls among the copies of the pivot {}: it is the answer", pivot)
            },
            arr,
        )
        .with_pivot(pivot)
        .with_partition(&parts)
        .with_result(pivot)
        .with_ignored(size_e + size_r, n);
        debug!(
            "median of medians {}: pivot {} is the answer ({}% ignored)",
            node.id,
            pivot,
            step.ignored_percentage.unwrap_or(0)
        );
        ctx.trace.push(step);
        ctx.trace.push(
            Step::new(StepKind::Result, depth, format!("Result found: {}", pivot), arr)
                .with_result(pivot),
        );
        node.result = Some(pivot);
        return (pivot, node);
    }

    let (branch, next, next_k, ignored, description) = if size_l > k - 1 {
        (
            "left",
            parts.less.as_slice(),
            k,
            size_e + size_r,
            "|L| > k-1: continuing in L".to_string(),
        )
    } else {
        let new_k = k - size_l - size_e;
        (
            "right",
            parts.greater.as_slice(),
            new_k,
            size_l + size_e,
            format!("|L| < k-1: continuing in R with k={}", new_k),
        )
    };
    let step = Step::new(StepKind::BoundaryDecision, depth, description, next)
        .with_rank(next_k)
        .with_ignored(ignored, n);
    debug!(
        "median of medians {}: recursing {} into {} elements with k={} ({}% ignored)",
        node.id,
        branch,
        next.len(),
        next_k,
        step.ignored_percentage.unwrap_or(0)
    );
    ctx.trace.push(step);

    let child = RecursionNode::new(
        node.child_id(branch),
        Some(node.id.as_str()),
        next,
        next_k,
        depth,
        NodeKind::Main,
    );
    let (value, child) = select(next, next_k, child, ctx);
    node.attach(child);
    node.result = Some(value);
    (value, node)
}
