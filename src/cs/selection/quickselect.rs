use log::{debug, trace};

use crate::cs::selection::partition::three_way_partition;
use crate::cs::selection::trace::{Complexity, NodeKind, RecursionNode, Step, StepKind, Trace};
use crate::cs::selection::{check_rank, InstrumentedSelect, Selection};

pub const NAME: &str = "QuickSelect";

pub const COMPLEXITY: Complexity = Complexity {
    best: "O(n)",
    average: "O(n)",
    worst: "O(n²)",
};

/// Hoare's quickselect with the first element as pivot.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickSelect;

impl InstrumentedSelect for QuickSelect {
    fn name(&self) -> &'static str {
        NAME
    }

    fn complexity(&self) -> Complexity {
        COMPLEXITY
    }

    fn select(&self, arr: &[i64], rank: usize) -> Selection {
        quickselect(arr, rank)
    }
}

/// Finds the `k`-th smallest element of `arr` (1-indexed) by always pivoting
/// on the first element, recording every step and recursive call.
///
/// There is no randomization: already sorted or reverse-sorted input makes
/// every partition peel off a single element and the run degrades to
/// quadratic time. That is the point of this engine, which exists as the
/// baseline median of medians is compared against.
///
/// # Panics
///
/// Panics if `arr` is empty or `k` is out of range.
///
/// # Examples
///
/// ```
/// use kselect::cs::selection::quickselect;
///
/// let selection = quickselect(&[7, 1, 3, 4, 6, 2, 5], 4);
/// assert_eq!(selection.value, 4);
/// assert_eq!(selection.tree.id, "qs_root");
/// ```
pub fn quickselect(arr: &[i64], k: usize) -> Selection {
    check_rank(arr, k);
    let mut ctx = Context {
        trace: Trace::new(),
        original_len: arr.len(),
    };
    let (value, tree) = select(arr, k, &mut ctx);
    Selection {
        value,
        steps: ctx.trace.into_steps(),
        tree,
    }
}

struct Context {
    trace: Trace,
    original_len: usize,
}

/// Outcome of one invocation.
enum Round {
    Found(i64),
    Descend {
        branch: &'static str,
        next: Vec<i64>,
        next_k: usize,
    },
}

/// Runs the invocations as a loop. Every invocation has at most one child, so
/// the nodes form a chain that is attached bottom-up once the value is known.
fn select(arr: &[i64], k: usize, ctx: &mut Context) -> (i64, RecursionNode) {
    let mut chain = Vec::new();
    let mut node = RecursionNode::new("qs_root", None, arr, k, 0, NodeKind::Main);
    let mut current = arr.to_vec();
    let mut k = k;

    let value = loop {
        match round(&current, k, &node, ctx) {
            Round::Found(value) => break value,
            Round::Descend {
                branch,
                next,
                next_k,
            } => {
                let child = RecursionNode::new(
                    node.child_id(branch),
                    Some(node.id.as_str()),
                    &next,
                    next_k,
                    node.depth + 1,
                    NodeKind::Main,
                );
                chain.push(std::mem::replace(&mut node, child));
                current = next;
                k = next_k;
            }
        }
    };

    node.result = Some(value);
    while let Some(mut parent) = chain.pop() {
        parent.attach(node);
        parent.result = Some(value);
        node = parent;
    }
    (value, node)
}

fn round(arr: &[i64], k: usize, node: &RecursionNode, ctx: &mut Context) -> Round {
    let depth = node.depth;
    ctx.trace.count_operation();
    trace!("quickselect {}: {} elements, k={}", node.id, arr.len(), k);

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
        return Round::Found(value);
    }

    let pivot = arr[0];
    ctx.trace.push(
        Step::new(
            StepKind::Extract,
            depth,
            format!("Choosing pivot {} (first element)", pivot),
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
    let n = ctx.original_len;

    if size_l < k && k <= size_l + size_e {
        ctx.trace.push(
            Step::new(
                StepKind::BoundaryDecision,
                depth,
                format!("k falls in E: the pivot {} is the answer", pivot),
                arr,
            )
            .with_pivot(pivot)
            .with_partition(&parts)
            .with_result(pivot),
        );
        ctx.trace.push(
            Step::new(
                StepKind::Result,
                depth,
                format!("Result found: {}", pivot),
                arr,
            )
            .with_result(pivot),
        );
        debug!("quickselect {}: pivot {} is the answer", node.id, pivot);
        return Round::Found(pivot);
    }

    let (branch, next, next_k, ignored, description) = if size_l >= k {
        (
            "left",
            parts.less,
            k,
            size_e + size_r,
            format!("|L| = {} >= k = {}: continuing in L", size_l, k),
        )
    } else {
        let new_k = k - size_l - size_e;
        (
            "right",
            parts.greater,
            new_k,
            size_l + size_e,
            format!("Continuing in R with k={}", new_k),
        )
    };

    let step = Step::new(StepKind::BoundaryDecision, depth, description, &next)
        .with_rank(next_k)
        .with_ignored(ignored, n);
    debug!(
        "quickselect {}: recursing {} into {} elements with k={} ({}% ignored)",
        node.id,
        branch,
        next.len(),
        next_k,
        step.ignored_percentage.unwrap_or(0)
    );
    ctx.trace.push(step);
    Round::Descend {
        branch,
        next,
        next_k,
    }
}
