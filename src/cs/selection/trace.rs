//! Step log and recursion tree shared by the selection engines.
//!
//! Both engines record into a single [`Trace`] owned by the top-level call and
//! passed by mutable reference into every recursive frame. The trace carries
//! the running comparison and operation counters, so a step recorded after a
//! recursive call automatically reflects the work that call performed.
//!
//! Every sequence stored here is an owned copy taken when the record is
//! created. Later work on the live sequence can never change history.

use std::fmt;

use crate::cs::selection::partition::Partition;

/// The kind of algorithmic event a [`Step`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Divide,
    Sort,
    Extract,
    Partition,
    BoundaryExplanation,
    BoundaryDecision,
    Recurse,
    Result,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Divide => "divide",
            StepKind::Sort => "sort",
            StepKind::Extract => "extract",
            StepKind::Partition => "partition",
            StepKind::BoundaryExplanation => "boundary-explanation",
            StepKind::BoundaryDecision => "boundary-decision",
            StepKind::Recurse => "recurse",
            StepKind::Result => "result",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the replay log.
///
/// Common fields are always present. The optional fields are filled only for
/// the kinds that produce them: `groups` for divide/sort, `medians` for the
/// median extraction, `partition` for partition and boundary steps, and so on.
/// `comparisons` and `operations` are stamped by [`Trace::push`].
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub kind: StepKind,
    pub description: String,
    pub snapshot: Vec<i64>,
    pub depth: usize,
    pub comparisons: u64,
    pub operations: u64,
    pub groups: Option<Vec<Vec<i64>>>,
    pub medians: Option<Vec<i64>>,
    pub pivot: Option<i64>,
    pub partition: Option<Partition<i64>>,
    pub rank: Option<usize>,
    pub result: Option<i64>,
    pub ignored_percentage: Option<u8>,
    pub original_len: Option<usize>,
}

impl Step {
    pub fn new<S: Into<String>>(
        kind: StepKind,
        depth: usize,
        description: S,
        snapshot: &[i64],
    ) -> Self {
        Step {
            kind,
            description: description.into(),
            snapshot: snapshot.to_vec(),
            depth,
            comparisons: 0,
            operations: 0,
            groups: None,
            medians: None,
            pivot: None,
            partition: None,
            rank: None,
            result: None,
            ignored_percentage: None,
            original_len: None,
        }
    }

    pub fn with_groups(mut self, groups: &[Vec<i64>]) -> Self {
        self.groups = Some(groups.to_vec());
        self
    }

    pub fn with_medians(mut self, medians: &[i64]) -> Self {
        self.medians = Some(medians.to_vec());
        self
    }

    pub fn with_pivot(mut self, pivot: i64) -> Self {
        self.pivot = Some(pivot);
        self
    }

    pub fn with_partition(mut self, partition: &Partition<i64>) -> Self {
        self.partition = Some(partition.clone());
        self
    }

    pub fn with_rank(mut self, rank: usize) -> Self {
        self.rank = Some(rank);
        self
    }

    pub fn with_result(mut self, result: i64) -> Self {
        self.result = Some(result);
        self
    }

    /// Records that `ignored` elements of an input of `original_len` elements
    /// were excluded by this step.
    pub fn with_ignored(mut self, ignored: usize, original_len: usize) -> Self {
        self.ignored_percentage = Some(ignored_percentage(ignored, original_len));
        self.original_len = Some(original_len);
        self
    }

    /// Sizes of the less, equal and greater buckets, if this step carries a partition.
    pub fn bucket_sizes(&self) -> Option<(usize, usize, usize)> {
        self.partition.as_ref().map(Partition::sizes)
    }
}

/// `round(100 * ignored / total)`, rounding halves up, clamped to 100.
pub fn ignored_percentage(ignored: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let ignored = ignored.min(total) as u64;
    let total = total as u64;
    ((200 * ignored + total) / (2 * total)) as u8
}

/// Append-only step log plus the running counters of one top-level run.
#[derive(Debug, Default)]
pub struct Trace {
    steps: Vec<Step>,
    comparisons: u64,
    operations: u64,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step, stamping it with the current counter values.
    pub fn push(&mut self, mut step: Step) {
        step.comparisons = self.comparisons;
        step.operations = self.operations;
        self.steps.push(step);
    }

    /// Counts one primitive operation (one engine invocation).
    pub fn count_operation(&mut self) {
        self.operations += 1;
    }

    /// Mutable access to the comparison counter for the partition and
    /// grouping utilities.
    pub fn comparisons_mut(&mut self) -> &mut u64 {
        &mut self.comparisons
    }

    pub fn comparisons(&self) -> u64 {
        self.comparisons
    }

    pub fn operations(&self) -> u64 {
        self.operations
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

/// Distinguishes ordinary selection calls from the pivot-finding sub-call
/// median of medians makes on its list of group medians.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Main,
    Medians,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Main => f.write_str("main"),
            NodeKind::Medians => f.write_str("medians"),
        }
    }
}

/// One recursive invocation of a selection engine.
///
/// Children are owned; `parent` is only the id of the enclosing node.
#[derive(Debug, Clone, PartialEq)]
pub struct RecursionNode {
    pub id: String,
    pub snapshot: Vec<i64>,
    pub rank: usize,
    pub depth: usize,
    pub result: Option<i64>,
    pub children: Vec<RecursionNode>,
    pub parent: Option<String>,
    pub kind: NodeKind,
    pub description: String,
}

impl RecursionNode {
    pub fn new<S: Into<String>>(
        id: S,
        parent: Option<&str>,
        sequence: &[i64],
        rank: usize,
        depth: usize,
        kind: NodeKind,
    ) -> Self {
        let label = match kind {
            NodeKind::Main => "Main",
            NodeKind::Medians => "Medians",
        };
        RecursionNode {
            id: id.into(),
            snapshot: sequence.to_vec(),
            rank,
            depth,
            result: None,
            children: Vec::new(),
            parent: parent.map(str::to_owned),
            kind,
            description: format!("{}: array[{}], k={}", label, sequence.len(), rank),
        }
    }

    /// Id for a child reached through `branch` (`medians`, `left` or `right`).
    pub fn child_id(&self, branch: &str) -> String {
        format!("{}_{}", self.id, branch)
    }

    pub fn attach(&mut self, child: RecursionNode) {
        self.children.push(child);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The child of the given kind, if any.
    pub fn child(&self, kind: NodeKind) -> Option<&RecursionNode> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// Pre-order traversal of this subtree, root first.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    pub fn find(&self, id: &str) -> Option<&RecursionNode> {
        self.iter().find(|n| n.id == id)
    }

    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            height = height.max(level);
            stack.extend(node.children.iter().map(|c| (c, level + 1)));
        }
        height
    }
}

// Quickselect chains can be thousands of nodes deep; unlink them without
// recursing.
impl Drop for RecursionNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

pub struct Iter<'a> {
    stack: Vec<&'a RecursionNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a RecursionNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Static asymptotic cost of an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Complexity {
    pub best: &'static str,
    pub average: &'static str,
    pub worst: &'static str,
}

/// Summary of one finished run, read off its last step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmStats {
    pub name: String,
    pub steps: usize,
    pub comparisons: u64,
    pub operations: u64,
    pub complexity: Complexity,
}

impl AlgorithmStats {
    pub fn from_steps(name: &str, complexity: Complexity, steps: &[Step]) -> Self {
        let (comparisons, operations) = steps
            .last()
            .map(|s| (s.comparisons, s.operations))
            .unwrap_or((0, 0));
        AlgorithmStats {
            name: name.to_owned(),
            steps: steps.len(),
            comparisons,
            operations,
            complexity,
        }
    }
}

/// Read-only cursor for stepping through a recorded run.
#[derive(Debug, Clone)]
pub struct Replay<'a> {
    steps: &'a [Step],
    position: usize,
}

impl<'a> Replay<'a> {
    pub fn new(steps: &'a [Step]) -> Self {
        Replay { steps, position: 0 }
    }

    pub fn current(&self) -> Option<&'a Step> {
        self.steps.get(self.position)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_at_end(&self) -> bool {
        self.position + 1 >= self.steps.len()
    }

    /// Moves one step forward. Stays put at the last step.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&'a Step> {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.current()
    }

    /// Moves one step back. Stays put at the first step.
    pub fn prev(&mut self) -> Option<&'a Step> {
        self.position = self.position.saturating_sub(1);
        self.current()
    }

    pub fn jump_to_end(&mut self) -> Option<&'a Step> {
        self.position = self.steps.len().saturating_sub(1);
        self.current()
    }

    pub fn rewind(&mut self) {
        self.position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_stamps_running_counters() {
        let mut trace = Trace::new();
        trace.count_operation();
        trace.push(Step::new(StepKind::Divide, 0, "start", &[3, 1, 2]));
        *trace.comparisons_mut() += 4;
        trace.count_operation();
        trace.push(Step::new(StepKind::Result, 1, "done", &[1]).with_result(1));

        let steps = trace.steps();
        assert_eq!((steps[0].comparisons, steps[0].operations), (0, 1));
        assert_eq!((steps[1].comparisons, steps[1].operations), (4, 2));
        assert_eq!((trace.comparisons(), trace.operations()), (4, 2));
        assert_eq!(trace.len(), 2);
        assert!(!trace.is_empty());
        assert!(Trace::new().is_empty());
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut live = vec![5, 4, 3];
        let step = Step::new(StepKind::Partition, 0, "partition", &live);
        live[0] = 100;
        live.push(7);
        assert_eq!(step.snapshot, vec![5, 4, 3]);
    }

    #[test]
    fn test_ignored_percentage_rounding() {
        assert_eq!(ignored_percentage(0, 11), 0);
        assert_eq!(ignored_percentage(11, 11), 100);
        assert_eq!(ignored_percentage(1, 8), 13);
        assert_eq!(ignored_percentage(1, 200), 1);
        assert_eq!(ignored_percentage(1, 3), 33);
        assert_eq!(ignored_percentage(2, 3), 67);
        assert_eq!(ignored_percentage(5, 0), 0);
    }

    #[test]
    fn test_tree_iteration_is_preorder() {
        let mut root = RecursionNode::new("root", None, &[1, 2, 3], 2, 0, NodeKind::Main);
        let medians_id = root.child_id("medians");
        let mut medians =
            RecursionNode::new(medians_id, Some("root"), &[2], 1, 1, NodeKind::Medians);
        medians.result = Some(2);
        let left_id = root.child_id("left");
        let mut left = RecursionNode::new(left_id, Some("root"), &[1], 1, 0, NodeKind::Main);
        left.result = Some(1);
        root.attach(medians);
        root.attach(left);

        let ids: Vec<&str> = root.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "root_medians", "root_left"]);
        assert_eq!(root.height(), 2);
        assert_eq!(root.node_count(), 3);
        assert_eq!(root.child(NodeKind::Medians).map(|n| n.depth), Some(1));
        assert_eq!(root.find("root_left").and_then(|n| n.parent.as_deref()), Some("root"));
        assert_eq!(root.description, "Main: array[3], k=2");
    }

    #[test]
    fn test_deep_chain_height_and_drop() {
        let mut node = RecursionNode::new("leaf", None, &[1], 1, 0, NodeKind::Main);
        for depth in 1..100_000 {
            let mut parent = RecursionNode::new(depth.to_string(), None, &[], 1, 0, NodeKind::Main);
            parent.attach(node);
            node = parent;
        }
        assert_eq!(node.height(), 100_000);
        assert_eq!(node.iter().last().map(|n| n.id.as_str()), Some("leaf"));
        drop(node);
    }

    #[test]
    fn test_stats_read_last_step() {
        let complexity = Complexity { best: "O(n)", average: "O(n)", worst: "O(n)" };
        let mut trace = Trace::new();
        trace.push(Step::new(StepKind::Divide, 0, "a", &[1]));
        *trace.comparisons_mut() += 9;
        trace.count_operation();
        trace.push(Step::new(StepKind::Result, 0, "b", &[1]));
        let stats = AlgorithmStats::from_steps("Test", complexity, trace.steps());
        assert_eq!(stats.steps, 2);
        assert_eq!(stats.comparisons, 9);
        assert_eq!(stats.operations, 1);

        let empty = AlgorithmStats::from_steps("Empty", complexity, &[]);
        assert_eq!((empty.steps, empty.comparisons), (0, 0));
    }

    #[test]
    fn test_replay_walks_without_overrunning() {
        let steps: Vec<Step> = (0..3)
            .map(|i| Step::new(StepKind::Extract, 0, format!("step {}", i), &[i]))
            .collect();
        let mut replay = Replay::new(&steps);
        assert_eq!(replay.current().map(|s| s.snapshot[0]), Some(0));
        assert_eq!(replay.prev().map(|s| s.snapshot[0]), Some(0));
        replay.next();
        assert_eq!(replay.next().map(|s| s.snapshot[0]), Some(2));
        assert!(replay.is_at_end());
        assert_eq!(replay.next().map(|s| s.snapshot[0]), Some(2));
        replay.rewind();
        assert_eq!(replay.position(), 0);
        assert_eq!(replay.jump_to_end().map(|s| s.snapshot[0]), Some(2));
    }
}
