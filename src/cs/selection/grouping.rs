/// Largest group median of medians ever sorts directly.
pub const GROUP_SIZE: usize = 5;

/// Splits `arr` into consecutive groups of `size` elements. The last group
/// holds the remainder and may be shorter.
pub fn split_into_groups<T: Clone>(arr: &[T], size: usize) -> Vec<Vec<T>> {
    assert!(size > 0, "group size must be positive");
    arr.chunks(size).map(<[T]>::to_vec).collect()
}

/// Stable insertion sort returning a sorted copy.
///
/// Only ever applied to groups of at most [`GROUP_SIZE`] elements, where a
/// plain comparison sort is constant time.
pub fn insertion_sort<T: Ord + Clone>(group: &[T]) -> Vec<T> {
    let mut sorted = group.to_vec();
    for i in 1..sorted.len() {
        let mut j = i;
        while j > 0 && sorted[j - 1] > sorted[j] {
            sorted.swap(j - 1, j);
            j -= 1;
        }
    }
    sorted
}

/// Accounted cost of sorting a group of `len` elements: `round(len * log2(len))`.
///
/// This is a bookkeeping approximation of the conceptual sorting cost, not a
/// count of the comparisons [`insertion_sort`] actually performs.
pub fn sort_cost(len: usize) -> u64 {
    if len < 2 {
        return 0;
    }
    let n = len as f64;
    (n * n.log2()).round() as u64
}

/// Sorts a small group and charges its accounted cost to `comparisons`.
pub fn sort_group<T: Ord + Clone>(group: &[T], comparisons: &mut u64) -> Vec<T> {
    debug_assert!(group.len() <= GROUP_SIZE, "small-group sort used on {} elements", group.len());
    *comparisons += sort_cost(group.len());
    insertion_sort(group)
}

/// Sorts every group independently, charging each one's accounted cost.
pub fn sort_groups<T: Ord + Clone>(groups: &[Vec<T>], comparisons: &mut u64) -> Vec<Vec<T>> {
    groups.iter().map(|g| sort_group(g, comparisons)).collect()
}

/// Lower median of a sorted, non-empty group: index `(len - 1) / 2`.
pub fn lower_median<T: Clone>(sorted: &[T]) -> T {
    sorted[(sorted.len() - 1) / 2].clone()
}
