/// The three buckets of a pivot partition, each in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<T> {
    pub less: Vec<T>,
    pub equal: Vec<T>,
    pub greater: Vec<T>,
}

impl<T> Partition<T> {
    /// Sizes of the less, equal and greater buckets.
    pub fn sizes(&self) -> (usize, usize, usize) {
        (self.less.len(), self.equal.len(), self.greater.len())
    }

    pub fn len(&self) -> usize {
        self.less.len() + self.equal.len() + self.greater.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Stable three-way partition of `arr` around `pivot`.
///
/// Every element is compared against the pivot exactly once and each
/// comparison adds one to `comparisons`. The pivot need not occur in `arr`;
/// the `equal` bucket is then empty.
///
/// # Examples
///
/// ```
/// use kselect::cs::selection::partition::three_way_partition;
///
/// let mut comparisons = 0;
/// let parts = three_way_partition(&[3, 1, 4, 1, 5], &3, &mut comparisons);
/// assert_eq!(parts.less, vec![1, 1]);
/// assert_eq!(parts.equal, vec![3]);
/// assert_eq!(parts.greater, vec![4, 5]);
/// assert_eq!(comparisons, 5);
/// ```
pub fn three_way_partition<T: Ord + Clone>(
    arr: &[T],
    pivot: &T,
    comparisons: &mut u64,
) -> Partition<T> {
    let mut less = Vec::new();
    let mut equal = Vec::new();
    let mut greater = Vec::new();
    for x in arr {
        *comparisons += 1;
        match x.cmp(pivot) {
            std::cmp::Ordering::Less => less.push(x.clone()),
            std::cmp::Ordering::Equal => equal.push(x.clone()),
            std::cmp::Ordering::Greater => greater.push(x.clone()),
        }
    }
    Partition { less, equal, greater }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_is_stable() {
        let arr = [(2, 'a'), (1, 'b'), (2, 'c'), (3, 'd'), (1, 'e')];
        let mut comparisons = 0;
        let parts = three_way_partition(&arr, &(2, 'b'), &mut comparisons);
        assert_eq!(parts.less, vec![(2, 'a'), (1, 'b'), (1, 'e')]);
        assert!(parts.equal.is_empty());
        assert_eq!(parts.greater, vec![(2, 'c'), (3, 'd')]);
        assert_eq!(comparisons, 5);
    }

    #[test]
    fn test_partition_with_duplicates() {
        let arr = [5, 3, 5, 9, 5, 1];
        let mut comparisons = 10;
        let parts = three_way_partition(&arr, &5, &mut comparisons);
        assert_eq!(parts.sizes(), (2, 3, 1));
        assert_eq!(parts.less, vec![3, 1]);
        assert_eq!(comparisons, 16);
        assert_eq!(parts.len(), arr.len());
    }

    #[test]
    fn test_partition_pivot_absent() {
        let mut comparisons = 0;
        let parts = three_way_partition(&[4, 8, 2], &5, &mut comparisons);
        assert_eq!(parts.sizes(), (2, 0, 1));
    }

    #[test]
    fn test_partition_empty() {
        let mut comparisons = 0;
        let parts: Partition<i64> = three_way_partition(&[], &0, &mut comparisons);
        assert!(parts.is_empty());
        assert_eq!(comparisons, 0);
    }
}
