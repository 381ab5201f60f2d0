use std::collections::HashMap;
use std::hash::Hash;

use crate::stats::types::Popular;

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Counts occurrences of each value.
///
/// Sorted by descending count; equal counts keep the order in which the
/// values were first seen.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut seen: HashMap<T, (usize, usize)> = HashMap::new();
    for (position, value) in values.into_iter().enumerate() {
        seen.entry(value).or_insert((position, 0)).1 += 1;
    }

    let mut counts: Vec<(usize, T, usize)> = seen
        .into_iter()
        .map(|(value, (first, count))| (first, value, count))
        .collect();
    counts.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));

    counts
        .into_iter()
        .map(|(_, value, count)| (value, count))
        .collect()
}

/// The mode of `values`, ties going to the first-encountered value.
pub fn most_frequent<T, I>(values: I) -> Option<Popular<T>>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    value_counts(values)
        .into_iter()
        .next()
        .map(|(value, count)| Popular { value, count })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 3.0, 6.0]), 3.0);
    }

    #[test]
    fn test_value_counts_order() {
        let counts = value_counts(["b", "a", "c", "a", "c", "d"]);
        assert_eq!(counts, vec![("a", 2), ("c", 2), ("b", 1), ("d", 1)]);
    }

    #[test]
    fn test_most_frequent_tie_goes_to_first_seen() {
        let top = most_frequent(["x", "y", "y", "x"]).unwrap();
        assert_eq!(top.value, "x");
        assert_eq!(top.count, 2);

        let top = most_frequent([3, 1, 1, 3, 2]).unwrap();
        assert_eq!(top.value, 3);
    }

    #[test]
    fn test_most_frequent_empty() {
        assert_eq!(most_frequent(Vec::<u32>::new()), None);
    }
}
