/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa. Used to resolve state names to handles.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;

/// Counts how often each item occurs in `iter` and returns the items which occur more than once,
/// in ascending order.
pub fn duplicates<T, I>(iter: I) -> Vec<T>
where
    T: std::hash::Hash + Eq + Ord + Clone,
    I: IntoIterator<Item = T>,
{
    let mut counts: Map<T, usize> = Map::default();
    for item in iter {
        *counts.entry(item).or_insert(0) += 1;
    }
    let mut out: Vec<T> = counts
        .into_iter()
        .filter_map(|(item, count)| (count > 1).then_some(item))
        .collect();
    out.sort();
    out
}

#[cfg(test)]
mod tests {
    use super::duplicates;

    #[test]
    fn duplicates_are_sorted_and_unique() {
        assert_eq!(duplicates(['b', 'a', 'b', 'c', 'a', 'b']), vec!['a', 'b']);
        assert!(duplicates(Vec::<char>::new()).is_empty());
        assert!(duplicates(['x', 'y']).is_empty());
    }
}
