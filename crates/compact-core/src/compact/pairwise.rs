/// Compact by pairing every element with its predecessor.
///
/// The first element is paired with `None`, which never equals `Some(_)`, so
/// it is always kept without needing a placeholder value of type `T`.
pub fn compact_pairwise<T: PartialEq + Clone>(items: &[T]) -> Vec<T> {
    pairwise_heads(items).map(|i| items[i].clone()).collect()
}

/// Indices of the elements [`compact_pairwise`] keeps.
///
/// Lets callers compare by a derived key slice and map the indices back to
/// the original items.
pub fn pairwise_heads<T: PartialEq>(items: &[T]) -> impl Iterator<Item = usize> + '_ {
    let predecessors = std::iter::once(None).chain(items.iter().map(Some));
    items
        .iter()
        .zip(predecessors)
        .enumerate()
        .filter(|&(_, (item, prev))| prev != Some(item))
        .map(|(i, _)| i)
}
