//! Sequence helpers shared by the aggregate queries.

/// Aligns parallel lists by position.
///
/// Group `i` holds the `i`-th element of every list, or `None` where a list
/// is shorter. There are as many groups as the longest list has elements.
pub fn zip_longest<T: Clone>(lists: &[&[T]]) -> Vec<Vec<Option<T>>> {
    let len = lists.iter().map(|list| list.len()).max().unwrap_or(0);
    (0..len)
        .map(|index| lists.iter().map(|list| list.get(index).cloned()).collect())
        .collect()
}

/// Returns the shared value of `items` under `same`.
///
/// Missing members are skipped. Returns `None` when nothing is present or
/// when any present member differs from the first one.
pub fn uniform_value<'a, T, I, F>(items: I, same: F) -> Option<&'a T>
where
    I: IntoIterator<Item = Option<&'a T>>,
    F: Fn(&T, &T) -> bool,
{
    let mut present = items.into_iter().flatten();
    let first = present.next()?;
    present.all(|item| same(first, item)).then_some(first)
}
