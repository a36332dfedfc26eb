//! Utility functions and types used across the library

/// Iterator over maximal runs of consecutive indices for which predicate holds
///
/// Yields inclusive `(start, end)` pairs in increasing order.
pub struct Runs<'a, T, F> {
    items: &'a [T],
    index: usize,
    pred: F,
}

impl<'a, T, F> Runs<'a, T, F>
where
    F: FnMut(&T) -> bool,
{
    pub fn new(items: &'a [T], pred: F) -> Self {
        Self {
            items,
            index: 0,
            pred,
        }
    }
}

impl<T, F> Iterator for Runs<'_, T, F>
where
    F: FnMut(&T) -> bool,
{
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.items[self.index..]
            .iter()
            .position(|item| (self.pred)(item))?;
        let start = self.index + offset;
        let len = self.items[start..]
            .iter()
            .position(|item| !(self.pred)(item))
            .unwrap_or(self.items.len() - start);
        self.index = start + len;
        Some((start, self.index - 1))
    }
}
