//! Borrowing LIFO used to walk a child list back to front.
//!
//! Mirrored rendering paints an `HList` from its last child to its first.
//! Pushing every child and popping them again yields that order without
//! cloning or mutating the typeset tree.

/// Stack of borrowed references.
///
/// Capacity is reserved once by [`Stack::with_capacity`]; pushing up to that
/// many items never reallocates.
#[derive(Debug)]
pub struct Stack<'a, T> {
    items: Vec<&'a T>,
}

impl<'a, T> Stack<'a, T> {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { items: Vec::with_capacity(capacity) }
    }

    pub fn push(&mut self, item: &'a T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<&'a T> {
        self.items.pop()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Drop every entry, keeping the allocation.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> Default for Stack<'_, T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<'a, T> Extend<&'a T> for Stack<'a, T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

#[cfg(test)]
#[path = "stack_test.rs"]
mod tests;
