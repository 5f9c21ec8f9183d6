//! NodeList - a concrete list of page objects
//!
//! What `PageObject::all()` returns: one indexed clone per matched element,
//! computed once. Unlike the page object it came from, a `NodeList` does not
//! requery when the document changes (its items still do).

use std::cmp::Ordering;
use std::ops::{Bound, Index, RangeBounds};

#[derive(Debug, Clone, PartialEq)]
pub struct NodeList<T> {
    items: Vec<T>,
}

impl<T> NodeList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn map<R, F: FnMut(&T) -> R>(&self, f: F) -> Vec<R> {
        self.items.iter().map(f).collect()
    }

    pub fn filter<F: FnMut(&T) -> bool>(self, mut predicate: F) -> NodeList<T> {
        self.items.into_iter().filter(|item| predicate(item)).collect()
    }

    pub fn find<F: FnMut(&T) -> bool>(&self, mut predicate: F) -> Option<&T> {
        self.items.iter().find(|item| predicate(item))
    }

    pub fn position<F: FnMut(&T) -> bool>(&self, predicate: F) -> Option<usize> {
        self.items.iter().position(predicate)
    }

    /// Items in `range`, clamped to the list like `Array.prototype.slice`
    pub fn slice<R: RangeBounds<usize>>(self, range: R) -> NodeList<T> {
        let len = self.items.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(len);
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        }
        .min(len);

        self.items
            .into_iter()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect()
    }

    /// Stable sort
    pub fn sort_by<F: FnMut(&T, &T) -> Ordering>(mut self, compare: F) -> NodeList<T> {
        self.items.sort_by(compare);
        self
    }

    pub fn reverse(mut self) -> NodeList<T> {
        self.items.reverse();
        self
    }

    pub fn every<F: FnMut(&T) -> bool>(&self, predicate: F) -> bool {
        self.items.iter().all(predicate)
    }

    pub fn some<F: FnMut(&T) -> bool>(&self, predicate: F) -> bool {
        self.items.iter().any(predicate)
    }

    pub fn for_each<F: FnMut(&T)>(&self, f: F) {
        self.items.iter().for_each(f)
    }

    pub fn reduce<A, F: FnMut(A, &T) -> A>(&self, init: A, f: F) -> A {
        self.items.iter().fold(init, f)
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for NodeList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> FromIterator<T> for NodeList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for NodeList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a NodeList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> Index<usize> for NodeList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> From<Vec<T>> for NodeList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> NodeList<i32> {
        NodeList::new(vec![3, 1, 2])
    }

    #[test]
    fn test_basics() {
        let list = list();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0], 3);
        assert_eq!(list.get(3), None);
        assert_eq!(list.first(), Some(&3));
        assert_eq!(list.last(), Some(&2));
        assert!(NodeList::<i32>::default().is_empty());
    }

    #[test]
    fn test_slice_clamps() {
        assert_eq!(list().slice(1..).into_vec(), vec![1, 2]);
        assert_eq!(list().slice(..=0).into_vec(), vec![3]);
        assert_eq!(list().slice(1..10).into_vec(), vec![1, 2]);
        assert!(list().slice(5..).is_empty());
        assert!(list().slice(2..1).is_empty());
    }

    #[test]
    fn test_ordering() {
        assert_eq!(list().sort_by(|a, b| a.cmp(b)).into_vec(), vec![1, 2, 3]);
        assert_eq!(list().reverse().into_vec(), vec![2, 1, 3]);
    }

    #[test]
    fn test_callbacks() {
        let list = list();
        assert_eq!(list.map(|x| x * 2), vec![6, 2, 4]);
        assert_eq!(list.clone().filter(|&x| x > 1).into_vec(), vec![3, 2]);
        assert_eq!(list.find(|&x| x < 3), Some(&1));
        assert_eq!(list.position(|&x| x == 2), Some(2));
        assert!(list.every(|&x| x > 0));
        assert!(list.some(|&x| x == 1));
        assert_eq!(list.reduce(0, |acc, x| acc + x), 6);

        let mut sum = 0;
        list.for_each(|x| sum += x);
        assert_eq!(sum, 6);
        assert_eq!((&list).into_iter().count(), 3);
    }
}
