//! Doubly-Linked Chain
//!
//! `Chain<T>` is the one sequence container everything else in Tally is built
//! from: a number's digit string is a chain of bytes, and the operand stack is
//! a chain of numbers. The machine leans on two properties a `Vec` cannot give
//! it at the same time:
//!
//! - O(1) insertion/removal at an interior position (via [`CursorMut`])
//! - O(1) splice of one chain's entire contents onto the end of another
//!   (via [`Chain::append`]), transferring node ownership without copying
//!
//! The pointer surgery lives behind a safe API. All links are `NonNull` node
//! pointers owned exclusively by one chain; the borrow checker enforces that a
//! cursor (the "handle" into the chain) cannot outlive or alias its chain.
//!
//! Teardown is iterative. A number can have arbitrarily many digits, so a
//! recursive drop would overflow the call stack on long chains.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

struct Node<T> {
    value: T,
    prev: Option<NonNull<Node<T>>>,
    next: Option<NonNull<Node<T>>>,
}

impl<T> Node<T> {
    fn new(value: T) -> NonNull<Node<T>> {
        NonNull::from(Box::leak(Box::new(Node {
            value,
            prev: None,
            next: None,
        })))
    }
}

/// An owned doubly-linked sequence.
///
/// Invariants (upheld by every operation):
/// - the chain is acyclic and doubly consistent: `node.next.prev == node`
///   and `node.prev.next == node` for every interior link
/// - `head`/`tail` exactly bound the chain; both are `None` iff it is empty
/// - `len` matches the number of reachable nodes
pub struct Chain<T> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    len: usize,
    marker: PhantomData<Box<Node<T>>>,
}

// Safety: Chain owns its nodes exclusively; no interior mutability, no
// sharing. It is Send/Sync exactly when a Box<T> chain would be.
unsafe impl<T: Send> Send for Chain<T> {}
unsafe impl<T: Sync> Sync for Chain<T> {}

impl<T> Chain<T> {
    /// Create an empty chain.
    pub const fn new() -> Self {
        Chain {
            head: None,
            tail: None,
            len: 0,
            marker: PhantomData,
        }
    }

    /// Number of elements, maintained on every mutation.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert at the front (the chain's head).
    pub fn push_front(&mut self, value: T) {
        let mut node = Node::new(value);
        unsafe {
            node.as_mut().next = self.head;
            match self.head {
                Some(mut head) => head.as_mut().prev = Some(node),
                None => self.tail = Some(node),
            }
        }
        self.head = Some(node);
        self.len += 1;
    }

    /// Insert at the back (the chain's tail).
    pub fn push_back(&mut self, value: T) {
        let mut node = Node::new(value);
        unsafe {
            node.as_mut().prev = self.tail;
            match self.tail {
                Some(mut tail) => tail.as_mut().next = Some(node),
                None => self.head = Some(node),
            }
        }
        self.tail = Some(node);
        self.len += 1;
    }

    /// Remove and return the front element.
    pub fn pop_front(&mut self) -> Option<T> {
        self.head.map(|node| unsafe { self.unlink(node) })
    }

    /// Remove and return the back element.
    pub fn pop_back(&mut self) -> Option<T> {
        self.tail.map(|node| unsafe { self.unlink(node) })
    }

    pub fn front(&self) -> Option<&T> {
        self.head.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.head.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.tail.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Splice all of `other`'s elements onto the end of `self` in O(1).
    ///
    /// Ownership of every node transfers to `self`; `other` is left empty.
    /// No element is copied or reallocated.
    pub fn append(&mut self, other: &mut Chain<T>) {
        match self.tail {
            None => std::mem::swap(self, other),
            Some(mut tail) => {
                if let Some(mut other_head) = other.head.take() {
                    unsafe {
                        tail.as_mut().next = Some(other_head);
                        other_head.as_mut().prev = Some(tail);
                    }
                    self.tail = other.tail.take();
                    self.len += other.len;
                    other.len = 0;
                }
            }
        }
    }

    /// Iterate front-to-back; the iterator is double-ended.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            head: self.head,
            tail: self.tail,
            len: self.len,
            marker: PhantomData,
        }
    }

    /// Iterate front-to-back with mutable access; double-ended.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            head: self.head,
            tail: self.tail,
            len: self.len,
            marker: PhantomData,
        }
    }

    /// Cursor positioned at the front element (ghost position if empty).
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        let cur = self.head;
        CursorMut { chain: self, cur }
    }

    /// Cursor positioned at the back element (ghost position if empty).
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T> {
        let cur = self.tail;
        CursorMut { chain: self, cur }
    }

    /// Unlink `node` from the chain and return its value.
    ///
    /// # Safety
    /// `node` must belong to this chain.
    unsafe fn unlink(&mut self, node: NonNull<Node<T>>) -> T {
        let node = unsafe { Box::from_raw(node.as_ptr()) };
        match node.prev {
            Some(mut prev) => unsafe { prev.as_mut().next = node.next },
            None => self.head = node.next,
        }
        match node.next {
            Some(mut next) => unsafe { next.as_mut().prev = node.prev },
            None => self.tail = node.prev,
        }
        self.len -= 1;
        node.value
    }

    /// Link a fresh node holding `value` immediately after `anchor`.
    ///
    /// # Safety
    /// `anchor` must belong to this chain.
    unsafe fn link_after(&mut self, mut anchor: NonNull<Node<T>>, value: T) {
        let mut node = Node::new(value);
        unsafe {
            let next = anchor.as_ref().next;
            node.as_mut().prev = Some(anchor);
            node.as_mut().next = next;
            anchor.as_mut().next = Some(node);
            match next {
                Some(mut next) => next.as_mut().prev = Some(node),
                None => self.tail = Some(node),
            }
        }
        self.len += 1;
    }

    /// Link a fresh node holding `value` immediately before `anchor`.
    ///
    /// # Safety
    /// `anchor` must belong to this chain.
    unsafe fn link_before(&mut self, mut anchor: NonNull<Node<T>>, value: T) {
        let mut node = Node::new(value);
        unsafe {
            let prev = anchor.as_ref().prev;
            node.as_mut().next = Some(anchor);
            node.as_mut().prev = prev;
            anchor.as_mut().prev = Some(node);
            match prev {
                Some(mut prev) => prev.as_mut().next = Some(node),
                None => self.head = Some(node),
            }
        }
        self.len += 1;
    }
}

impl<T> Drop for Chain<T> {
    fn drop(&mut self) {
        // Iterative: a recursive teardown overflows on long digit chains.
        let mut cur = self.head;
        while let Some(node) = cur {
            let node = unsafe { Box::from_raw(node.as_ptr()) };
            cur = node.next;
        }
    }
}

impl<T> Default for Chain<T> {
    fn default() -> Self {
        Chain::new()
    }
}

impl<T: Clone> Clone for Chain<T> {
    /// Deep copy, preserving order. O(n), iterative.
    fn clone(&self) -> Self {
        let mut out = Chain::new();
        for value in self.iter() {
            out.push_back(value.clone());
        }
        out
    }
}

impl<T: fmt::Debug> fmt::Debug for Chain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for Chain<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for Chain<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut out = Chain::new();
        out.extend(iter);
        out
    }
}

/// Shared iterator over a chain, front-to-back.
pub struct Iter<'a, T> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    len: usize,
    marker: PhantomData<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.head.map(|node| unsafe {
            let node = &*node.as_ptr();
            self.head = node.next;
            self.len -= 1;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.tail.map(|node| unsafe {
            let node = &*node.as_ptr();
            self.tail = node.prev;
            self.len -= 1;
            &node.value
        })
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Mutable iterator over a chain, front-to-back.
pub struct IterMut<'a, T> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    len: usize,
    marker: PhantomData<&'a mut Node<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        self.head.map(|node| unsafe {
            let node = &mut *node.as_ptr();
            self.head = node.next;
            self.len -= 1;
            &mut node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        self.tail.map(|node| unsafe {
            let node = &mut *node.as_ptr();
            self.tail = node.prev;
            self.len -= 1;
            &mut node.value
        })
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

impl<'a, T> IntoIterator for &'a Chain<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// A mutable position inside a chain: the safe stand-in for a raw node handle.
///
/// The cursor points either at one element or at the "ghost" position past
/// both ends (always the case for an empty chain). Because it holds the
/// chain's unique mutable borrow, a handle can never outlive its chain or be
/// replayed against a different one.
pub struct CursorMut<'a, T> {
    chain: &'a mut Chain<T>,
    cur: Option<NonNull<Node<T>>>,
}

impl<'a, T> CursorMut<'a, T> {
    /// The element under the cursor, or `None` at the ghost position.
    pub fn current(&mut self) -> Option<&mut T> {
        self.cur.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Move toward the back; from the ghost position, to the front element.
    pub fn move_next(&mut self) {
        self.cur = match self.cur {
            Some(node) => unsafe { node.as_ref().next },
            None => self.chain.head,
        };
    }

    /// Move toward the front; from the ghost position, to the back element.
    pub fn move_prev(&mut self) {
        self.cur = match self.cur {
            Some(node) => unsafe { node.as_ref().prev },
            None => self.chain.tail,
        };
    }

    /// Insert immediately after the cursor; at the ghost position this
    /// inserts at the front (on an empty chain, the sole element).
    pub fn insert_after(&mut self, value: T) {
        match self.cur {
            Some(anchor) => unsafe { self.chain.link_after(anchor, value) },
            None => self.chain.push_front(value),
        }
    }

    /// Insert immediately before the cursor; at the ghost position this
    /// inserts at the back (on an empty chain, the sole element).
    pub fn insert_before(&mut self, value: T) {
        match self.cur {
            Some(anchor) => unsafe { self.chain.link_before(anchor, value) },
            None => self.chain.push_back(value),
        }
    }

    /// Unlink and return the element under the cursor, advancing the cursor
    /// to its successor (ghost if it was the back element). Returns `None`
    /// at the ghost position.
    pub fn remove_current(&mut self) -> Option<T> {
        self.cur.map(|node| unsafe {
            self.cur = node.as_ref().next;
            self.chain.unlink(node)
        })
    }
}
