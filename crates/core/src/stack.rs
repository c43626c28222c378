//! Operand Stack
//!
//! A stack of [`Number`]s backed by a [`Chain`], accessed from the tail end
//! (top of stack) plus indexed peeks for the machine's pick instruction.
//!
//! Underflow is a precondition violation in the machine's instruction set,
//! not a recoverable condition: popping or peeking past the bottom panics
//! with a named operation so broken programs fail fast instead of silently
//! corrupting state.

use crate::chain::Chain;
use crate::number::Number;

/// Stack of numbers. Depth 0 is the top.
#[derive(Debug, Default)]
pub struct OperandStack {
    items: Chain<Number>,
}

impl OperandStack {
    pub fn new() -> Self {
        OperandStack {
            items: Chain::new(),
        }
    }

    /// Current depth, O(1) via the chain's maintained length.
    pub fn depth(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Push onto the top. O(1).
    pub fn push(&mut self, number: Number) {
        self.items.push_back(number);
    }

    /// Pop the top element. O(1).
    ///
    /// # Panics
    /// On an empty stack.
    pub fn pop(&mut self) -> Number {
        self.items
            .pop_back()
            .unwrap_or_else(|| panic!("pop: operand stack underflow"))
    }

    /// Borrow the element `depth` steps below the top (0 = top).
    ///
    /// # Panics
    /// When the stack holds `depth` or fewer elements.
    pub fn peek(&self, depth: usize) -> &Number {
        self.items.iter().rev().nth(depth).unwrap_or_else(|| {
            panic!(
                "peek: depth {depth} out of range (stack has {} elements)",
                self.items.len()
            )
        })
    }

    /// Mutably borrow the element `depth` steps below the top (0 = top).
    ///
    /// # Panics
    /// When the stack holds `depth` or fewer elements.
    pub fn peek_mut(&mut self, depth: usize) -> &mut Number {
        let len = self.items.len();
        self.items.iter_mut().rev().nth(depth).unwrap_or_else(|| {
            panic!("peek: depth {depth} out of range (stack has {len} elements)")
        })
    }

    /// Iterate from the top (depth 0) toward the bottom.
    pub fn iter_top_down(&self) -> impl Iterator<Item = &Number> {
        self.items.iter().rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_lifo() {
        let mut stack = OperandStack::new();
        stack.push(Number::from_int(1));
        stack.push(Number::from_int(2));
        stack.push(Number::from_int(3));

        assert_eq!(stack.depth(), 3);
        assert_eq!(stack.pop().to_i64(), 3);
        assert_eq!(stack.pop().to_i64(), 2);
        assert_eq!(stack.pop().to_i64(), 1);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_peek_by_depth() {
        let mut stack = OperandStack::new();
        for value in 1..=4 {
            stack.push(Number::from_int(value));
        }

        assert_eq!(stack.peek(0).to_i64(), 4);
        assert_eq!(stack.peek(3).to_i64(), 1);
        assert_eq!(stack.depth(), 4); // peeking does not pop
    }

    #[test]
    fn test_peek_mut_edits_in_place() {
        let mut stack = OperandStack::new();
        stack.push(Number::from_int(5));
        stack.push(Number::from_int(6));

        stack.peek_mut(1).negate();
        assert_eq!(stack.peek(1).to_i64(), -5);
        assert_eq!(stack.peek(0).to_i64(), 6);
    }

    #[test]
    fn test_iter_top_down() {
        let mut stack = OperandStack::new();
        for value in 1..=3 {
            stack.push(Number::from_int(value));
        }
        let order: Vec<i64> = stack.iter_top_down().map(Number::to_i64).collect();
        assert_eq!(order, vec![3, 2, 1]);
    }

    #[test]
    #[should_panic(expected = "operand stack underflow")]
    fn test_pop_empty_panics() {
        OperandStack::new().pop();
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_peek_past_bottom_panics() {
        let mut stack = OperandStack::new();
        stack.push(Number::from_int(1));
        stack.peek(1);
    }
}
