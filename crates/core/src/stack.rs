//! The bounded LIFO container.
//!
//! Storage is a boxed slice allocated once at construction and never resized,
//! plus a cursor counting the live elements. The topmost live element sits at
//! index `len - 1`; an empty stack has no top. Pushing into a full stack fails
//! instead of growing.

use crate::error::StackError;
use crate::value::Value;

/// A fixed-capacity, array-backed stack of [`Value`]s.
///
/// Indices `[0, len)` of `slots` are live, bottom to top. Slots past `len`
/// are dead and may hold stale values from earlier pushes.
#[derive(Debug, Clone)]
pub struct BoundedStack {
    slots: Box<[Value]>,
    len: usize,
}

impl BoundedStack {
    /// Create an empty stack holding at most `capacity` elements.
    ///
    /// Fails with [`StackError::InvalidCapacity`] when `capacity <= 0`.
    pub fn new(capacity: i64) -> Result<Self, StackError> {
        let slots = match usize::try_from(capacity) {
            Ok(n) if n > 0 => vec![0.0; n].into_boxed_slice(),
            _ => return Err(StackError::InvalidCapacity(capacity)),
        };

        Ok(Self { slots, len: 0 })
    }

    /// Push `value` as the new topmost element.
    pub fn push(&mut self, value: Value) -> Result<(), StackError> {
        if self.is_full() {
            return Err(StackError::Overflow {
                capacity: self.capacity(),
            });
        }

        self.slots[self.len] = value;
        self.len += 1;
        Ok(())
    }

    /// Remove and return the topmost element. The vacated slot is not scrubbed.
    pub fn pop(&mut self) -> Result<Value, StackError> {
        if self.is_empty() {
            return Err(StackError::Underflow);
        }

        self.len -= 1;
        Ok(self.slots[self.len])
    }

    /// Return the topmost element without removing it.
    pub fn peek(&self) -> Result<Value, StackError> {
        match self.top() {
            Some(index) => Ok(self.slots[index]),
            None => Err(StackError::Empty),
        }
    }

    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Index of the topmost live element, `None` when empty.
    pub fn top(&self) -> Option<usize> {
        self.len.checked_sub(1)
    }

    /// Copy of the live elements, bottom to top.
    ///
    /// The returned vector owns its data; later pushes and pops do not show
    /// through it and editing it does not touch the stack.
    pub fn snapshot(&self) -> Vec<Value> {
        self.slots[..self.len].to_vec()
    }
}

/// Two stacks are equal when they have the same capacity and the same live
/// elements. Dead slots are ignored.
impl PartialEq for BoundedStack {
    fn eq(&self, other: &Self) -> bool {
        self.capacity() == other.capacity() && self.slots[..self.len] == other.slots[..other.len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(capacity: i64, values: &[Value]) -> BoundedStack {
        let mut stack = BoundedStack::new(capacity).unwrap();
        for &v in values {
            stack.push(v).unwrap();
        }
        stack
    }

    fn bits(values: &[Value]) -> Vec<u64> {
        values.iter().map(|v| v.to_bits()).collect()
    }

    // ── Construction ─────────────────────────────────────────────────────

    #[test]
    fn new_stack_is_empty() {
        let stack = BoundedStack::new(5).unwrap();
        assert!(stack.is_empty());
        assert!(!stack.is_full());
        assert_eq!(stack.size(), 0);
        assert_eq!(stack.capacity(), 5);
        assert_eq!(stack.top(), None);
        assert!(stack.snapshot().is_empty());
    }

    #[test]
    fn non_positive_capacity_rejected() {
        assert_eq!(BoundedStack::new(0), Err(StackError::InvalidCapacity(0)));
        assert_eq!(BoundedStack::new(-1), Err(StackError::InvalidCapacity(-1)));
        assert_eq!(BoundedStack::new(-42), Err(StackError::InvalidCapacity(-42)));
    }

    #[test]
    fn capacity_one_cycles_empty_full_empty() {
        let mut stack = BoundedStack::new(1).unwrap();
        assert!(stack.is_empty());

        stack.push(7.0).unwrap();
        assert!(stack.is_full());
        assert_eq!(stack.top(), Some(0));

        assert_eq!(stack.pop(), Ok(7.0));
        assert!(stack.is_empty());
    }

    // ── Overflow / underflow ─────────────────────────────────────────────

    #[test]
    fn push_into_full_stack_overflows_and_changes_nothing() {
        let mut stack = filled(5, &[1.0, 2.0, 3.0, 4.0, 5.0]);
        let before = stack.snapshot();

        assert_eq!(stack.push(999.0), Err(StackError::Overflow { capacity: 5 }));
        assert_eq!(stack.size(), 5);
        assert!(stack.is_full());
        assert_eq!(bits(&stack.snapshot()), bits(&before));
    }

    #[test]
    fn pop_and_peek_on_empty_stack_fail() {
        let mut stack = BoundedStack::new(5).unwrap();

        assert_eq!(stack.pop(), Err(StackError::Underflow));
        assert_eq!(stack.peek(), Err(StackError::Empty));
        assert_eq!(stack.size(), 0);
        assert!(stack.is_empty());
    }

    #[test]
    fn failed_pop_leaves_snapshot_unchanged() {
        let mut stack = filled(3, &[1.5]);
        stack.pop().unwrap();
        let before = stack.snapshot();

        assert!(stack.pop().is_err());
        assert_eq!(bits(&stack.snapshot()), bits(&before));
    }

    // ── Laws ─────────────────────────────────────────────────────────────

    #[test]
    fn push_then_pop_restores_state() {
        let mut stack = filled(4, &[3.0, -1.0]);
        let before = stack.clone();

        stack.push(12.5).unwrap();
        assert_eq!(stack.pop(), Ok(12.5));
        assert_eq!(stack, before);
    }

    #[test]
    fn peek_is_idempotent() {
        let stack = filled(3, &[4.0, 8.0]);
        let first = stack.peek();
        let second = stack.peek();

        assert_eq!(first, Ok(8.0));
        assert_eq!(first, second);
        assert_eq!(stack.size(), 2);
    }

    #[test]
    fn pops_come_back_in_reverse_push_order() {
        let values = [2.0, 4.0, 6.0, 8.0];
        let mut stack = filled(4, &values);

        let popped: Vec<Value> = (0..values.len()).map(|_| stack.pop().unwrap()).collect();
        assert_eq!(popped, vec![8.0, 6.0, 4.0, 2.0]);
        assert!(stack.is_empty());
    }

    #[test]
    fn size_stays_within_capacity() {
        let mut stack = BoundedStack::new(3).unwrap();
        for i in 0..10 {
            let _ = stack.push(i as Value);
            assert!(stack.size() <= stack.capacity());
        }
        for _ in 0..10 {
            let _ = stack.pop();
            assert!(stack.size() <= stack.capacity());
        }
        assert_eq!(stack.size(), 0);
    }

    // ── Snapshot independence ────────────────────────────────────────────

    #[test]
    fn snapshot_is_independent_of_later_mutation() {
        let mut stack = filled(5, &[1.0, 2.0]);
        let snap = stack.snapshot();

        stack.push(3.0).unwrap();
        stack.pop().unwrap();
        stack.pop().unwrap();

        assert_eq!(snap, vec![1.0, 2.0]);
    }

    #[test]
    fn editing_snapshot_does_not_touch_stack() {
        let stack = filled(5, &[1.0, 2.0]);
        let mut snap = stack.snapshot();
        snap[0] = 100.0;
        snap.push(5.0);

        assert_eq!(stack.snapshot(), vec![1.0, 2.0]);
        assert_eq!(stack.size(), 2);
    }

    #[test]
    fn equality_ignores_dead_slots() {
        let mut a = filled(3, &[1.0, 2.0]);
        a.pop().unwrap();
        let b = filled(3, &[1.0]);
        assert_eq!(a, b);

        let c = filled(4, &[1.0]);
        assert_ne!(b, c);
    }

    #[test]
    fn extreme_values_round_trip() {
        let mut stack = BoundedStack::new(4).unwrap();
        for v in [Value::MIN, Value::MAX, Value::MIN_POSITIVE, -0.0] {
            stack.push(v).unwrap();
            assert_eq!(stack.pop().unwrap().to_bits(), v.to_bits());
        }
    }

    // ── Scenarios ────────────────────────────────────────────────────────

    #[test]
    fn scenario_push_three() {
        let stack = filled(5, &[10.0, 20.0, 30.0]);
        assert_eq!(stack.size(), 3);
        assert_eq!(stack.peek(), Ok(30.0));
        assert_eq!(stack.snapshot(), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn scenario_fill_then_drain() {
        let mut stack = filled(5, &[1.0, 2.0, 3.0, 4.0, 5.0]);
        let popped: Vec<Value> = (0..5).map(|_| stack.pop().unwrap()).collect();
        assert_eq!(popped, vec![5.0, 4.0, 3.0, 2.0, 1.0]);
        assert!(stack.is_empty());
    }

    #[test]
    fn scenario_negative_and_zero_values() {
        let mut stack = filled(3, &[-10.0, 0.0, 25.0]);
        assert_eq!(stack.snapshot(), vec![-10.0, 0.0, 25.0]);
        assert_eq!(stack.peek(), Ok(25.0));
        assert_eq!(stack.pop(), Ok(25.0));
        assert_eq!(stack.snapshot(), vec![-10.0, 0.0]);
    }

    #[test]
    fn scenario_large_capacity() {
        let mut stack = BoundedStack::new(1000).unwrap();
        for i in 0..1000 {
            stack.push(i as Value).unwrap();
        }
        assert!(stack.is_full());

        for expected in (0..1000).rev() {
            assert_eq!(stack.pop(), Ok(expected as Value));
        }
        assert!(stack.is_empty());
    }
}
