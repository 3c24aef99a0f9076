/// Stack of nested coordinate frames
use nalgebra::Matrix4;

use crate::error::StackError;

/// Ordered stack of transforms. Always holds at least one frame; the last
/// element is the active frame ("top").
#[derive(Debug, Clone, PartialEq)]
pub struct TransformStack {
    frames: Vec<Matrix4<f64>>,
}

impl TransformStack {
    /// A stack holding a single identity frame
    pub fn new() -> Self {
        Self {
            frames: vec![Matrix4::identity()],
        }
    }

    /// The active coordinate frame
    pub fn top(&self) -> &Matrix4<f64> {
        // `frames` is never empty: `new` seeds one frame and `pop` refuses the last.
        &self.frames[self.frames.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Matrix4<f64> {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Duplicate the top frame by value
    pub fn push(&mut self) {
        let copy = *self.top();
        self.frames.push(copy);
    }

    /// Remove the top frame, refusing to remove the last one
    pub fn pop(&mut self) -> Result<(), StackError> {
        if self.frames.len() <= 1 {
            return Err(StackError::LastFrame);
        }
        self.frames.pop();
        Ok(())
    }

    /// Compose `delta` into the active frame as `top = top * delta`, so the
    /// delta acts in the frame's local coordinates.
    pub fn compose(&mut self, delta: &Matrix4<f64>) {
        let top = self.top_mut();
        *top = *top * delta;
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform;
    use nalgebra::Vector4;

    #[test]
    fn test_starts_with_identity() {
        let stack = TransformStack::new();
        assert_eq!(stack.depth(), 1);
        assert_eq!(*stack.top(), Matrix4::identity());
    }

    #[test]
    fn test_pop_refuses_last_frame() {
        let mut stack = TransformStack::new();
        assert_eq!(stack.pop(), Err(StackError::LastFrame));
        assert_eq!(stack.depth(), 1);

        stack.push();
        stack.push();
        assert!(stack.pop().is_ok());
        assert!(stack.pop().is_ok());
        assert_eq!(stack.pop(), Err(StackError::LastFrame));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_push_copies_by_value() {
        let mut stack = TransformStack::new();
        stack.compose(&transform::translation(3.0, 0.0, 0.0));
        let outer = *stack.top();

        stack.push();
        assert_eq!(*stack.top(), outer);

        stack.compose(&transform::scale(2.0, 2.0, 2.0));
        assert_ne!(*stack.top(), outer);

        stack.pop().unwrap();
        assert_eq!(*stack.top(), outer);
    }

    #[test]
    fn test_compose_order() {
        let mut stack = TransformStack::new();
        stack.compose(&transform::translation(5.0, 0.0, 0.0));
        stack.compose(&transform::scale(2.0, 2.0, 2.0));

        let p = stack.top() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!((p - Vector4::new(7.0, 0.0, 0.0, 1.0)).norm() < 1e-12);
    }
}
