/// Tracks whether a drag is active and where the pointer last was.
///
/// Rotation is incremental: each move yields the horizontal delta since the
/// last applied position, so consecutive moves compose additively and mix
/// freely with idle rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    dragging: bool,
    last_x: f32,
}

impl DragState {
    /// Idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Start a drag at `x`.
    pub fn press(&mut self, x: f32) {
        self.dragging = true;
        self.last_x = x;
    }

    /// Horizontal delta from the last applied position to `x`, or `None`
    /// when no drag is active. Does not move the anchor; call
    /// [`commit`](Self::commit) once the delta has been applied.
    #[must_use]
    pub fn delta(&self, x: f32) -> Option<f32> {
        self.dragging.then(|| x - self.last_x)
    }

    /// Record `x` as the last applied position.
    pub fn commit(&mut self, x: f32) {
        self.last_x = x;
    }

    /// End the drag (button released or pointer left the surface).
    pub fn release(&mut self) {
        self.dragging = false;
    }
}
