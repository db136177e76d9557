/// Index of a body in its scene table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

impl BodyId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// How a body's position is produced each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Runs the stepper at this index in the scene's stepper list.
    Animated(usize),
    /// Copies its parent's world position verbatim (rings, attached props).
    Follower,
    /// Never moves after setup.
    Static,
}
