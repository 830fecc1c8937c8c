/// Aggregated view of attempt progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptProgress {
    pub total: usize,
    /// Questions answered correctly and left behind.
    pub answered: usize,
    pub score: usize,
    pub is_complete: bool,
}
