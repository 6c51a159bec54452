/// Aggregated view of a running session, for the prompt line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub answered: u32,
    pub correct: u32,
    /// Live accuracy, 0 before the first answer.
    pub accuracy: u32,
    pub remaining_seconds: u32,
    pub total_seconds: u32,
    /// Under a minute left on the timer.
    pub is_warning: bool,
    pub is_paused: bool,
    pub is_ended: bool,
}
