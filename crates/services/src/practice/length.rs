use std::fmt;

use crate::error::SessionError;

/// Timed session length. Only whole multiples of five minutes from 5 to 30
/// are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionLength(u32);

impl SessionLength {
    pub const CHOICES: [u32; 6] = [5, 10, 15, 20, 25, 30];

    /// # Errors
    ///
    /// Returns `SessionError::InvalidLength` for anything outside
    /// [`SessionLength::CHOICES`].
    pub fn from_minutes(minutes: u32) -> Result<Self, SessionError> {
        if Self::CHOICES.contains(&minutes) {
            Ok(Self(minutes))
        } else {
            Err(SessionError::InvalidLength { minutes })
        }
    }

    #[must_use]
    pub fn minutes(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn seconds(self) -> u32 {
        self.0 * 60
    }
}

impl Default for SessionLength {
    fn default() -> Self {
        Self(15)
    }
}

impl fmt::Display for SessionLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}
