//! # Session snapshot: one parsed reading of the portal status page.

use std::fmt;

use crate::model::ByteSize;

/// Usage record of the authenticated session as reported by the portal.
///
/// A snapshot whose `time_left` is empty came from a missing or garbled page
/// and is never produced by [`parse_status_page`](crate::parse_status_page).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub username: String,
    pub ip_address: String,
    pub session_time: String,
    pub time_left: String,
    pub bytes_up: ByteSize,
    pub bytes_down: ByteSize,
}

impl SessionSnapshot {
    /// Returns `true` when the page carried a time-left value.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.time_left.is_empty()
    }
}

impl fmt::Display for SessionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Username:     {}", self.username)?;
        writeln!(f, "IP Address:   {}", self.ip_address)?;
        writeln!(f, "Session Time: {}", self.session_time)?;
        writeln!(f, "Time Left:    {}", self.time_left)?;
        writeln!(f, "Bytes Up:     {}", self.bytes_up)?;
        write!(f, "Bytes Down:   {}", self.bytes_down)
    }
}
