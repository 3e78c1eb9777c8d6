use std::fmt;

/// Opaque upstream-fetch failure. The display text is part of the API wire
/// contract; the underlying cause is logged where the fetch happens and never
/// reaches the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchError;

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to fetch NAV data")
    }
}

impl std::error::Error for FetchError {}
