//! Console error types

/// Console error with code and message.
///
/// The message is exactly the diagnostic printed on the serial line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// E01: Line does not start with '$' or matches no command
    InvalidEntry,
    /// E02: Line exceeded the input buffer before its terminator
    TooManyCharacters,
    /// E03: Decimal field empty or not a number
    InvalidUint8,
    /// E04: '$TEST' without a selector
    TestNotSpecified,
}

impl ConsoleError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidEntry => "E01",
            Self::TooManyCharacters => "E02",
            Self::InvalidUint8 => "E03",
            Self::TestNotSpecified => "E04",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidEntry => "Invalid Entry",
            Self::TooManyCharacters => "Error: User typed too many characters",
            Self::InvalidUint8 => "Invalid uint8_t Entry",
            Self::TestNotSpecified => "Error: Test not specified",
        }
    }
}

impl core::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}
