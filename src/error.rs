//! Errors raised while building an [`AddrV4`](crate::AddrV4).

/// The address (or its prefix) could not be turned into an [`AddrV4`](crate::AddrV4).
///
/// Carries the original input as text, not the component that failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid Addr: {input}")]
pub struct InvalidAddressError {
    input: String,
}

impl InvalidAddressError {
    pub(crate) fn new(input: impl ToString) -> Self {
        InvalidAddressError {
            input: input.to_string(),
        }
    }

    /// The rejected input, as it was given.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// A numeric component was not a plain decimal number or exceeded its max.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum InvalidByteError {
    #[error("{value}: must be a decimal value <= {max}")]
    Value { value: String, max: u8 },
    #[error("expected {expected} octets, found {found}")]
    OctetCount { expected: usize, found: usize },
    #[error("too many '/' separators")]
    Separators,
    #[error("{value}: must be within 0..={max}", max = u32::MAX)]
    OutOfRange { value: i128 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_address_message() {
        let err = InvalidAddressError::new("1.1.1.1/1/2");
        assert_eq!(err.to_string(), "invalid Addr: 1.1.1.1/1/2");
        assert_eq!(err.input(), "1.1.1.1/1/2");
    }

    #[test]
    fn test_invalid_byte_message() {
        let err = InvalidByteError::Value {
            value: "256".to_string(),
            max: 255,
        };
        assert_eq!(err.to_string(), "256: must be a decimal value <= 255");
    }
}
