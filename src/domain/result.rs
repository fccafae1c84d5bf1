//! Result type alias for Stratus operations

use crate::domain::errors::StratusError;

/// Result type alias used throughout Stratus
///
/// This alias simplifies function signatures by defaulting the error type
/// to [`StratusError`].
///
/// # Examples
///
/// ```
/// use stratus::domain::{Result, StratusError};
///
/// fn parse_city_id(raw: &str) -> Result<i64> {
///     raw.parse()
///         .map_err(|_| StratusError::Validation(format!("invalid city id: {raw}")))
/// }
///
/// assert!(parse_city_id("2172797").is_ok());
/// assert!(parse_city_id("oops").is_err());
/// ```
pub type Result<T> = std::result::Result<T, StratusError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn returns_ok() -> Result<u32> {
        Ok(42)
    }

    fn returns_err() -> Result<u32> {
        Err(StratusError::Validation("bad input".to_string()))
    }

    #[test]
    fn test_result_ok() {
        assert_eq!(returns_ok().unwrap(), 42);
    }

    #[test]
    fn test_result_err() {
        let err = returns_err().unwrap_err();
        assert!(matches!(err, StratusError::Validation(_)));
    }
}
