pub mod bookings;
pub mod dashboard;
pub mod parcels;
pub mod profiles;
pub mod quotes;
pub mod vehicles;

use crate::error::{AppError, AppResult};

/// Reject a missing or whitespace-only text field
pub(crate) fn require_text(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{} is required", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert!(require_text("Mumbai", "Pickup location").is_ok());

        let err = require_text("   ", "Pickup location").unwrap_err();
        assert_eq!(err.to_string(), "Pickup location is required");
    }
}
