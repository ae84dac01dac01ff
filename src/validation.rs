// Validation utilities module
// Provides custom validation functions for domain-specific rules

use validator::ValidationError;

/// Validates that a movie rating is between 0.0 and 10.0
pub fn validate_rating_range(rating: f64) -> Result<(), ValidationError> {
    if rating < 0.0 || rating > 10.0 {
        Err(ValidationError::new("rating_out_of_range"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating_range(0.0).is_ok());
        assert!(validate_rating_range(10.0).is_ok());
        assert!(validate_rating_range(7.4).is_ok());
        assert!(validate_rating_range(-0.1).is_err());
        assert!(validate_rating_range(10.1).is_err());
    }
}
