use thiserror::Error;

use crate::geo::Coordinates;

pub const MISSING_COORDINATES_MESSAGE: &str = "Selected entry has no coordinates.";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("Please select a valid location from the autocomplete list.")]
    NotSelected,
    #[error("Invalid coordinate value: {0}")]
    Invalid(String),
}

/// Guard for the search form: both fields must have been filled in by an
/// autocomplete selection before the map can be requested.
pub fn validate_coordinates(lat: &str, lng: &str) -> Result<Coordinates, CoordinateError> {
    let (lat, lng) = (lat.trim(), lng.trim());
    if lat.is_empty() || lng.is_empty() {
        return Err(CoordinateError::NotSelected);
    }

    let parse = |raw: &str| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CoordinateError::Invalid(raw.to_string()))
    };

    Ok(Coordinates::new(parse(lat)?, parse(lng)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_selected_coordinates() {
        assert_eq!(
            validate_coordinates("-22.9056", " -47.0608 "),
            Ok(Coordinates::new(-22.9056, -47.0608))
        );
    }

    #[test]
    fn blocks_when_nothing_selected() {
        assert_eq!(validate_coordinates("", ""), Err(CoordinateError::NotSelected));
        assert_eq!(validate_coordinates("12.0", "  "), Err(CoordinateError::NotSelected));
        assert_eq!(
            CoordinateError::NotSelected.to_string(),
            "Please select a valid location from the autocomplete list."
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            validate_coordinates("north", "1.0"),
            Err(CoordinateError::Invalid("north".to_string()))
        );
        assert!(validate_coordinates("NaN", "1.0").is_err());
    }
}
