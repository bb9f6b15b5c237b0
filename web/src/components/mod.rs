pub mod error;
pub mod loading;
pub mod navbar;
pub mod place_autocomplete;

pub use place_autocomplete::PlaceAutocomplete;
