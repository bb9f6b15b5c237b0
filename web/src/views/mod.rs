pub mod about;
pub mod map;
pub mod not_found;
pub mod search;
