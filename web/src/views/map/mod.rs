pub mod explore_map;
pub mod map_marker;
pub mod map_marker_popup;
