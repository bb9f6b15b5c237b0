use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Great-circle distance between two points, in kilometres.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let phi_1 = a.lat.to_radians();
    let phi_2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lng - a.lng).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi_1.cos() * phi_2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub north_east: Coordinates,
    pub south_west: Coordinates,
}

impl MapBounds {
    /// Smallest box containing every point, or `None` when there are no points.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinates>,
    {
        points.into_iter().fold(None, |bounds, p| {
            Some(match bounds {
                None => MapBounds {
                    north_east: p,
                    south_west: p,
                },
                Some(MapBounds {
                    north_east,
                    south_west,
                }) => MapBounds {
                    north_east: Coordinates::new(north_east.lat.max(p.lat), north_east.lng.max(p.lng)),
                    south_west: Coordinates::new(south_west.lat.min(p.lat), south_west.lng.min(p.lng)),
                },
            })
        })
    }

    /// Grows the box by `ratio` of its height and width on every side, the
    /// way Leaflet's `LatLngBounds.pad` does.
    pub fn pad(&self, ratio: f64) -> Self {
        let height_buffer = (self.south_west.lat - self.north_east.lat).abs() * ratio;
        let width_buffer = (self.south_west.lng - self.north_east.lng).abs() * ratio;

        MapBounds {
            north_east: Coordinates::new(
                self.north_east.lat + height_buffer,
                self.north_east.lng + width_buffer,
            ),
            south_west: Coordinates::new(
                self.south_west.lat - height_buffer,
                self.south_west.lng - width_buffer,
            ),
        }
    }

    pub fn center(&self) -> Coordinates {
        Coordinates::new(
            (self.north_east.lat + self.south_west.lat) / 2.0,
            (self.north_east.lng + self.south_west.lng) / 2.0,
        )
    }
}
