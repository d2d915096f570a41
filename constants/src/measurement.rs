/// Id given to the first point of a fresh sequence.
pub const FIRST_POINT_ID: u32 = 1;

/// Fewest points for which distances and a perimeter exist.
pub const MIN_POINTS_FOR_DISTANCE: usize = 2;

/// Fewest points that close into a polygon with an area.
pub const MIN_POINTS_FOR_AREA: usize = 3;

/// Notification pushed after every change to the point sequence.
pub const MEASUREMENT_UPDATED_METHOD: &str = "measurement_updated";

/// Notification pushed once when a measurement is completed.
pub const MEASUREMENT_COMPLETED_METHOD: &str = "measurement_completed";
