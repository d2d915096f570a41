use bevy::color::Color;

/// Sphere radius of a placed point marker (2 cm).
pub const POINT_MARKER_RADIUS: f32 = 0.02;

/// Cylinder radius of the segment between consecutive points (2 mm).
pub const LINE_RADIUS: f32 = 0.002;

/// Sphere radius of the placement reticle.
pub const PLACEMENT_RETICLE_RADIUS: f32 = 0.01;

/// Segments shorter than this are not drawn.
pub const MIN_DRAWABLE_LINE_LENGTH: f32 = 0.001;

pub const POINT_MARKER_COLOUR: Color = Color::srgb(0.0, 0.478, 1.0);
pub const LINE_COLOUR: Color = Color::srgb(0.204, 0.78, 0.349);
pub const RETICLE_COLOUR: Color = Color::srgb(1.0, 1.0, 1.0);

/// Render layer carrying every measurement visual.
pub const MEASURE_RENDER_LAYER: usize = 1;
