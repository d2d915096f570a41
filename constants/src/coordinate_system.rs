//! AR world space is right-handed with Y up; the horizontal plane is x–z.

/// Height of the ground plane used for placement ray-casts when no settings are loaded.
pub const DEFAULT_GROUND_HEIGHT: f32 = 0.0;

/// Project a world position onto the horizontal plane, dropping height.
/// Returns `(x, z)`.
pub fn ground_projection(x: f64, _y: f64, z: f64) -> (f64, f64) {
    (x, z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_drops_height() {
        assert_eq!(ground_projection(1.5, 42.0, -2.0), (1.5, -2.0));
    }
}
