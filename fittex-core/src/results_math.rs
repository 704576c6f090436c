//! Movement analytics for Fitts's-law results.
//!
//! Pure functions over 3D points and scalar width/distance values; every
//! derived "movement quality" statistic in the records comes from here.

use crate::vec3::Vec3;

/// Fitts's-law index of difficulty, `log2(distance / width + 1)`.
///
/// `width` must be positive; test configurations are validated before any
/// trial runs, so a non-positive width here is a programming error.
pub fn index_of_difficulty(target_width: f32, target_distance: f32) -> f64 {
    assert!(target_width > 0.0, "target width must be positive");
    (target_distance as f64 / target_width as f64 + 1.0).log2()
}

/// Scalar coordinate of `point`'s orthogonal projection onto the line
/// through `axis_start` -> `axis_end`, as a signed distance from
/// `axis_start` (0 at the start, axis length at the end).
///
/// A degenerate axis (`axis_start == axis_end`) yields 0 rather than
/// dividing by zero.
pub fn projected_point_coordinate(axis_start: Vec3, axis_end: Vec3, point: Vec3) -> f64 {
    let axis = axis_end - axis_start;
    let length = axis.magnitude();
    if length == 0.0 {
        return 0.0;
    }
    (point - axis_start).dot(&axis) / length
}

/// Along-axis amplitude actually traveled in a trial, accounting for the
/// resting projection left over from the previous trial (0 for the first
/// trial of a block).
///
/// Signed along the nominal axis direction: a rest short of the start
/// target enlarges the amplitude, a rest past it shrinks it. Degenerate
/// axes yield 0, consistent with the projection fallback.
pub fn effective_amplitude(
    axis_start: Vec3,
    axis_end: Vec3,
    current_projection: f64,
    previous_projection: f64,
) -> f64 {
    if (axis_end - axis_start).magnitude() == 0.0 {
        return 0.0;
    }
    current_projection - previous_projection
}

/// Euclidean distance between the movement endpoint and the target center
pub fn distance_error(final_position: Vec3, target_position: Vec3) -> f64 {
    final_position.distance(&target_position)
}
