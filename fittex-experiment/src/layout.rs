use fittex_core::{PlaneOrientation, Target};
use std::f32::consts::TAU;

/// Build the ring of targets for one test layout.
///
/// Targets sit on a circle of radius `target_distance / 2` in the given
/// plane, one per position index at angles `id * 2π / n`. An even
/// requested count is bumped to the next odd number so the reciprocal
/// pattern below visits every position.
///
/// Creation order interleaves near and far position indices (0, ⌈n/2⌉,
/// 1, ⌈n/2⌉+1, ...) so that consecutive trials cross the circle; target
/// ids are the position indices, and sequencing follows creation order.
pub fn build_target_plane(
    number_of_targets: usize,
    target_width: f32,
    target_distance: f32,
    plane_orientation: PlaneOrientation,
) -> Vec<Target> {
    let mut count = number_of_targets;
    if count % 2 == 0 {
        count += 1;
    }

    let theta_step = TAU / count as f32;
    let radius = target_distance / 2.0;
    let (u, v) = plane_orientation.basis();

    let mut near_index = 0;
    let mut far_index = count / 2 + 1;
    (0..count)
        .map(|i| {
            let position_index = if i % 2 == 0 {
                let index = near_index;
                near_index += 1;
                index
            } else {
                let index = far_index;
                far_index += 1;
                index
            };
            let theta = position_index as f32 * theta_step;
            let position = u * (radius * theta.sin()) + v * (radius * theta.cos());
            Target::new(position_index, position, target_width)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fittex_core::Vec3;

    #[test]
    fn even_request_is_bumped_to_odd() {
        let targets = build_target_plane(8, 0.04, 0.2, PlaneOrientation::PlaneYZ);
        assert_eq!(targets.len(), 9);
        let targets = build_target_plane(9, 0.04, 0.2, PlaneOrientation::PlaneYZ);
        assert_eq!(targets.len(), 9);
    }

    #[test]
    fn ids_are_a_permutation_of_position_indices() {
        let targets = build_target_plane(9, 0.04, 0.2, PlaneOrientation::PlaneYZ);
        let mut ids: Vec<usize> = targets.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn creation_order_interleaves_across_the_circle() {
        let targets = build_target_plane(9, 0.04, 0.2, PlaneOrientation::PlaneYZ);
        let order: Vec<usize> = targets.iter().map(|t| t.id).collect();
        assert_eq!(order, vec![0, 5, 1, 6, 2, 7, 3, 8, 4]);
    }

    #[test]
    fn targets_lie_on_the_configured_plane_at_half_distance() {
        let distance = 0.3;
        for (orientation, off_plane) in [
            (PlaneOrientation::PlaneXY, (|p: Vec3| p.z) as fn(Vec3) -> f32),
            (PlaneOrientation::PlaneYZ, |p: Vec3| p.x),
            (PlaneOrientation::PlaneZX, |p: Vec3| p.y),
        ] {
            let targets = build_target_plane(9, 0.04, distance, orientation);
            for target in &targets {
                assert_eq!(off_plane(target.position), 0.0);
                let radius = target.position.magnitude();
                assert!((radius - distance as f64 / 2.0).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn consecutive_targets_are_roughly_a_distance_apart() {
        let distance = 0.2f64;
        let targets = build_target_plane(9, 0.04, distance as f32, PlaneOrientation::PlaneYZ);
        for pair in targets.windows(2) {
            let gap = pair[0].position.distance(&pair[1].position);
            // crossing the circle covers most of its diameter
            assert!(gap > distance * 0.85, "gap {gap} too short");
            assert!(gap <= distance + 1e-6, "gap {gap} exceeds the diameter");
        }
    }
}
