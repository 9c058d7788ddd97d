//! Directional differences and their unweighted aggregate.
//!
//! `feat - shift(feat, d)` is a discrete one-sided derivative along `d`:
//! near zero in flat regions and large across edges perpendicular to `d`.
//! Summing all eight gives a boundary response with no preferred direction.
//! Zero fill at the borders means a constant plane still responds along its
//! outermost rows and columns.
use super::shift::{shift, shift_plane_into, Direction};
use crate::tensor::FeatureMap;

/// `feat - shift(feat, direction)`, elementwise.
pub fn directional_difference(feat: &FeatureMap, direction: Direction) -> FeatureMap {
    let shifted = shift(feat, direction);
    let mut out = feat.clone();
    for (o, s) in out.data_mut().iter_mut().zip(shifted.data()) {
        *o -= *s;
    }
    out
}

/// Sum of the eight directional differences, accumulated in
/// [`Direction::ALL`] order.
pub fn boundary_response(feat: &FeatureMap) -> FeatureMap {
    let shape = feat.shape();
    let mut out = FeatureMap::zeros(shape);
    let mut scratch = vec![0.0f32; shape.plane_len()];
    for n in 0..shape.n {
        for c in 0..shape.c {
            let src = feat.plane(n, c).as_slice();
            let acc = out.plane_mut(n, c);
            for direction in Direction::ALL {
                scratch.fill(0.0);
                shift_plane_into(feat, n, c, direction, &mut scratch);
                for ((a, &f), &s) in acc.iter_mut().zip(src).zip(&scratch) {
                    *a += f - s;
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{boundary_response, directional_difference};
    use crate::ops::shift::Direction;
    use crate::tensor::{FeatureMap, Shape4};

    fn center_pixel() -> FeatureMap {
        let mut feat = FeatureMap::zeros(Shape4::new(1, 1, 3, 3));
        feat.set(0, 0, 1, 1, 1.0);
        feat
    }

    #[test]
    fn single_direction_difference_is_local_to_the_centre() {
        let diff = directional_difference(&center_pixel(), Direction::Up);
        // Up reads the row below, so the centre moves to (0, 1).
        assert_eq!(
            diff.into_vec(),
            vec![0.0, -1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn centre_pixel_gives_plus_eight_and_minus_one_ring() {
        let response = boundary_response(&center_pixel());
        assert_eq!(
            response.into_vec(),
            vec![-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0]
        );
    }

    #[test]
    fn response_equals_sum_of_directional_differences() {
        let shape = Shape4::new(2, 2, 4, 3);
        let feat = FeatureMap::from_fn(shape, |n, c, y, x| {
            ((n + 1) as f32) * ((c * 7 + y * 3 + x) % 5) as f32 - 1.5
        });
        let mut expected = FeatureMap::zeros(shape);
        for direction in Direction::ALL {
            let diff = directional_difference(&feat, direction);
            for (e, d) in expected.data_mut().iter_mut().zip(diff.data()) {
                *e += *d;
            }
        }
        assert_eq!(boundary_response(&feat), expected);
    }

    #[test]
    fn constant_plane_responds_only_at_borders() {
        let feat = FeatureMap::filled(Shape4::new(1, 1, 5, 5), 2.0);
        let response = boundary_response(&feat);
        for y in 1..4 {
            for x in 1..4 {
                assert_eq!(response.get(0, 0, y, x), 0.0, "interior ({y}, {x})");
            }
        }
        // Corner loses five of its eight neighbours, an edge cell three.
        assert_eq!(response.get(0, 0, 0, 0), 10.0);
        assert_eq!(response.get(0, 0, 0, 2), 6.0);
    }
}
