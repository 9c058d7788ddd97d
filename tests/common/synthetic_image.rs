use boundary_enhancer::{FeatureMap, Shape4};

/// Generates a simple high-contrast checkerboard image.
pub fn checkerboard_u8(width: usize, height: usize, cell: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let cx = (x / cell) as i32;
            let cy = (y / cell) as i32;
            let val = if (cx + cy) & 1 == 0 { 32u8 } else { 220u8 };
            img[y * width + x] = val;
        }
    }
    img
}

/// Deterministic, non-trivial NCHW map with values in [-1, 1].
pub fn ramp_map(shape: Shape4) -> FeatureMap {
    FeatureMap::from_fn(shape, |n, c, y, x| {
        let v = (n * 37 + c * 11 + y * 7 + x * 3) % 19;
        v as f32 / 9.0 - 1.0
    })
}
