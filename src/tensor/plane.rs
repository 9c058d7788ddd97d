//! Borrowed single-channel planes of a [`FeatureMap`](super::FeatureMap).
//!
//! A plane is one `(n, c)` slice in row-major layout (stride == width).
//! Stage kernels read planes through this view and write into the raw
//! slice returned by [`FeatureMap::plane_mut`](super::FeatureMap::plane_mut).

/// Read-only `h × w` plane.
#[derive(Clone, Copy, Debug)]
pub struct Plane<'a> {
    w: usize,
    h: usize,
    data: &'a [f32],
}

impl<'a> Plane<'a> {
    pub fn new(w: usize, h: usize, data: &'a [f32]) -> Self {
        debug_assert_eq!(data.len(), w * h);
        Self { w, h, data }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    #[inline]
    pub fn row(&self, y: usize) -> &'a [f32] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }

    #[inline]
    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }

    /// Value at signed coordinates, `0.0` outside the plane.
    #[inline]
    pub fn get_or_zero(&self, x: isize, y: isize) -> f32 {
        if x < 0 || y < 0 || x >= self.w as isize || y >= self.h as isize {
            0.0
        } else {
            self.data[y as usize * self.w + x as usize]
        }
    }
}
