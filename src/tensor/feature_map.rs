//! Owned NCHW f32 feature map.
//!
//! Storage is contiguous and row-major over `(n, c, y, x)`, so each
//! `(n, c)` plane is a `h × w` slice and each batch item is a `c × h × w`
//! slice. Inputs handed to the enhancer are never mutated; every stage
//! allocates a fresh map of the same shape.
use super::plane::Plane;
use crate::error::{EnhanceError, Result};
use serde::{Deserialize, Serialize};

/// Axis sizes of a [`FeatureMap`]: batch, channels, height, width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape4 {
    pub n: usize,
    pub c: usize,
    pub h: usize,
    pub w: usize,
}

impl Shape4 {
    pub const fn new(n: usize, c: usize, h: usize, w: usize) -> Self {
        Self { n, c, h, w }
    }

    /// Number of values in one `(n, c)` plane.
    #[inline]
    pub fn plane_len(&self) -> usize {
        self.h * self.w
    }

    /// Number of values in one batch item.
    #[inline]
    pub fn item_len(&self) -> usize {
        self.c * self.plane_len()
    }

    /// Total number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.n * self.item_len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn checked_len(&self) -> Option<usize> {
        self.n
            .checked_mul(self.c)?
            .checked_mul(self.h)?
            .checked_mul(self.w)
    }
}

impl std::fmt::Display for Shape4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}, {})", self.n, self.c, self.h, self.w)
    }
}

/// Batch of multi-channel activations in NCHW order.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureMap {
    shape: Shape4,
    data: Vec<f32>,
}

impl FeatureMap {
    /// Zero-initialised map.
    pub fn zeros(shape: Shape4) -> Self {
        Self::filled(shape, 0.0)
    }

    /// Map with every value set to `value`.
    pub fn filled(shape: Shape4, value: f32) -> Self {
        let len = shape.checked_len().expect("feature map size overflow");
        Self {
            shape,
            data: vec![value; len],
        }
    }

    /// Wrap an NCHW buffer; its length must equal `N*C*H*W`.
    pub fn from_vec(shape: Shape4, data: Vec<f32>) -> Result<Self> {
        let expected = shape.checked_len().ok_or(EnhanceError::InvalidBuffer {
            expected: usize::MAX,
            actual: data.len(),
        })?;
        if data.len() != expected {
            return Err(EnhanceError::InvalidBuffer {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Build a map by evaluating `f(n, c, y, x)` at every position.
    pub fn from_fn(shape: Shape4, mut f: impl FnMut(usize, usize, usize, usize) -> f32) -> Self {
        let mut map = Self::zeros(shape);
        let mut i = 0;
        for n in 0..shape.n {
            for c in 0..shape.c {
                for y in 0..shape.h {
                    for x in 0..shape.w {
                        map.data[i] = f(n, c, y, x);
                        i += 1;
                    }
                }
            }
        }
        map
    }

    #[inline]
    pub fn shape(&self) -> Shape4 {
        self.shape
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    #[inline]
    /// Convert (n, c, y, x) to a linear index into `data`.
    pub fn idx(&self, n: usize, c: usize, y: usize, x: usize) -> usize {
        debug_assert!(n < self.shape.n && c < self.shape.c);
        debug_assert!(y < self.shape.h && x < self.shape.w);
        ((n * self.shape.c + c) * self.shape.h + y) * self.shape.w + x
    }

    #[inline]
    pub fn get(&self, n: usize, c: usize, y: usize, x: usize) -> f32 {
        self.data[self.idx(n, c, y, x)]
    }

    #[inline]
    pub fn set(&mut self, n: usize, c: usize, y: usize, x: usize, v: f32) {
        let i = self.idx(n, c, y, x);
        self.data[i] = v;
    }

    /// Contiguous `c × h × w` values of batch item `n`.
    pub fn item(&self, n: usize) -> &[f32] {
        let len = self.shape.item_len();
        &self.data[n * len..(n + 1) * len]
    }

    pub fn item_mut(&mut self, n: usize) -> &mut [f32] {
        let len = self.shape.item_len();
        &mut self.data[n * len..(n + 1) * len]
    }

    /// Borrow the `(n, c)` plane.
    pub fn plane(&self, n: usize, c: usize) -> Plane<'_> {
        let len = self.shape.plane_len();
        let start = (n * self.shape.c + c) * len;
        Plane::new(self.shape.w, self.shape.h, &self.data[start..start + len])
    }

    /// Mutably borrow the `(n, c)` plane as a row-major slice.
    pub fn plane_mut(&mut self, n: usize, c: usize) -> &mut [f32] {
        let len = self.shape.plane_len();
        let start = (n * self.shape.c + c) * len;
        &mut self.data[start..start + len]
    }

    /// Largest absolute value, `0.0` for an empty map.
    pub fn max_abs(&self) -> f32 {
        self.data.iter().fold(0.0f32, |acc, v| acc.max(v.abs()))
    }

    /// Mean absolute value, `0.0` for an empty map.
    pub fn mean_abs(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.data.iter().map(|v| v.abs() as f64).sum();
        (sum / self.data.len() as f64) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::{FeatureMap, Shape4};
    use crate::error::EnhanceError;

    #[test]
    fn from_vec_rejects_wrong_length() {
        let shape = Shape4::new(1, 2, 2, 2);
        let err = FeatureMap::from_vec(shape, vec![0.0; 7]).unwrap_err();
        assert_eq!(
            err,
            EnhanceError::InvalidBuffer {
                expected: 8,
                actual: 7
            }
        );
    }

    #[test]
    fn indexing_follows_nchw_order() {
        let shape = Shape4::new(2, 3, 2, 4);
        let map = FeatureMap::from_fn(shape, |n, c, y, x| {
            (n * 1000 + c * 100 + y * 10 + x) as f32
        });

        assert_eq!(map.get(1, 2, 1, 3), 1213.0);
        assert_eq!(map.plane(1, 2).row(1), &[1210.0, 1211.0, 1212.0, 1213.0]);
        assert_eq!(map.item(1).len(), shape.item_len());
        assert_eq!(map.item(1)[0], 1000.0);
        assert_eq!(map.data()[map.idx(0, 1, 0, 2)], 102.0);
    }

    #[test]
    fn abs_statistics() {
        let shape = Shape4::new(1, 1, 1, 4);
        let map = FeatureMap::from_vec(shape, vec![-4.0, 2.0, 0.0, 2.0]).unwrap();
        assert_eq!(map.max_abs(), 4.0);
        assert!((map.mean_abs() - 2.0).abs() < 1e-6);
        assert_eq!(FeatureMap::zeros(Shape4::new(0, 1, 1, 1)).mean_abs(), 0.0);
    }

    #[test]
    fn empty_shapes_hold_no_values() {
        assert!(Shape4::new(0, 3, 4, 4).is_empty());
        assert!(Shape4::new(2, 3, 0, 4).is_empty());
        assert!(!Shape4::new(1, 1, 1, 1).is_empty());

        let mut map = FeatureMap::zeros(Shape4::new(1, 2, 2, 3));
        map.plane_mut(0, 1).copy_from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(map.plane(0, 0).as_slice(), &[0.0; 6]);
        assert_eq!(map.plane(0, 1).row(1), &[4.0, 5.0, 6.0]);
    }
}
