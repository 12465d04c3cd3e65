//! Dense integer distance matrix.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Factor applied to planar distances before truncating them to integers.
///
/// Coordinates in degrees differ by small fractions, so four decimal places
/// keep neighboring stops distinguishable without floating point in the
/// cost model.
pub const DISTANCE_SCALE: f64 = 10_000.0;

/// A dense, symmetric n×n matrix of non-negative integer travel costs,
/// stored in row-major order.
///
/// Every constructor validates the matrix, so a `DistanceMatrix` that exists
/// is always square, symmetric, zero on the diagonal and non-negative.
///
/// # Examples
///
/// ```
/// use u_fleet::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (3.0, 4.0), (0.0, 8.0)]).unwrap();
/// assert_eq!(dm.get(0, 1), 50_000);
/// assert_eq!(dm.get(1, 0), 50_000);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<i64>>", into = "Vec<Vec<i64>>")]
pub struct DistanceMatrix {
    data: Vec<i64>,
    size: usize,
}

impl DistanceMatrix {
    /// Builds a matrix from explicit rows.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self, ConfigurationError> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(ConfigurationError::NonSquareMatrix {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            data.extend(values);
        }
        Self::from_data(size, data)
    }

    /// Builds a matrix from a flat row-major grid of `size * size` values.
    pub fn from_data(size: usize, data: Vec<i64>) -> Result<Self, ConfigurationError> {
        if data.len() != size * size {
            return Err(ConfigurationError::NonSquareMatrix {
                row: 0,
                len: data.len(),
                expected: size * size,
            });
        }
        let dm = Self { data, size };
        dm.validate()?;
        Ok(dm)
    }

    /// Computes Euclidean distances between planar points, scaled by
    /// [`DISTANCE_SCALE`] and truncated toward zero.
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self, ConfigurationError> {
        Self::from_points_scaled(points, DISTANCE_SCALE)
    }

    /// Like [`from_points`](Self::from_points) with a caller-chosen scale.
    pub fn from_points_scaled(
        points: &[(f64, f64)],
        scale: f64,
    ) -> Result<Self, ConfigurationError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ConfigurationError::InvalidScale(scale));
        }
        let n = points.len();
        let mut data = vec![0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let (x1, y1) = points[i];
                let (x2, y2) = points[j];
                let scaled = (x2 - x1).hypot(y2 - y1) * scale;
                // i64::MAX rounds up to 2^63 in f64.
                if !scaled.is_finite() || scaled >= i64::MAX as f64 {
                    return Err(ConfigurationError::DistanceOutOfRange { from: i, to: j });
                }
                let d = scaled as i64;
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        let dm = Self { data, size: n };
        dm.validate()?;
        Ok(dm)
    }

    /// Checks the matrix shape and that no route cost built from it can
    /// overflow `i64`.
    ///
    /// A closed route crosses at most `n` edges and a priced move adds at
    /// most a few more, so `max × 2(n + 2)` bounds every intermediate sum.
    fn validate(&self) -> Result<(), ConfigurationError> {
        let mut max_distance = 0i64;
        for i in 0..self.size {
            if self.get(i, i) != 0 {
                return Err(ConfigurationError::NonZeroDiagonal { node: i });
            }
            for j in (i + 1)..self.size {
                let d = self.get(i, j);
                if d < 0 {
                    return Err(ConfigurationError::NegativeDistance {
                        from: i,
                        to: j,
                        distance: d,
                    });
                }
                if d != self.get(j, i) {
                    return Err(ConfigurationError::AsymmetricDistance { from: i, to: j });
                }
                max_distance = max_distance.max(d);
            }
        }
        let bound = i64::try_from(2 * (self.size + 2))
            .ok()
            .and_then(|factor| max_distance.checked_mul(factor));
        if bound.is_none() {
            return Err(ConfigurationError::DistanceOverflow {
                max_distance,
                locations: self.size,
            });
        }
        Ok(())
    }

    /// Returns the distance from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.data[from * self.size + to]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the distances from `from` to every location.
    pub fn row(&self, from: usize) -> &[i64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    /// Returns the nearest of `candidates` to `from`.
    ///
    /// Equidistant candidates resolve to the lowest node index. Returns `None`
    /// if `candidates` is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by_key(|&c| (self.get(from, c), c))
    }
}

impl TryFrom<Vec<Vec<i64>>> for DistanceMatrix {
    type Error = ConfigurationError;

    fn try_from(rows: Vec<Vec<i64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<DistanceMatrix> for Vec<Vec<i64>> {
    fn from(dm: DistanceMatrix) -> Self {
        (0..dm.size).map(|i| dm.row(i).to_vec()).collect()
    }
}
