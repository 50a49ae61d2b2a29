//! Dense row-major matrices of interval and point elements.

use core::ops::{Index, IndexMut};

use nalgebra::DMatrix;
use num_complex::Complex;
use serde::{Deserialize, Serialize};
use ven_core::errors::{ErrorInfo, VenError};
use ven_core::round::RoundedOps;
use ven_interval::{ComplexInterval, Interval};

/// Row-major dense rectangular array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mat<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

pub(crate) fn shape_error(code: &str, message: String) -> VenError {
    VenError::DimensionMismatch(ErrorInfo::new(code, message))
}

impl<T> Mat<T> {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// True for square matrices.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterator over all elements in row-major order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Builds a matrix from a generator invoked in row-major order.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    /// Builds a matrix from nested row vectors; rows must be equally long.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, VenError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(nrows * ncols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != ncols {
                return Err(shape_error(
                    "ragged_rows",
                    format!("row {i} has {} elements, expected {ncols}", row.len()),
                ));
            }
            data.extend(row);
        }
        Ok(Self {
            rows: nrows,
            cols: ncols,
            data,
        })
    }

    /// Builds a matrix from per-column vectors (used by the parallel
    /// kernels, which own whole output columns).
    pub(crate) fn from_columns(rows: usize, cols: Vec<Vec<T>>) -> Self
    where
        T: Clone,
    {
        let ncols = cols.len();
        Self::from_fn(rows, ncols, |i, j| cols[j][i].clone())
    }

    /// Elementwise map.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Mat<U> {
        Mat {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Elementwise combination of equal-shaped matrices.
    pub fn zip_map<U, V>(
        &self,
        other: &Mat<U>,
        f: impl Fn(&T, &U) -> V,
    ) -> Result<Mat<V>, VenError> {
        if self.shape() != other.shape() {
            return Err(shape_error(
                "elementwise_shape",
                format!("{:?} vs {:?}", self.shape(), other.shape()),
            ));
        }
        Ok(Mat {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| f(a, b))
                .collect(),
        })
    }
}

impl<T: Clone> Mat<T> {
    /// Matrix filled with copies of `value`.
    pub fn from_elem(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }
}

impl<T> Index<(usize, usize)> for Mat<T> {
    type Output = T;
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.data[i * self.cols + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Mat<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        &mut self.data[i * self.cols + j]
    }
}

/// Dense matrix of decorated real intervals.
pub type IntervalMatrix<F = f64> = Mat<Interval<F>>;
/// Dense matrix of rectangular complex intervals.
pub type ComplexIntervalMatrix<F = f64> = Mat<ComplexInterval<F>>;
/// Dense matrix of point (float) values.
pub type PointMatrix<F = f64> = Mat<F>;
/// Dense matrix of complex point values.
pub type ComplexPointMatrix<F = f64> = Mat<Complex<F>>;

impl<F: RoundedOps> IntervalMatrix<F> {
    /// Matrix of thin zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_elem(rows, cols, Interval::zero())
    }

    /// Thin identity.
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| {
            if i == j {
                Interval::one()
            } else {
                Interval::zero()
            }
        })
    }

    /// The all-NaI matrix signalling an unverified result.
    pub fn all_nai(rows: usize, cols: usize) -> Self {
        Self::from_elem(rows, cols, Interval::nai())
    }

    /// True when any element carries the NG flag.
    pub fn any_ng(&self) -> bool {
        self.iter().any(Interval::is_ng)
    }

    /// True when any element is NaI.
    pub fn any_nai(&self) -> bool {
        self.iter().any(Interval::is_nai)
    }

    /// Midpoints widened to binary64 for the non-verified float solvers.
    pub fn mid_f64(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.rows, self.cols, |i, j| self[(i, j)].mid().to_f64())
    }

    /// Exact singleton enclosure of a binary64 point matrix, rounding
    /// outward into `F` where a value is not representable.
    pub fn enclose_f64(m: &DMatrix<f64>) -> Result<Self, VenError> {
        let mut out = Self::zeros(m.nrows(), m.ncols());
        for i in 0..m.nrows() {
            for j in 0..m.ncols() {
                out[(i, j)] = Interval::from_f64_bounds(m[(i, j)], m[(i, j)])?;
            }
        }
        Ok(out)
    }

    /// Rump decomposition of the whole matrix into midpoint and radius
    /// point matrices.
    pub fn rump_split(&self) -> (PointMatrix<F>, PointMatrix<F>) {
        let mut mid = PointMatrix::from_elem(self.rows, self.cols, F::ZERO);
        let mut rad = PointMatrix::from_elem(self.rows, self.cols, F::ZERO);
        for i in 0..self.rows {
            for j in 0..self.cols {
                let (m, r) = self[(i, j)].rump_mid_rad();
                mid[(i, j)] = m;
                rad[(i, j)] = r;
            }
        }
        (mid, rad)
    }
}

impl<F: RoundedOps> ComplexIntervalMatrix<F> {
    /// Matrix of thin complex zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_elem(rows, cols, ComplexInterval::zero())
    }

    /// Thin complex identity.
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| {
            if i == j {
                ComplexInterval::one()
            } else {
                ComplexInterval::zero()
            }
        })
    }

    /// The all-NaI matrix.
    pub fn all_nai(rows: usize, cols: usize) -> Self {
        Self::from_elem(rows, cols, ComplexInterval::nai())
    }

    /// True when any element carries the NG flag.
    pub fn any_ng(&self) -> bool {
        self.iter().any(ComplexInterval::is_ng)
    }

    /// True when any element is NaI.
    pub fn any_nai(&self) -> bool {
        self.iter().any(ComplexInterval::is_nai)
    }

    /// Midpoints widened to a binary64 complex matrix.
    pub fn mid_c64(&self) -> DMatrix<Complex<f64>> {
        DMatrix::from_fn(self.rows, self.cols, |i, j| {
            Complex::new(
                self[(i, j)].re().mid().to_f64(),
                self[(i, j)].im().mid().to_f64(),
            )
        })
    }

    /// Exact singleton enclosure of a binary64 complex point matrix.
    pub fn enclose_c64(m: &DMatrix<Complex<f64>>) -> Result<Self, VenError> {
        let mut out = Self::zeros(m.nrows(), m.ncols());
        for i in 0..m.nrows() {
            for j in 0..m.ncols() {
                out[(i, j)] = ComplexInterval::from_f64_point(m[(i, j)].re, m[(i, j)].im)?;
            }
        }
        Ok(out)
    }

    /// Splits into real and imaginary interval matrices.
    pub fn re_im_parts(&self) -> (IntervalMatrix<F>, IntervalMatrix<F>) {
        (self.map(|z| *z.re()), self.map(|z| *z.im()))
    }

    /// Rebuilds a complex matrix from equal-shaped component matrices.
    pub fn from_re_im(re: &IntervalMatrix<F>, im: &IntervalMatrix<F>) -> Result<Self, VenError> {
        re.zip_map(im, |r, i| ComplexInterval::new(*r, *i))
    }
}

impl<F: RoundedOps> PointMatrix<F> {
    /// Lifts a point matrix to exact singleton intervals.
    pub fn lift(&self) -> IntervalMatrix<F> {
        self.map(|v| Interval::singleton(*v))
    }
}

impl<F: RoundedOps> ComplexPointMatrix<F> {
    /// Lifts a complex point matrix to exact singleton complex intervals.
    pub fn lift_complex(&self) -> ComplexIntervalMatrix<F> {
        self.map(|z| {
            ComplexInterval::new(Interval::singleton(z.re), Interval::singleton(z.im))
        })
    }
}

/// Lifts a real interval matrix into the complex plane with thin zero
/// imaginary parts.
pub fn complexify<F: RoundedOps>(a: &IntervalMatrix<F>) -> ComplexIntervalMatrix<F> {
    a.map(|iv| ComplexInterval::from_real(*iv))
}
