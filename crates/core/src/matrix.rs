//! Dense fixed-size matrices.
//!
//! A [`Matrix<T, M, N>`] has `M` rows and `N` columns stored row-major. It is
//! the Jacobian representation for a map from `N` inputs to `M` outputs, so
//! `jacobian[(i, j)]` is the partial derivative of output `i` with respect to
//! input `j`.

use std::{
    cmp::Ordering,
    fmt,
    ops::{Add, Index, IndexMut, Mul, Sub},
};

use crate::{Scalar, Vector};

/// Upper bound on Jacobi sweeps; convergence is quadratic, so a handful
/// normally suffice.
const MAX_JACOBI_SWEEPS: usize = 64;

/// An `M` × `N` matrix stored row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<T, const M: usize, const N: usize>([[T; N]; M]);

impl<T, const M: usize, const N: usize> Matrix<T, M, N> {
    /// Creates a matrix from an array of rows.
    pub const fn from_rows(rows: [[T; N]; M]) -> Self {
        Self(rows)
    }

    /// Creates a matrix by calling `f` with each `(row, col)` index.
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> T) -> Self {
        Self(std::array::from_fn(|r| std::array::from_fn(|c| f(r, c))))
    }

    /// Returns the rows as a nested array reference.
    #[must_use]
    pub const fn as_rows(&self) -> &[[T; N]; M] {
        &self.0
    }
}

impl<T: Scalar, const M: usize, const N: usize> Matrix<T, M, N> {
    /// Returns the zero matrix.
    #[must_use]
    pub fn zeros() -> Self {
        Self([[T::zero(); N]; M])
    }

    /// Returns row `r` as a vector.
    ///
    /// # Panics
    ///
    /// Panics if `r >= M`.
    #[must_use]
    pub fn row(&self, r: usize) -> Vector<T, N> {
        Vector::from_array(self.0[r])
    }

    /// Returns column `c` as a vector.
    ///
    /// # Panics
    ///
    /// Panics if `c >= N`.
    #[must_use]
    pub fn column(&self, c: usize) -> Vector<T, M> {
        Vector::from_fn(|r| self.0[r][c])
    }

    /// Overwrites row `r`.
    ///
    /// # Panics
    ///
    /// Panics if `r >= M`.
    pub fn set_row(&mut self, r: usize, row: &Vector<T, N>) {
        self.0[r] = *row.as_array();
    }

    /// Overwrites column `c`.
    ///
    /// # Panics
    ///
    /// Panics if `c >= N`.
    pub fn set_column(&mut self, c: usize, column: &Vector<T, M>) {
        for (row, &value) in self.0.iter_mut().zip(column.iter()) {
            row[c] = value;
        }
    }

    /// Returns the transpose.
    #[must_use]
    pub fn transpose(&self) -> Matrix<T, N, M> {
        Matrix::from_fn(|r, c| self.0[c][r])
    }

    /// Returns the largest absolute entry, or zero for an empty matrix.
    #[must_use]
    pub fn max_abs_entry(&self) -> T {
        self.0.iter().flatten().fold(T::zero(), |max, e| {
            if e.abs() > max { e.abs() } else { max }
        })
    }

    /// Returns `true` if every entry is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().flatten().all(|e| e.is_finite())
    }
}

impl<T: Scalar, const N: usize> Matrix<T, N, N> {
    /// Returns the identity matrix.
    #[must_use]
    pub fn identity() -> Self {
        Self::from_fn(|r, c| if r == c { T::one() } else { T::zero() })
    }

    /// Returns a copy with `value` added to every diagonal entry.
    #[must_use]
    pub fn add_diagonal(mut self, value: T) -> Self {
        for (i, row) in self.0.iter_mut().enumerate() {
            row[i] = row[i] + value;
        }
        self
    }

    /// Solves `self · x = rhs` by Gaussian elimination with partial pivoting.
    ///
    /// Returns `None` if the matrix is singular to working precision, meaning
    /// some pivot is non-finite or no larger than `N · ε · max|a_ij|`.
    #[must_use]
    pub fn solve(&self, rhs: &Vector<T, N>) -> Option<Vector<T, N>> {
        let mut a = self.0;
        let mut b = *rhs.as_array();

        #[allow(clippy::cast_precision_loss)]
        let tiny = T::epsilon() * self.max_abs_entry() * T::lit(N as f64);

        for col in 0..N {
            let pivot_row = (col..N).max_by(|&i, &j| {
                a[i][col]
                    .abs()
                    .partial_cmp(&a[j][col].abs())
                    .unwrap_or(Ordering::Equal)
            })?;

            let pivot = a[pivot_row][col];
            if !pivot.is_finite() || pivot.abs() <= tiny {
                return None;
            }

            a.swap(col, pivot_row);
            b.swap(col, pivot_row);

            for row in col + 1..N {
                let factor = a[row][col] / pivot;
                if factor.is_zero() {
                    continue;
                }
                for k in col..N {
                    a[row][k] = a[row][k] - factor * a[col][k];
                }
                b[row] = b[row] - factor * b[col];
            }
        }

        let mut x = [T::zero(); N];
        for row in (0..N).rev() {
            let tail = (row + 1..N).fold(T::zero(), |acc, k| acc + a[row][k] * x[k]);
            x[row] = (b[row] - tail) / a[row][row];
        }

        let x = Vector::from_array(x);
        x.is_finite().then_some(x)
    }

    /// Diagonalizes a symmetric matrix by cyclic Jacobi rotations.
    ///
    /// Returns the eigenvalues and a matrix whose columns are the matching
    /// unit eigenvectors, so `self ≈ V · diag(λ) · Vᵀ`. Only the symmetric
    /// part of `self` is meaningful.
    #[must_use]
    pub fn symmetric_eigen(&self) -> (Vector<T, N>, Self) {
        let mut a = self.0;
        let mut v = Self::identity().0;

        for _ in 0..MAX_JACOBI_SWEEPS {
            let mut diagonal = T::zero();
            let mut off_diagonal = T::zero();
            for (r, row) in a.iter().enumerate() {
                for (c, &e) in row.iter().enumerate() {
                    if r == c {
                        diagonal = diagonal + e * e;
                    } else {
                        off_diagonal = off_diagonal + e * e;
                    }
                }
            }
            if off_diagonal <= T::epsilon() * T::epsilon() * diagonal {
                break;
            }

            for p in 0..N {
                for q in p + 1..N {
                    let apq = a[p][q];
                    if apq.is_zero() {
                        continue;
                    }

                    // Rotation angle that zeroes a[p][q].
                    let theta = (a[q][q] - a[p][p]) / (apq + apq);
                    let t = theta.signum() / (theta.abs() + theta.hypot(T::one()));
                    let c = (t * t + T::one()).sqrt().recip();
                    let s = t * c;

                    for row in &mut a {
                        let (kp, kq) = (row[p], row[q]);
                        row[p] = c * kp - s * kq;
                        row[q] = s * kp + c * kq;
                    }
                    for k in 0..N {
                        let (pk, qk) = (a[p][k], a[q][k]);
                        a[p][k] = c * pk - s * qk;
                        a[q][k] = s * pk + c * qk;
                    }
                    for row in &mut v {
                        let (kp, kq) = (row[p], row[q]);
                        row[p] = c * kp - s * kq;
                        row[q] = s * kp + c * kq;
                    }
                }
            }
        }

        (Vector::from_fn(|i| a[i][i]), Self(v))
    }

    /// Returns the minimum-norm least-squares solution of `self · x = rhs`
    /// for a symmetric matrix.
    ///
    /// This applies the Moore–Penrose pseudo-inverse through
    /// [`symmetric_eigen`](Self::symmetric_eigen). Eigenvalues no larger than
    /// `N · ε · max|λ|` are treated as zero, so a singular matrix still
    /// yields a finite solution. Returns the zero vector if the decomposition
    /// is not finite.
    #[must_use]
    pub fn pseudo_solve(&self, rhs: &Vector<T, N>) -> Vector<T, N> {
        let (values, vectors) = self.symmetric_eigen();
        let largest = values.max_abs_component().unwrap_or_else(T::zero);

        #[allow(clippy::cast_precision_loss)]
        let tiny = T::epsilon() * largest * T::lit(N as f64);

        let projected = vectors.transpose() * *rhs;
        let scaled = Vector::from_fn(|i| {
            if values[i].abs() > tiny {
                projected[i] / values[i]
            } else {
                T::zero()
            }
        });

        let x = vectors * scaled;
        if x.is_finite() { x } else { Vector::zeros() }
    }
}

impl<T: Scalar, const M: usize, const N: usize> Default for Matrix<T, M, N> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<T, const M: usize, const N: usize> From<[[T; N]; M]> for Matrix<T, M, N> {
    fn from(rows: [[T; N]; M]) -> Self {
        Self(rows)
    }
}

impl<T, const M: usize, const N: usize> Index<(usize, usize)> for Matrix<T, M, N> {
    type Output = T;

    fn index(&self, (r, c): (usize, usize)) -> &T {
        &self.0[r][c]
    }
}

impl<T, const M: usize, const N: usize> IndexMut<(usize, usize)> for Matrix<T, M, N> {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut T {
        &mut self.0[r][c]
    }
}

impl<T: Scalar, const M: usize, const N: usize> Add for Matrix<T, M, N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_fn(|r, c| self.0[r][c] + rhs.0[r][c])
    }
}

impl<T: Scalar, const M: usize, const N: usize> Sub for Matrix<T, M, N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_fn(|r, c| self.0[r][c] - rhs.0[r][c])
    }
}

impl<T: Scalar, const M: usize, const N: usize> Mul<T> for Matrix<T, M, N> {
    type Output = Self;

    fn mul(self, scalar: T) -> Self {
        Self::from_fn(|r, c| self.0[r][c] * scalar)
    }
}

impl<T: Scalar, const M: usize, const N: usize> Mul<Vector<T, N>> for Matrix<T, M, N> {
    type Output = Vector<T, M>;

    fn mul(self, v: Vector<T, N>) -> Vector<T, M> {
        Vector::from_fn(|r| self.row(r).dot(&v))
    }
}

impl<T: Scalar, const M: usize, const N: usize, const P: usize> Mul<Matrix<T, N, P>>
    for Matrix<T, M, N>
{
    type Output = Matrix<T, M, P>;

    fn mul(self, rhs: Matrix<T, N, P>) -> Matrix<T, M, P> {
        Matrix::from_fn(|r, c| (0..N).fold(T::zero(), |acc, k| acc + self.0[r][k] * rhs.0[k][c]))
    }
}

impl<T: fmt::Display, const M: usize, const N: usize> fmt::Display for Matrix<T, M, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (r, row) in self.0.iter().enumerate() {
            if r > 0 {
                write!(f, ", ")?;
            }
            write!(f, "(")?;
            for (c, entry) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, ", ")?;
                }
                fmt::Display::fmt(entry, f)?;
            }
            write!(f, ")")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{Vector2, Vector3};

    #[test]
    fn indexing_is_row_major() {
        let m = Matrix::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);

        assert_eq!(m[(0, 2)], 3.0);
        assert_eq!(m[(1, 0)], 4.0);
        assert_eq!(m.row(1), Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(m.column(1), Vector2::new(2.0, 5.0));
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let m = Matrix::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let t = m.transpose();

        assert_eq!(t, Matrix::from_rows([[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]]));
    }

    #[test]
    fn set_row_and_column() {
        let mut m = Matrix::<f64, 2, 2>::zeros();
        m.set_row(0, &Vector2::new(1.0, 2.0));
        m.set_column(1, &Vector2::new(7.0, 8.0));

        assert_eq!(m, Matrix::from_rows([[1.0, 7.0], [0.0, 8.0]]));
    }

    #[test]
    fn matrix_vector_product() {
        let m = Matrix::from_rows([[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        let v = Vector2::new(1.0, -1.0);

        assert_eq!(m * v, Vector3::new(-1.0, -1.0, -1.0));
    }

    #[test]
    fn matrix_matrix_product() {
        let a = Matrix::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        let b = Matrix::from_rows([[0.0, 1.0], [1.0, 0.0]]);

        assert_eq!(a * b, Matrix::from_rows([[2.0, 1.0], [4.0, 3.0]]));
        assert_eq!(a * Matrix::identity(), a);
    }

    #[test]
    fn add_diagonal_only_touches_diagonal() {
        let m = Matrix::from_rows([[1.0, 2.0], [3.0, 4.0]]).add_diagonal(0.5);
        assert_eq!(m, Matrix::from_rows([[1.5, 2.0], [3.0, 4.5]]));
    }

    #[test]
    fn solve_recovers_known_solution() {
        let a = Matrix::from_rows([[2.0, 1.0, -1.0], [-3.0, -1.0, 2.0], [-2.0, 1.0, 2.0]]);
        let b = Vector3::new(8.0, -11.0, -3.0);

        let x = a.solve(&b).expect("non-singular system");

        assert_relative_eq!(x.x(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(x.y(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(x.z(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn solve_needs_pivoting() {
        // Zero in the leading position requires a row swap.
        let a = Matrix::from_rows([[0.0, 1.0], [1.0, 0.0]]);
        let x = a.solve(&Vector2::new(3.0, 4.0)).expect("permutation matrix");

        assert_eq!(x, Vector2::new(4.0, 3.0));
    }

    #[test]
    fn solve_rejects_singular_matrix() {
        let a = Matrix::from_rows([[1.0, 2.0], [2.0, 4.0]]);
        assert!(a.solve(&Vector2::new(1.0, 1.0)).is_none());

        let zero = Matrix::<f64, 3, 3>::zeros();
        assert!(zero.solve(&Vector3::new(1.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn solve_rejects_non_finite_matrix() {
        let a = Matrix::from_rows([[f64::NAN, 0.0], [0.0, 1.0]]);
        assert!(a.solve(&Vector2::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn elementwise_add_and_sub() {
        let a = Matrix::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        let b = Matrix::from_rows([[0.5, -1.0], [2.0, 0.0]]);

        assert_eq!((a + b).as_rows(), &[[1.5, 1.0], [5.0, 4.0]]);
        assert_eq!(a - b, Matrix::from_rows([[0.5, 3.0], [1.0, 4.0]]));
    }

    #[test]
    fn symmetric_eigen_reconstructs_matrix() {
        let a = Matrix::from_rows([[4.0, 1.0, -2.0], [1.0, 2.0, 0.5], [-2.0, 0.5, 3.0]]);

        let (values, vectors) = a.symmetric_eigen();
        let diagonal = Matrix::from_fn(|r, c| if r == c { values[r] } else { 0.0 });
        let rebuilt = vectors * diagonal * vectors.transpose();
        let gram = vectors.transpose() * vectors;

        for r in 0..3 {
            for c in 0..3 {
                assert_relative_eq!(rebuilt[(r, c)], a[(r, c)], epsilon = 1e-12);
                assert_relative_eq!(gram[(r, c)], Matrix::<f64, 3, 3>::identity()[(r, c)], epsilon = 1e-12);
            }
        }
        assert_relative_eq!(values.iter().sum::<f64>(), 9.0, epsilon = 1e-12);
    }

    #[test]
    fn pseudo_solve_matches_solve_when_invertible() {
        let a = Matrix::from_rows([[4.0, 2.0], [2.0, 3.0]]);
        let b = Vector2::new(2.0, -1.0);

        let exact = a.solve(&b).expect("positive definite");
        let pseudo = a.pseudo_solve(&b);

        assert_relative_eq!(pseudo.x(), exact.x(), epsilon = 1e-12);
        assert_relative_eq!(pseudo.y(), exact.y(), epsilon = 1e-12);
    }

    #[test]
    fn pseudo_solve_gives_minimum_norm_solution_for_singular_matrix() {
        // Rank one: every solution of x + y = 1 solves the system, and the
        // shortest is (0.5, 0.5).
        let a = Matrix::from_rows([[2.0, 2.0], [2.0, 2.0]]);
        let b = Vector2::new(2.0, 2.0);
        assert!(a.solve(&b).is_none());

        let x = a.pseudo_solve(&b);

        assert_relative_eq!(x.x(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(x.y(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn pseudo_solve_of_zero_or_non_finite_matrix_is_zero() {
        let b = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(Matrix::<f64, 3, 3>::zeros().pseudo_solve(&b), Vector3::zeros());

        let nan = Matrix::from_rows([[f64::NAN, 0.0], [0.0, 1.0]]);
        assert_eq!(nan.pseudo_solve(&Vector2::new(1.0, 1.0)), Vector2::zeros());
    }

    #[test]
    fn displays_rows() {
        let m = Matrix::from_rows([[1.0, 2.0], [3.0, 4.5]]);
        assert_eq!(m.to_string(), "[(1, 2), (3, 4.5)]");
    }
}
