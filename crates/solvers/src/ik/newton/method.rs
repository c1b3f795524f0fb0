use ikarus_core::{Matrix, Scalar, Vector};

/// Strategy for solving `J · Δx ≈ e` for the update step.
///
/// The Jacobian is generally non-square and may be rank-deficient, so each
/// method is a least-squares approximation that never produces NaN from a
/// singular Jacobian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Method<T> {
    /// Damped least squares: `Δx = Jᵀ (J Jᵀ + λ² I)⁻¹ e`.
    ///
    /// Larger `damping` (λ) is more robust near singular configurations but
    /// converges more slowly. With a positive damping the normal matrix is
    /// always invertible.
    DampedLeastSquares { damping: T },

    /// Moore–Penrose pseudo-inverse: `Δx = J⁺ e`.
    ///
    /// Exact Newton steps for well-conditioned Jacobians. For a rank-deficient
    /// Jacobian the step is the minimum-norm least-squares solution, so
    /// directions the Jacobian cannot see are left unchanged while the rest
    /// of the residual is still corrected.
    PseudoInverse,

    /// Jacobian transpose: `Δx = α Jᵀ e` with the step length `α` chosen to
    /// minimize `|e − α J Jᵀ e|`.
    ///
    /// Cheap and always well defined, but converges linearly.
    Transpose,
}

impl<T: Scalar> Default for Method<T> {
    fn default() -> Self {
        Self::DampedLeastSquares {
            damping: T::lit(1e-3),
        }
    }
}

impl<T: Scalar> Method<T> {
    /// Computes the unclamped update step for `jacobian` and `residual`.
    pub(super) fn step<const N: usize, const M: usize>(
        self,
        jacobian: &Matrix<T, M, N>,
        residual: &Vector<T, M>,
    ) -> Vector<T, N> {
        match self {
            Self::DampedLeastSquares { damping } if !damping.is_zero() => {
                damped_least_squares(jacobian, residual, damping * damping)
            }
            Self::DampedLeastSquares { .. } | Self::PseudoInverse => {
                pseudo_inverse(jacobian, residual)
            }
            Self::Transpose => transpose(jacobian, residual),
        }
    }
}

/// Solves the regularized normal equations in whichever dimension is smaller.
///
/// `Jᵀ (J Jᵀ + λ² I)⁻¹` and `(Jᵀ J + λ² I)⁻¹ Jᵀ` are the same operator, so the
/// `M` × `M` form is used when there are no more outputs than inputs and the
/// `N` × `N` form otherwise.
fn damped_least_squares<T: Scalar, const N: usize, const M: usize>(
    jacobian: &Matrix<T, M, N>,
    residual: &Vector<T, M>,
    damping_sq: T,
) -> Vector<T, N> {
    let jt = jacobian.transpose();

    if M <= N {
        let normal = (*jacobian * jt).add_diagonal(damping_sq);
        normal
            .solve(residual)
            .map_or_else(Vector::zeros, |y| jt * y)
    } else {
        let normal = (jt * *jacobian).add_diagonal(damping_sq);
        normal.solve(&(jt * *residual)).unwrap_or_else(Vector::zeros)
    }
}

/// Applies `J⁺ = Jᵀ (J Jᵀ)⁺ = (Jᵀ J)⁺ Jᵀ` through the smaller normal matrix.
fn pseudo_inverse<T: Scalar, const N: usize, const M: usize>(
    jacobian: &Matrix<T, M, N>,
    residual: &Vector<T, M>,
) -> Vector<T, N> {
    let jt = jacobian.transpose();

    if M <= N {
        jt * (*jacobian * jt).pseudo_solve(residual)
    } else {
        (jt * *jacobian).pseudo_solve(&(jt * *residual))
    }
}

fn transpose<T: Scalar, const N: usize, const M: usize>(
    jacobian: &Matrix<T, M, N>,
    residual: &Vector<T, M>,
) -> Vector<T, N> {
    let gradient = jacobian.transpose() * *residual;
    let predicted = *jacobian * gradient;

    let denom = predicted.square_mag();
    if denom.is_zero() {
        return Vector::zeros();
    }

    gradient * (residual.dot(&predicted) / denom)
}
