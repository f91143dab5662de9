use nalgebra::DMatrix;

/// Lower-triangular Cholesky factor, `a = L·Lᵀ`.
///
/// Computed row by row (Cholesky–Banachiewicz). Nothing is checked: if `a`
/// is not positive-definite the factor contains `NaN` (or infinite) entries
/// instead of an error. Use [`cholesky_checked`] to detect that.
///
/// Only the lower triangle of `a` is read.
///
/// # Panics
/// If `a` is not square.
///
/// # Example
///
/// ```
/// # use gpviz::misc::cholesky;
/// use nalgebra::DMatrix;
///
/// let a = DMatrix::from_row_slice(2, 2, &[4.0, 2.0, 2.0, 3.0]);
/// let l = cholesky(&a);
///
/// assert!((&l * l.transpose()).relative_eq(&a, 1E-12, 1E-12));
/// assert_eq!(l[(0, 1)], 0.0);
/// ```
pub fn cholesky(a: &DMatrix<f64>) -> DMatrix<f64> {
    assert!(a.is_square(), "Cholesky requires a square matrix");
    let n = a.nrows();
    let mut l: DMatrix<f64> = DMatrix::zeros(n, n);

    for r in 0..n {
        for c in 0..=r {
            let sum: f64 = (0..c).map(|i| l[(r, i)] * l[(c, i)]).sum();
            l[(r, c)] = if r == c {
                (a[(r, r)] - sum).sqrt()
            } else {
                (a[(r, c)] - sum) / l[(c, c)]
            };
        }
    }
    l
}

/// Cholesky factor that returns `None` when any entry is not finite, which
/// happens when `a` is not (numerically) positive-definite.
pub fn cholesky_checked(a: &DMatrix<f64>) -> Option<DMatrix<f64>> {
    let l = cholesky(a);
    if l.iter().all(|x| x.is_finite()) {
        Some(l)
    } else {
        None
    }
}
