use nalgebra::base::storage::Storage;
use nalgebra::{DMatrix, Dim, Vector};

/// Matrix of absolute differences, `d[(i, j)] = |x1[i] - x2[j]|`
#[inline]
pub fn abs_distances<R1, R2, S1, S2>(
    x1: &Vector<f64, R1, S1>,
    x2: &Vector<f64, R2, S2>,
) -> DMatrix<f64>
where
    R1: Dim,
    R2: Dim,
    S1: Storage<f64, R1>,
    S2: Storage<f64, R2>,
{
    DMatrix::from_fn(x1.nrows(), x2.nrows(), |i, j| (x1[i] - x2[j]).abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DVector;

    #[test]
    fn distances_are_symmetric_with_zero_diagonal() {
        let xs = DVector::from_column_slice(&[-1.0, 0.5, 3.0]);
        let d = abs_distances(&xs, &xs);
        assert_eq!(d, d.transpose());
        assert!(d.diagonal().iter().all(|&x| x == 0.0));
        assert::close(d[(0, 2)], 4.0, 1E-12);
    }

    #[test]
    fn distances_between_different_sizes() {
        let x1 = DVector::from_column_slice(&[0.0, 1.0]);
        let x2 = DVector::from_column_slice(&[-2.0, 0.0, 2.0]);
        let d = abs_distances(&x1, &x2);
        let expected =
            DMatrix::from_row_slice(2, 3, &[2.0, 0.0, 2.0, 3.0, 1.0, 1.0]);
        assert_eq!(d, expected);
    }
}
