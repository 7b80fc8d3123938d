//! Matrix operations for the Hill cipher core.
//!
//! Determinants and adjugates are computed exactly over [`BigInt`] by
//! recursive Laplace expansion; reduction into the ring happens only after
//! the full expansion, so intermediate signs are never lost to a premature
//! modulo. Products with ring elements reduce mod m entry by entry.

use crate::errors::HillCryptoError;
use crate::ring::{Matrix, Ring, Vector};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

/// Largest matrix order accepted by the determinant family of operations.
///
/// Laplace expansion visits n! leaf minors. Order 10 is the last one that
/// finishes interactively; anything above is rejected up front.
pub const MAX_ORDER: usize = 10;

/// Checks that `matrix` is square with at least one row, returning its order.
fn square_order(matrix: &Matrix, op: &str) -> Result<usize, HillCryptoError> {
    let n = matrix.len();
    if n == 0 {
        return Err(HillCryptoError::DimensionMismatch(format!(
            "{}: matrix must have at least one row",
            op
        )));
    }
    for (i, row) in matrix.iter().enumerate() {
        if row.len() != n {
            return Err(HillCryptoError::DimensionMismatch(format!(
                "{}: row {} has length {} but expected {}",
                op,
                i,
                row.len(),
                n
            )));
        }
    }
    Ok(n)
}

/// Transposes a rectangular matrix: `t[j][i] = matrix[i][j]`.
///
/// # Errors
///
/// Returns `HillCryptoError::DimensionMismatch` if the rows have
/// inconsistent lengths.
pub fn transpose(matrix: &Matrix) -> Result<Matrix, HillCryptoError> {
    let rows = matrix.len();
    if rows == 0 {
        return Ok(Vec::new());
    }
    let cols = matrix[0].len();
    for (i, row) in matrix.iter().enumerate() {
        if row.len() != cols {
            return Err(HillCryptoError::DimensionMismatch(format!(
                "transpose: row {} has length {} but expected {}",
                i,
                row.len(),
                cols
            )));
        }
    }

    let mut t = vec![vec![0i64; rows]; cols];
    for (i, row) in matrix.iter().enumerate() {
        for (j, &val) in row.iter().enumerate() {
            t[j][i] = val;
        }
    }
    Ok(t)
}

/// Returns `matrix` with row `i` and column `j` removed.
///
/// # Errors
///
/// Returns `HillCryptoError::DimensionMismatch` if the matrix is not square
/// or the indices are out of range.
pub fn minor(matrix: &Matrix, i: usize, j: usize) -> Result<Matrix, HillCryptoError> {
    let n = square_order(matrix, "minor")?;
    if i >= n || j >= n {
        return Err(HillCryptoError::DimensionMismatch(format!(
            "minor: indices ({}, {}) out of range for order {}",
            i, j, n
        )));
    }

    let sub = matrix
        .iter()
        .enumerate()
        .filter(|&(row_idx, _)| row_idx != i)
        .map(|(_, row)| {
            row.iter()
                .enumerate()
                .filter(|&(col_idx, _)| col_idx != j)
                .map(|(_, &val)| val)
                .collect()
        })
        .collect();
    Ok(sub)
}

/// Laplace expansion along row 0. `matrix` is already known square.
fn laplace(matrix: &Matrix) -> BigInt {
    let n = matrix.len();
    if n == 1 {
        return BigInt::from(matrix[0][0]);
    }
    if n == 2 {
        return BigInt::from(matrix[0][0]) * BigInt::from(matrix[1][1])
            - BigInt::from(matrix[0][1]) * BigInt::from(matrix[1][0]);
    }

    let mut det = BigInt::zero();
    for j in 0..n {
        let sub = matrix
            .iter()
            .skip(1)
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|&(col_idx, _)| col_idx != j)
                    .map(|(_, &val)| val)
                    .collect()
            })
            .collect();
        let term = BigInt::from(matrix[0][j]) * laplace(&sub);
        if j % 2 == 0 {
            det += term;
        } else {
            det -= term;
        }
    }
    det
}

/// Computes the exact determinant by recursive cofactor expansion along
/// row 0.
///
/// The value is exact, not modular; reduce it afterwards with
/// [`determinant_mod`] when a ring residue is needed.
///
/// # Errors
///
/// Returns `HillCryptoError::DimensionMismatch` for non-square input and
/// `HillCryptoError::UnsupportedOrder` above [`MAX_ORDER`].
pub fn determinant(matrix: &Matrix) -> Result<BigInt, HillCryptoError> {
    let n = square_order(matrix, "determinant")?;
    if n > MAX_ORDER {
        return Err(HillCryptoError::UnsupportedOrder(format!(
            "determinant: order {} exceeds the cofactor-expansion ceiling of {}",
            n, MAX_ORDER
        )));
    }
    Ok(laplace(matrix))
}

/// Determinant reduced into `[0, m)`.
pub fn determinant_mod(matrix: &Matrix, ring: &Ring) -> Result<i64, HillCryptoError> {
    let det = determinant(matrix)?;
    let modulus = BigInt::from(ring.modulus());
    det.mod_floor(&modulus)
        .to_i64()
        .ok_or(HillCryptoError::CalculationOverflow)
}

/// Exact cofactor matrix: `c[i][j] = (-1)^(i+j) * det(minor(matrix, i, j))`.
fn cofactors(matrix: &Matrix) -> Result<Vec<Vec<BigInt>>, HillCryptoError> {
    let n = matrix.len();
    let mut c = vec![vec![BigInt::zero(); n]; n];
    for i in 0..n {
        for j in 0..n {
            let det = laplace(&minor(matrix, i, j)?);
            c[i][j] = if (i + j) % 2 == 0 { det } else { -det };
        }
    }
    Ok(c)
}

/// Computes the adjugate: the transpose of the cofactor matrix.
///
/// A 1x1 matrix adjugates to `[[1]]`. Entries are exact integers.
///
/// # Errors
///
/// Same dimension and order errors as [`determinant`], plus
/// `HillCryptoError::CalculationOverflow` if an exact cofactor does not fit
/// in an `i64`.
pub fn adjugate(matrix: &Matrix) -> Result<Matrix, HillCryptoError> {
    let n = square_order(matrix, "adjugate")?;
    if n > MAX_ORDER {
        return Err(HillCryptoError::UnsupportedOrder(format!(
            "adjugate: order {} exceeds the cofactor-expansion ceiling of {}",
            n, MAX_ORDER
        )));
    }
    if n == 1 {
        return Ok(vec![vec![1]]);
    }

    let c = cofactors(matrix)?;
    let mut cof = vec![vec![0i64; n]; n];
    for i in 0..n {
        for j in 0..n {
            cof[i][j] = c[i][j]
                .to_i64()
                .ok_or(HillCryptoError::CalculationOverflow)?;
        }
    }
    transpose(&cof)
}

/// A·x mod m, where A is n×n and x has length n.
///
/// # Errors
///
/// Returns `HillCryptoError::DimensionMismatch` if the vector length does
/// not match the matrix order.
pub fn matrix_vector_mul(
    matrix: &Matrix,
    x: &Vector,
    ring: &Ring,
) -> Result<Vector, HillCryptoError> {
    let n = square_order(matrix, "matrix_vector_mul")?;
    if x.len() != n {
        return Err(HillCryptoError::DimensionMismatch(format!(
            "matrix_vector_mul: matrix order ({}) must match vector length ({})",
            n,
            x.len()
        )));
    }

    let mut y = vec![0i64; n];
    for (i, row) in matrix.iter().enumerate() {
        let mut sum = 0i64;
        for (j, &val) in row.iter().enumerate() {
            let term = ring.mul(val, x[j]);
            sum = ring.add(sum, term);
        }
        y[i] = sum;
    }
    Ok(y)
}

/// Computes the matrix product `C = AB` mod m.
///
/// # Errors
///
/// Returns `HillCryptoError::DimensionMismatch` if the inner dimensions do
/// not match or rows have inconsistent lengths.
pub fn matrix_mul(a: &Matrix, b: &Matrix, ring: &Ring) -> Result<Matrix, HillCryptoError> {
    let n = a.len();
    if n == 0 {
        return Ok(Matrix::new());
    }
    let inner = a[0].len();
    if b.len() != inner {
        return Err(HillCryptoError::DimensionMismatch(format!(
            "matrix_mul: inner dimensions must match ({} vs {})",
            inner,
            b.len()
        )));
    }
    let p = b[0].len();

    let mut c = vec![vec![0i64; p]; n];
    for i in 0..n {
        if a[i].len() != inner {
            return Err(HillCryptoError::DimensionMismatch(format!(
                "matrix_mul: matrix A row {} has incorrect length (expected {})",
                i, inner
            )));
        }
        for j in 0..p {
            let mut sum = 0i64;
            for (k, b_row) in b.iter().enumerate() {
                if b_row.len() != p {
                    return Err(HillCryptoError::DimensionMismatch(format!(
                        "matrix_mul: matrix B row {} has incorrect length (expected {})",
                        k, p
                    )));
                }
                let term = ring.mul(a[i][k], b_row[j]);
                sum = ring.add(sum, term);
            }
            c[i][j] = sum;
        }
    }
    Ok(c)
}

/// Creates an identity matrix of size `n`.
pub fn identity_matrix(n: usize) -> Matrix {
    let mut identity = vec![vec![0; n]; n];
    #[allow(clippy::needless_range_loop)]
    for i in 0..n {
        identity[i][i] = 1;
    }
    identity
}

/// Attempts to find the inverse of a square matrix modulo `m`.
///
/// Computes `det(matrix) mod m`, its scalar inverse in the ring, and scales
/// the exact adjugate by it, with every entry canonicalized into `[0, m)`.
/// Satisfies `matrix · inverse ≡ I (mod m)` whenever it succeeds.
///
/// # Errors
///
/// Returns [`HillCryptoError::NoInverse`] when `gcd(det, m) != 1`. The
/// matrix is simply not invertible under this modulus; the caller picks a
/// different key or modulus and retries.
pub fn matrix_inverse(matrix: &Matrix, ring: &Ring) -> Result<Matrix, HillCryptoError> {
    let n = square_order(matrix, "matrix_inverse")?;

    let det = determinant_mod(matrix, ring)?;
    let inv_det = ring.inv(det)?;

    if n == 1 {
        return Ok(vec![vec![inv_det]]);
    }

    let modulus = BigInt::from(ring.modulus());
    let c = cofactors(matrix)?;
    let mut inverse = vec![vec![0i64; n]; n];
    for i in 0..n {
        for j in 0..n {
            let entry = c[j][i]
                .mod_floor(&modulus)
                .to_i64()
                .ok_or(HillCryptoError::CalculationOverflow)?;
            inverse[i][j] = ring.mul(entry, inv_det);
        }
    }
    Ok(inverse)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_26() -> Ring {
        Ring::try_with(26).unwrap()
    }

    #[test]
    fn test_transpose_rectangular() {
        let m = vec![vec![1, 2, 3], vec![4, 5, 6]];
        let expected = vec![vec![1, 4], vec![2, 5], vec![3, 6]];
        assert_eq!(transpose(&m).unwrap(), expected);
    }

    #[test]
    fn test_transpose_ragged_rows() {
        let m = vec![vec![1, 2], vec![3]];
        assert!(transpose(&m).is_err());
    }

    #[test]
    fn test_minor_removes_row_and_column() {
        let m = vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]];
        assert_eq!(minor(&m, 0, 0).unwrap(), vec![vec![5, 6], vec![8, 9]]);
        assert_eq!(minor(&m, 1, 2).unwrap(), vec![vec![1, 2], vec![7, 8]]);
        assert!(minor(&m, 3, 0).is_err());
    }

    #[test]
    fn test_determinant_2x2_exact() {
        let m = vec![vec![1, 2], vec![3, 5]];
        assert_eq!(determinant(&m).unwrap(), BigInt::from(-1));
    }

    #[test]
    fn test_determinant_1x1_and_3x3() {
        assert_eq!(determinant(&vec![vec![7]]).unwrap(), BigInt::from(7));

        // det = 1*(0 - 24) - 2*(0 - 20) + 3*(0 - 5) = 1
        let m = vec![vec![1, 2, 3], vec![0, 1, 4], vec![5, 6, 0]];
        assert_eq!(determinant(&m).unwrap(), BigInt::from(1));
    }

    #[test]
    fn test_determinant_rejects_non_square() {
        let m = vec![vec![1, 2, 3], vec![4, 5, 6]];
        assert!(matches!(
            determinant(&m),
            Err(HillCryptoError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_determinant_order_ceiling() {
        let too_big = identity_matrix(MAX_ORDER + 1);
        assert!(matches!(
            determinant(&too_big),
            Err(HillCryptoError::UnsupportedOrder(_))
        ));
        assert!(determinant(&identity_matrix(MAX_ORDER)).is_ok());
    }

    #[test]
    fn test_determinant_mod_negative_value() {
        let ring = ring_26();
        let m = vec![vec![1, 2], vec![3, 5]];
        // det = -1, canonicalized to 25.
        assert_eq!(determinant_mod(&m, &ring).unwrap(), 25);
    }

    #[test]
    fn test_adjugate_2x2() {
        let m = vec![vec![1, 2], vec![3, 5]];
        let expected = vec![vec![5, -2], vec![-3, 1]];
        assert_eq!(adjugate(&m).unwrap(), expected);
    }

    #[test]
    fn test_adjugate_1x1() {
        assert_eq!(adjugate(&vec![vec![9]]).unwrap(), vec![vec![1]]);
    }

    #[test]
    fn test_adjugate_identity_property() {
        // M * adj(M) = det(M) * I, exactly.
        let m = vec![vec![2, 0, 1], vec![1, 3, 2], vec![1, 1, 4]];
        let det = determinant(&m).unwrap().to_i64().unwrap();
        let adj = adjugate(&m).unwrap();

        let n = m.len();
        for i in 0..n {
            for j in 0..n {
                let cell: i64 = (0..n).map(|k| m[i][k] * adj[k][j]).sum();
                let expected = if i == j { det } else { 0 };
                assert_eq!(cell, expected);
            }
        }
    }

    #[test]
    fn test_matrix_vector_mul_mod() {
        let ring = ring_26();
        let m = vec![vec![1, 2], vec![3, 5]];
        let x = vec![12, 5];
        // R1: 12 + 10 = 22; R2: 36 + 25 = 61 = 9 mod 26
        assert_eq!(matrix_vector_mul(&m, &x, &ring).unwrap(), vec![22, 9]);
    }

    #[test]
    fn test_matrix_vector_mul_dimension_mismatch() {
        let ring = ring_26();
        let m = vec![vec![1, 2], vec![3, 5]];
        assert!(matrix_vector_mul(&m, &vec![1, 2, 3], &ring).is_err());
    }

    #[test]
    fn test_matrix_inverse_ok() {
        let ring = ring_26();
        let matrix = vec![vec![3, 3], vec![2, 5]];
        // det = 9, 9^-1 = 3 mod 26, adj = [[5, -3], [-2, 3]]
        // inv = 3 * [[5, 23], [24, 3]] = [[15, 17], [20, 9]] mod 26
        let expected_inv = vec![vec![15, 17], vec![20, 9]];
        assert_eq!(matrix_inverse(&matrix, &ring).unwrap(), expected_inv);

        let product = matrix_mul(&matrix, &expected_inv, &ring).unwrap();
        assert_eq!(product, identity_matrix(2));
    }

    #[test]
    fn test_matrix_inverse_self_inverse_determinant() {
        let ring = ring_26();
        let matrix = vec![vec![1, 2], vec![3, 5]];
        // det = -1 = 25 mod 26, which is its own scalar inverse.
        let inverse = matrix_inverse(&matrix, &ring).unwrap();
        assert_eq!(inverse, vec![vec![21, 2], vec![3, 25]]);

        let product = matrix_mul(&matrix, &inverse, &ring).unwrap();
        assert_eq!(product, identity_matrix(2));
    }

    #[test]
    fn test_matrix_inverse_3x3_round_trip() {
        let ring = ring_26();
        let matrix = vec![vec![6, 24, 1], vec![13, 16, 10], vec![20, 17, 15]];
        let inverse = matrix_inverse(&matrix, &ring).unwrap();

        let product = matrix_mul(&matrix, &inverse, &ring).unwrap();
        assert_eq!(product, identity_matrix(3));
    }

    #[test]
    fn test_matrix_inverse_singular() {
        let ring = ring_26();
        let matrix = vec![vec![1, 2], vec![2, 4]]; // det = 0
        assert!(matches!(
            matrix_inverse(&matrix, &ring),
            Err(HillCryptoError::NoInverse(_))
        ));
    }

    #[test]
    fn test_matrix_inverse_gcd_shares_factor() {
        let ring = ring_26();
        // det = 2, gcd(2, 26) = 2: no inverse even though det != 0.
        let matrix = vec![vec![2, 0], vec![0, 1]];
        assert!(matches!(
            matrix_inverse(&matrix, &ring),
            Err(HillCryptoError::NoInverse(_))
        ));
    }

    #[test]
    fn test_matrix_inverse_1x1() {
        let ring = ring_26();
        let matrix = vec![vec![3]];
        assert_eq!(matrix_inverse(&matrix, &ring).unwrap(), vec![vec![9]]);
    }

    #[test]
    fn test_identity_matrix() {
        let expected3 = vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]];
        assert_eq!(identity_matrix(3), expected3);
        assert_eq!(identity_matrix(1), vec![vec![1]]);
    }
}
