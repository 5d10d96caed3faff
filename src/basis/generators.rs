use crate::error::{BasisError, Result};
use nalgebra::{DMatrix, DVector};
use std::cmp::Ordering;

/// Generate a sequence of `nf` even tempered exponents according to
/// zeta_i = alpha * beta^i, i = 0, ..., nf - 1
pub fn eventemp(nf: usize, params: &[f64]) -> Result<Vec<f64>> {
    if params.len() != 2 {
        return Err(BasisError::Value(format!(
            "\"params\" tuple should have exactly 2 entries, got {}",
            params.len()
        )));
    }
    let (alpha, beta): (f64, f64) = (params[0], params[1]);
    Ok((0..nf).map(|i| alpha * beta.powf(i as f64)).collect())
}

/// Generate a sequence of `nf` well tempered exponents according to
/// zeta_i = alpha * beta^i * [1 + gamma * ((i + 1) / nf)^delta], i = 0, ..., nf - 1
pub fn welltemp(nf: usize, params: &[f64]) -> Result<Vec<f64>> {
    if params.len() != 4 {
        return Err(BasisError::Value(format!(
            "\"params\" tuple should have exactly 4 entries, got {}",
            params.len()
        )));
    }
    let (alpha, beta, gamma, delta): (f64, f64, f64, f64) =
        (params[0], params[1], params[2], params[3]);
    Ok((0..nf)
        .map(|i| {
            let ratio: f64 = (i + 1) as f64 / nf as f64;
            alpha * beta.powf(i as f64) * (1.0 + gamma * ratio.powf(delta))
        })
        .collect())
}

/// Generate a sequence of `nf` exponents from an expansion of ln(zeta) in Legendre
/// polynomials, see G. A. Petersson et al., J. Chem. Phys. 118, 1101 (2003).
/// A single coefficient describes one function, [exp(c_0)] is returned for every `nf`.
pub fn legendre(nf: usize, coeffs: &[f64]) -> Result<Vec<f64>> {
    if coeffs.is_empty() {
        return Err(BasisError::Value(
            "\"coeffs\" tuple should have at least 1 entry, got 0".to_string(),
        ));
    }
    if coeffs.len() == 1 {
        return Ok(vec![coeffs[0].exp()]);
    }
    if nf == 1 {
        return Err(BasisError::Value(format!(
            "{} expansion coefficients cannot be evaluated for a single function",
            coeffs.len()
        )));
    }
    Ok((0..nf)
        .map(|i| legendre_series(coeffs, abscissa(i, nf)).exp())
        .collect())
}

/// Least squares fit of the logarithm of the exponents `zetas` to a Legendre expansion
/// of length `kmax`. The exponents are sorted in ascending order before the fit.
pub fn zetas2legendre(zetas: &[f64], kmax: usize) -> Result<Vec<f64>> {
    if kmax == 0 {
        return Err(BasisError::Value("kmax has to be at least 1".to_string()));
    }
    if zetas.len() < 2 {
        return Err(BasisError::Value(format!(
            "at least 2 exponents are needed for the fit, got {}",
            zetas.len()
        )));
    }
    if zetas.iter().any(|z| !(*z > 0.0)) {
        return Err(BasisError::Value("exponents have to be positive".to_string()));
    }
    let mut sorted: Vec<f64> = zetas.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let n: usize = sorted.len();

    // design matrix a[j, k] = P_k(x_j)
    let a: DMatrix<f64> = DMatrix::from_fn(n, kmax, |j, k| legendre_polynomial(k, abscissa(j, n)));
    let b: DVector<f64> = DVector::from_iterator(n, sorted.iter().map(|z| z.ln()));

    let svd = a.svd(true, true);
    let coeffs: DVector<f64> = svd
        .solve(&b, 1.0e-14)
        .map_err(|message| BasisError::Value(message.to_string()))?;
    Ok(coeffs.iter().copied().collect())
}

/// Evenly spaced points between -1 and 1, the i-th of n.
pub fn abscissa(i: usize, n: usize) -> f64 {
    (2.0 * (i as f64 + 1.0) - 2.0) / (n as f64 - 1.0) - 1.0
}

/// Value of the Legendre polynomial P_k at x from Bonnet's recursion
/// (n + 1) P_{n+1} = (2n + 1) x P_n - n P_{n-1}
pub fn legendre_polynomial(k: usize, x: f64) -> f64 {
    let mut p_prev: f64 = 1.0;
    if k == 0 {
        return p_prev;
    }
    let mut p: f64 = x;
    for n in 1..k {
        let n: f64 = n as f64;
        let p_next: f64 = ((2.0 * n + 1.0) * x * p - n * p_prev) / (n + 1.0);
        p_prev = p;
        p = p_next;
    }
    p
}

/// sum_k c_k P_k(x)
pub fn legendre_series(coeffs: &[f64], x: f64) -> f64 {
    coeffs
        .iter()
        .enumerate()
        .map(|(k, c)| c * legendre_polynomial(k, x))
        .sum()
}
