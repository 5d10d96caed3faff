//! Extrapolations to the complete basis set limit as functions of the cardinal
//! number `x` of the basis set.

/// Parameter set of the USTE extrapolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UsteMethod {
    /// calibrated for MRCI(Q)
    Ci,
    /// calibrated for coupled cluster
    Cc,
}

struct UsteParameters {
    a05: f64,
    c: f64,
    m: f64,
    alpha: f64,
}

impl UsteMethod {
    fn parameters(&self) -> UsteParameters {
        match self {
            UsteMethod::Ci => UsteParameters {
                a05: 0.003769,
                c: -1.1784771,
                m: 1.25,
                alpha: -0.375,
            },
            UsteMethod::Cc => UsteParameters {
                a05: 0.1660699,
                c: -1.4222512,
                m: 1.0,
                alpha: -0.375,
            },
        }
    }
}

/// Uniform singlet and triplet pair extrapolation,
/// A. J. C. Varandas, J. Phys. Chem. A 114, 8505 (2010).
pub fn uste(x: f64, e_cbs: f64, a3: f64, method: UsteMethod) -> f64 {
    let p: UsteParameters = method.parameters();
    let a5: f64 = p.a05 + p.c * a3.powf(p.m);
    e_cbs + a3 / (x + p.alpha).powi(3) + a5 / (x + p.alpha).powi(5)
}

/// Inverse cubic extrapolation, T. Helgaker et al., J. Chem. Phys. 106, 9639 (1997).
pub fn helgaker_x3(x: f64, a: f64, b: f64) -> f64 {
    a + b * x.powi(-3)
}

/// Helgaker type extrapolation with a free exponent.
pub fn cbs_helgaker(x: f64, dinf: f64, alpha: f64, beta: f64) -> f64 {
    dinf + alpha * x.powf(-beta)
}

/// Exponential extrapolation of SCF energies, e(x) = e_cbs + b exp(-a x).
pub fn scf_exp(x: f64, e_cbs: f64, b: f64, a: f64) -> f64 {
    e_cbs + b * (-a * x).exp()
}

/// Power law extrapolation of SCF energies, e(x) = e_cbs + b x^(-a).
pub fn scf_pol(x: f64, e_cbs: f64, b: f64, a: f64) -> f64 {
    e_cbs + b * x.powf(-a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::AbsDiffEq;

    #[test]
    fn limits() {
        assert!(helgaker_x3(1.0e6, -1.5, 0.3).abs_diff_eq(&-1.5, 1e-12));
        assert!(scf_exp(100.0, -128.5, 0.2, 1.5).abs_diff_eq(&-128.5, 1e-12));
        assert!(scf_pol(1.0e6, -128.5, 0.2, 3.0).abs_diff_eq(&-128.5, 1e-12));
        assert!(cbs_helgaker(1.0e6, -0.3, 0.1, 3.0).abs_diff_eq(&-0.3, 1e-12));
    }

    #[test]
    fn closed_forms() {
        assert_eq!(helgaker_x3(2.0, 1.0, 8.0), 2.0);
        assert!(scf_exp(2.0, 0.0, 1.0, 0.5).abs_diff_eq(&(-1.0f64).exp(), 1e-15));
        assert_eq!(scf_pol(2.0, 1.0, 4.0, 2.0), 2.0);
        assert_eq!(cbs_helgaker(2.0, 1.0, 8.0, 3.0), helgaker_x3(2.0, 1.0, 8.0));
    }

    #[test]
    fn uste_parameters() {
        // for x + alpha = 1 the corrections are a3 + a5
        let e: f64 = uste(1.375, -1.0, 2.0, UsteMethod::Cc);
        let a5: f64 = 0.1660699 - 1.4222512 * 2.0;
        assert!(e.abs_diff_eq(&(-1.0 + 2.0 + a5), 1e-12));
        let e: f64 = uste(1.375, 0.0, 1.0, UsteMethod::Ci);
        assert!(e.abs_diff_eq(&(1.0 + 0.003769 - 1.1784771), 1e-12));
    }
}
