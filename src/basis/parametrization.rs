use crate::basis::generators::{eventemp, legendre, welltemp};
use crate::error::{BasisError, Result};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// Formula that turns the parameters of a shell into exponents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Parametrization {
    /// The parameters are the exponents.
    Exponents,
    /// alpha, beta
    EvenTempered,
    /// alpha, beta, gamma, delta
    WellTempered,
    /// expansion coefficients of ln(zeta)
    Legendre,
}

impl Parametrization {
    /// Generate `nf` exponents from `params`.
    pub fn generate(&self, nf: usize, params: &[f64]) -> Result<Vec<f64>> {
        match self {
            Parametrization::Exponents => params.get(..nf).map(|p| p.to_vec()).ok_or_else(|| {
                BasisError::Value(format!("{} exponents requested but {} given", nf, params.len()))
            }),
            Parametrization::EvenTempered => eventemp(nf, params),
            Parametrization::WellTempered => welltemp(nf, params),
            Parametrization::Legendre => legendre(nf, params),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Parametrization::Exponents => "exponents",
            Parametrization::EvenTempered => "eventemp",
            Parametrization::WellTempered => "welltemp",
            Parametrization::Legendre => "legendre",
        }
    }
}

impl FromStr for Parametrization {
    type Err = BasisError;

    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "direxp" | "direct" | "exps" | "exponents" => Ok(Parametrization::Exponents),
            "even" | "eventemp" | "eventempered" => Ok(Parametrization::EvenTempered),
            "well" | "welltemp" | "welltempered" => Ok(Parametrization::WellTempered),
            "legendre" => Ok(Parametrization::Legendre),
            _ => Err(BasisError::Value(format!("unknown parametrization: {}", name))),
        }
    }
}

impl TryFrom<String> for Parametrization {
    type Error = BasisError;

    fn try_from(name: String) -> Result<Self> {
        name.parse()
    }
}

impl From<Parametrization> for String {
    fn from(parametrization: Parametrization) -> Self {
        parametrization.as_str().to_string()
    }
}

impl fmt::Display for Parametrization {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases() {
        assert_eq!("Even".parse::<Parametrization>().unwrap(), Parametrization::EvenTempered);
        assert_eq!("welltempered".parse::<Parametrization>().unwrap(), Parametrization::WellTempered);
        assert_eq!("DIREXP".parse::<Parametrization>().unwrap(), Parametrization::Exponents);
        assert_eq!("legendre".parse::<Parametrization>().unwrap(), Parametrization::Legendre);
        assert!("tempered".parse::<Parametrization>().is_err());
    }

    #[test]
    fn direct_exponents() {
        let exps: Vec<f64> = Parametrization::Exponents.generate(2, &[3.0, 1.0, 0.2]).unwrap();
        assert_eq!(exps, vec![3.0, 1.0]);
        assert!(Parametrization::Exponents.generate(4, &[3.0]).is_err());
    }

    #[test]
    fn serde_names() {
        let p: Parametrization = serde_json::from_str("\"well\"").unwrap();
        assert_eq!(p, Parametrization::WellTempered);
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"welltemp\"");
    }
}
