mod parsers;
pub(crate) mod settings;
mod writers;

pub use parsers::{from_file, parse_basis};
pub use settings::{Configuration, MergeConfig, OutputConfig, SaturationConfig};
pub use writers::write_basis;

use crate::defaults::{COEFFICIENT_PRECISION, COEFFICIENT_WIDTH, EXPONENT_PRECISION, EXPONENT_WIDTH};
use crate::error::{BasisError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width and number of decimals of a right aligned floating point field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFormat {
    pub width: usize,
    pub precision: usize,
}

impl FieldFormat {
    pub fn new(width: usize, precision: usize) -> Self {
        FieldFormat { width, precision }
    }

    pub fn render(&self, value: f64) -> String {
        format!("{:>w$.p$}", value, w = self.width, p = self.precision)
    }
}

/// Field formats of exponents and contraction coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub exponent: FieldFormat,
    pub coefficient: FieldFormat,
}

impl Layout {
    pub fn new(exponent: FieldFormat, coefficient: FieldFormat) -> Self {
        Layout {
            exponent,
            coefficient,
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            exponent: FieldFormat::new(EXPONENT_WIDTH, EXPONENT_PRECISION),
            coefficient: FieldFormat::new(COEFFICIENT_WIDTH, COEFFICIENT_PRECISION),
        }
    }
}

/// Basis set file formats of quantum chemistry programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasisFormat {
    Dalton,
    Gamess,
    Molpro,
    NwChem,
    Cfour,
}

impl BasisFormat {
    pub fn default_layout(&self) -> Layout {
        match self {
            BasisFormat::Cfour => Layout::new(
                FieldFormat::new(COEFFICIENT_WIDTH, COEFFICIENT_PRECISION),
                FieldFormat::new(COEFFICIENT_WIDTH, COEFFICIENT_PRECISION),
            ),
            _ => Layout::default(),
        }
    }
}

impl FromStr for BasisFormat {
    type Err = BasisError;

    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "dalton" => Ok(BasisFormat::Dalton),
            "gamess" | "gamessus" | "gamess(us)" => Ok(BasisFormat::Gamess),
            "molpro" => Ok(BasisFormat::Molpro),
            "nwchem" => Ok(BasisFormat::NwChem),
            "cfour" => Ok(BasisFormat::Cfour),
            _ => Err(BasisError::Value(format!("unknown basis set format: {}", name))),
        }
    }
}

impl fmt::Display for BasisFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name: &str = match self {
            BasisFormat::Dalton => "DALTON",
            BasisFormat::Gamess => "GAMESS(US)",
            BasisFormat::Molpro => "MOLPRO",
            BasisFormat::NwChem => "NWChem",
            BasisFormat::Cfour => "CFOUR",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_format() {
        let layout: Layout = Layout::default();
        assert_eq!(layout.exponent.render(0.5), "        0.5000000000");
        assert_eq!(layout.coefficient.render(-0.00012), "    -0.00012000");
    }

    #[test]
    fn format_names() {
        assert_eq!("GamessUS".parse::<BasisFormat>().unwrap(), BasisFormat::Gamess);
        assert_eq!("nwchem".parse::<BasisFormat>().unwrap(), BasisFormat::NwChem);
        assert!("turbomole".parse::<BasisFormat>().is_err());
        assert_eq!(BasisFormat::Cfour.default_layout().exponent, FieldFormat::new(15, 8));
        assert_eq!(BasisFormat::Dalton.default_layout(), Layout::default());
    }
}
