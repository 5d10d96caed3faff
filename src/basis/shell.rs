use crate::error::{BasisError, Result};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// Angular momentum shell of a set of Gaussian functions. The variants are ordered by
/// their angular momentum quantum number, which is the order in which shells are
/// iterated and written.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shell {
    S,
    P,
    D,
    F,
    G,
    H,
    I,
}

pub const SHELLS: [Shell; 7] = [
    Shell::S,
    Shell::P,
    Shell::D,
    Shell::F,
    Shell::G,
    Shell::H,
    Shell::I,
];

impl Shell {
    /// Angular momentum quantum number l.
    pub fn l(&self) -> usize {
        *self as usize
    }

    pub fn from_l(l: usize) -> Result<Self> {
        SHELLS
            .get(l)
            .copied()
            .ok_or_else(|| BasisError::Value(format!("no shell with angular momentum {}", l)))
    }

    pub fn label(&self) -> char {
        match self {
            Shell::S => 's',
            Shell::P => 'p',
            Shell::D => 'd',
            Shell::F => 'f',
            Shell::G => 'g',
            Shell::H => 'h',
            Shell::I => 'i',
        }
    }

    /// Number of spherical components 2l+1.
    pub fn spherical(&self) -> usize {
        2 * self.l() + 1
    }

    /// Number of cartesian components (l+1)(l+2)/2.
    pub fn cartesian(&self) -> usize {
        (self.l() + 1) * (self.l() + 2) / 2
    }
}

impl TryFrom<char> for Shell {
    type Error = BasisError;

    fn try_from(label: char) -> Result<Self> {
        match label.to_ascii_lowercase() {
            's' => Ok(Shell::S),
            'p' => Ok(Shell::P),
            'd' => Ok(Shell::D),
            'f' => Ok(Shell::F),
            'g' => Ok(Shell::G),
            'h' => Ok(Shell::H),
            'i' => Ok(Shell::I),
            _ => Err(BasisError::Value(format!(
                "shell must be one of the following: s, p, d, f, g, h, i; got {}",
                label
            ))),
        }
    }
}

impl FromStr for Shell {
    type Err = BasisError;

    fn from_str(label: &str) -> Result<Self> {
        let mut chars = label.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Shell::try_from(c),
            _ => Err(BasisError::Value(format!(
                "shell must be one of the following: s, p, d, f, g, h, i; got {}",
                label
            ))),
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
