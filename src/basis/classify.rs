use crate::basis::{BasisSet, ShellFunctions};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Contraction scheme of a basis set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractionType {
    /// Every contracted function is a single primitive.
    Uncontracted,
    /// Every shell holds at most one primitive, used as a single uncontracted function.
    Uncontracted1fps,
    /// Every contracted function spans all primitives of its shell.
    General,
    /// Every primitive belongs to exactly one contracted function.
    Segmented,
    Unknown,
}

impl ContractionType {
    pub fn label(&self) -> &'static str {
        match self {
            ContractionType::Uncontracted => "uncontracted",
            ContractionType::Uncontracted1fps => "uncontracted 1fps",
            ContractionType::General => "general",
            ContractionType::Segmented => "segmented",
            ContractionType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ContractionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// every primitive of the shell is used by exactly one contraction
fn is_partitioned(fs: &ShellFunctions) -> bool {
    let mut usage: Vec<usize> = vec![0; fs.exponents.len()];
    for cf in fs.contracted.iter() {
        for idx in cf.indices.iter() {
            match usage.get_mut(*idx) {
                Some(count) => *count += 1,
                None => return false,
            }
        }
    }
    usage.iter().all(|count| *count == 1)
}

impl BasisSet {
    /// Determine the contraction type from the number of primitives per shell and per
    /// contracted function.
    pub fn contraction_type(&self) -> ContractionType {
        let pps: Vec<usize> = self.primitives_per_shell();
        let ppc: Vec<Vec<usize>> = self.primitives_per_contraction();
        let single_primitives: bool = ppc.iter().all(|shell| shell.iter().all(|x| *x == 1));

        if pps.iter().any(|x| *x > 1) {
            if single_primitives {
                ContractionType::Uncontracted
            } else if pps
                .iter()
                .zip(ppc.iter())
                .all(|(np, shell)| shell.iter().all(|pinc| pinc == np))
            {
                ContractionType::General
            } else if self.functions.values().all(is_partitioned) {
                ContractionType::Segmented
            } else {
                ContractionType::Unknown
            }
        } else if single_primitives {
            // one function per shell case
            ContractionType::Uncontracted1fps
        } else {
            ContractionType::Unknown
        }
    }
}
