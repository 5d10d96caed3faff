pub mod classify;
pub mod generators;
pub mod merge;
mod parametrization;
mod shell;

pub use classify::ContractionType;
pub use generators::{eventemp, legendre, welltemp, zetas2legendre};
pub use merge::{floats_share_value, merge_floats};
pub use parametrization::Parametrization;
pub use shell::{Shell, SHELLS};

use crate::error::{BasisError, Result};
use crate::optimization::OptimizationRequest;
use crate::utils::group;
use itertools::Itertools;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A contracted function: a linear combination of the primitives at the positions
/// `indices` of the exponents of its shell, weighted by `coefficients`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contraction {
    pub indices: Vec<usize>,
    pub coefficients: Vec<f64>,
}

impl Contraction {
    pub fn new(indices: Vec<usize>, coefficients: Vec<f64>) -> Self {
        Contraction {
            indices,
            coefficients,
        }
    }

    /// Single primitive with coefficient 1.0.
    pub fn uncontracted(index: usize) -> Self {
        Contraction {
            indices: vec![index],
            coefficients: vec![1.0],
        }
    }

    /// Number of primitives in the contraction.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Coefficient of the primitive at position `index` of the shell, 0.0 if the
    /// primitive does not take part in the contraction.
    pub fn coefficient_of(&self, index: usize) -> f64 {
        self.indices
            .iter()
            .position(|i| *i == index)
            .and_then(|pos| self.coefficients.get(pos).copied())
            .unwrap_or(0.0)
    }
}

/// Exponents and contracted functions of one shell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShellFunctions {
    pub exponents: Vec<f64>,
    #[serde(rename = "contractedfs")]
    pub contracted: Vec<Contraction>,
}

impl ShellFunctions {
    pub fn new(exponents: Vec<f64>, contracted: Vec<Contraction>) -> Self {
        ShellFunctions {
            exponents,
            contracted,
        }
    }

    /// One contracted function with coefficient 1.0 for every exponent.
    pub fn uncontracted(exponents: Vec<f64>) -> Self {
        let contracted: Vec<Contraction> = (0..exponents.len()).map(Contraction::uncontracted).collect();
        ShellFunctions {
            exponents,
            contracted,
        }
    }

    pub fn uncontract(&mut self) {
        self.contracted = (0..self.exponents.len()).map(Contraction::uncontracted).collect();
    }

    /// Check that every contraction has as many coefficients as indices and that the
    /// indices are unique positions of the exponents.
    pub fn validate(&self) -> Result<()> {
        let n_exp: usize = self.exponents.len();
        for (n, cf) in self.contracted.iter().enumerate() {
            if cf.indices.len() != cf.coefficients.len() {
                return Err(BasisError::Value(format!(
                    "contraction {} has {} indices but {} coefficients",
                    n,
                    cf.indices.len(),
                    cf.coefficients.len()
                )));
            }
            for (pos, idx) in cf.indices.iter().enumerate() {
                if *idx >= n_exp {
                    return Err(BasisError::Value(format!(
                        "contraction {} references exponent {} but the shell has only {} exponents",
                        n, idx, n_exp
                    )));
                }
                if cf.indices[..pos].contains(idx) {
                    return Err(BasisError::Value(format!(
                        "contraction {} references exponent {} twice",
                        n, idx
                    )));
                }
            }
        }
        Ok(())
    }

    /// Merge the functions of `other` into this shell. Exponents that agree to
    /// `precision` significant digits are stored once and the indices of the copied
    /// contractions are remapped onto the merged exponents. `other` is validated
    /// before this shell is changed.
    pub(crate) fn merge(&mut self, other: &ShellFunctions, precision: u32) -> Result<()> {
        other.validate()?;
        if floats_share_value(&self.exponents, &other.exponents, precision) {
            let new_idx: Vec<usize> = merge_floats(&mut self.exponents, &other.exponents, precision);
            for cf in other.contracted.iter() {
                let mut newc: Contraction = cf.clone();
                newc.indices = cf.indices.iter().map(|i| new_idx[*i]).collect();
                self.contracted.push(newc);
            }
        } else {
            let nexp: usize = self.exponents.len();
            self.exponents.extend_from_slice(&other.exponents);
            for cf in other.contracted.iter() {
                let mut newc: Contraction = cf.clone();
                newc.indices = cf.indices.iter().map(|i| i + nexp).collect();
                self.contracted.push(newc);
            }
        }
        Ok(())
    }
}

/// Basis set of a single element.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BasisSet {
    pub element: String,
    pub name: String,
    pub functions: BTreeMap<Shell, ShellFunctions>,
    /// Additional attributes that are passed through without interpretation.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl BasisSet {
    pub fn new<S: Into<String>, T: Into<String>>(element: S, name: T) -> Self {
        BasisSet {
            element: element.into(),
            name: name.into(),
            functions: BTreeMap::new(),
            extra: Map::new(),
        }
    }

    /// Generate an uncontracted basis set from a sequence of `(shell, nf, params)`
    /// entries. `formulas` holds either one parametrization for all shells or one per
    /// entry.
    pub fn from_sequence<S: Into<String>, T: Into<String>>(
        formulas: &[Parametrization],
        functs: &[(Shell, usize, Vec<f64>)],
        element: S,
        name: T,
    ) -> Result<Self> {
        if formulas.len() != 1 && formulas.len() != functs.len() {
            return Err(BasisError::Value(format!(
                "got {} formulas for {} shells, expected 1 or {}",
                formulas.len(),
                functs.len(),
                functs.len()
            )));
        }
        let mut functions: BTreeMap<Shell, Vec<f64>> = BTreeMap::new();
        for (i, (shell, nf, params)) in functs.iter().enumerate() {
            let formula: Parametrization = if formulas.len() == 1 { formulas[0] } else { formulas[i] };
            functions.insert(*shell, formula.generate(*nf, params)?);
        }
        let mut bs: BasisSet = BasisSet::new(element, name);
        bs.functions = Self::add_coeffs(functions);
        Ok(bs)
    }

    /// Build the basis set described by an optimization request. `x0` holds the
    /// parameters of all shells with a non-zero function count, in shell order.
    pub fn from_optdict(x0: &[f64], request: &OptimizationRequest) -> Result<Self> {
        let mut icount: usize = 0;
        let mut skipped: usize = 0;
        let mut functions: BTreeMap<Shell, Vec<f64>> = BTreeMap::new();

        for (lqn, nf) in request.nfpshell.iter().enumerate() {
            if *nf == 0 {
                skipped += 1;
                continue;
            }
            let shell: Shell = Shell::from_l(lqn)?;
            let exps: Vec<f64> = match request.parametrization {
                Parametrization::Exponents => {
                    let exps: Vec<f64> = take(x0, icount, *nf)?.to_vec();
                    icount += nf;
                    exps
                }
                Parametrization::EvenTempered => {
                    let groups: Vec<Vec<f64>> = group(x0, 2);
                    let params: &Vec<f64> = nth_group(&groups, lqn - skipped)?;
                    eventemp(*nf, params)?
                }
                Parametrization::WellTempered => {
                    let groups: Vec<Vec<f64>> = group(x0, 4);
                    let params: &Vec<f64> = nth_group(&groups, lqn - skipped)?;
                    welltemp(*nf, params)?
                }
                Parametrization::Legendre => {
                    let npar: usize = request
                        .params
                        .get(lqn - skipped)
                        .map(|p| p.len())
                        .ok_or_else(|| {
                            BasisError::Value(format!("no legendre parameters for the {} shell", shell))
                        })?;
                    let pars: &[f64] = take(x0, icount, npar)?;
                    icount += npar;
                    legendre(*nf, pars)?
                }
            };
            functions.insert(shell, exps);
        }

        Ok(BasisSet {
            element: request.element.clone(),
            name: request.name.clone(),
            functions: Self::add_coeffs(functions),
            extra: request.extra.clone(),
        })
    }

    /// For every exponent add one function with contraction coefficient 1.0.
    pub fn add_coeffs(functions: BTreeMap<Shell, Vec<f64>>) -> BTreeMap<Shell, ShellFunctions> {
        functions
            .into_iter()
            .map(|(shell, exps)| (shell, ShellFunctions::uncontracted(exps)))
            .collect()
    }

    /// Merge the functions of `other` into this basis set if both belong to the same
    /// element. For different elements nothing happens; use [BasisSet::union] to
    /// treat this case as an error.
    pub fn add(&mut self, other: &BasisSet, precision: u32) -> Result<()> {
        if self.element != other.element {
            warn!(
                "functions of element {:?} are not added to the basis set of {:?}",
                other.element, self.element
            );
            return Ok(());
        }
        self.merge_functions(other, precision)
    }

    /// Merge the functions of `other` into this basis set. Fails if the basis sets
    /// belong to different elements.
    pub fn union(&mut self, other: &BasisSet, precision: u32) -> Result<()> {
        if self.element != other.element {
            return Err(BasisError::Incompatible {
                left: self.element.clone(),
                right: other.element.clone(),
            });
        }
        self.merge_functions(other, precision)
    }

    fn merge_functions(&mut self, other: &BasisSet, precision: u32) -> Result<()> {
        // the donor is checked completely before anything is changed
        for fs in other.functions.values() {
            fs.validate()?;
        }
        for (shell, ofs) in other.functions.iter() {
            match self.functions.get_mut(shell) {
                Some(fs) => fs.merge(ofs, precision)?,
                None => {
                    self.functions.insert(*shell, ofs.clone());
                }
            }
        }
        Ok(())
    }

    /// Check the index invariants of all shells.
    pub fn validate(&self) -> Result<()> {
        for (shell, fs) in self.functions.iter() {
            fs.validate()
                .map_err(|err| BasisError::Value(format!("{} shell: {}", shell, err)))?;
        }
        Ok(())
    }

    /// Log the exponents shell by shell.
    pub fn print_exponents(&self) {
        for (shell, fs) in self.functions.iter() {
            for exp in fs.exponents.iter() {
                info!("{:10}  {:>25.10}", shell.to_string(), exp);
            }
        }
    }

    /// String describing the contraction scheme, e.g. "(4s3p) -> [2s1p] : {31/3}".
    pub fn contraction_scheme(&self) -> String {
        let primitives: String = self
            .functions
            .iter()
            .map(|(shell, fs)| format!("{}{}", fs.exponents.len(), shell))
            .collect();
        let contractions: String = self
            .functions
            .iter()
            .map(|(shell, fs)| format!("{}{}", fs.contracted.len(), shell))
            .collect();
        let per_contraction: String = self
            .primitives_per_contraction()
            .iter()
            .map(|shell| shell.iter().join(""))
            .join("/");
        format!("({}) -> [{}] : {{{}}}", primitives, contractions, per_contraction)
    }

    /// Number of basis functions, with spherical (2l+1) or cartesian ((l+1)(l+2)/2)
    /// components per contracted function.
    pub fn nf(&self, spherical: bool) -> usize {
        self.functions
            .iter()
            .map(|(shell, fs)| {
                let components: usize = if spherical { shell.spherical() } else { shell.cartesian() };
                components * fs.contracted.len()
            })
            .sum()
    }

    /// Replace the contracted functions by one uncontracted function per exponent.
    pub fn uncontract(&mut self) {
        for fs in self.functions.values_mut() {
            fs.uncontract();
        }
    }

    /// Uncontracted copy of the basis set.
    pub fn uncontracted(&self) -> BasisSet {
        let mut bsnew: BasisSet = self.clone();
        bsnew.uncontract();
        bsnew
    }

    pub fn primitives_per_shell(&self) -> Vec<usize> {
        self.functions.values().map(|fs| fs.exponents.len()).collect()
    }

    pub fn contractions_per_shell(&self) -> Vec<usize> {
        self.functions.values().map(|fs| fs.contracted.len()).collect()
    }

    pub fn primitives_per_contraction(&self) -> Vec<Vec<usize>> {
        self.functions
            .values()
            .map(|fs| fs.contracted.iter().map(|cf| cf.len()).collect())
            .collect()
    }
}

fn take(x0: &[f64], start: usize, len: usize) -> Result<&[f64]> {
    x0.get(start..start + len).ok_or_else(|| {
        BasisError::Value(format!(
            "{} parameters are required but only {} were given",
            start + len,
            x0.len()
        ))
    })
}

fn nth_group(groups: &[Vec<f64>], n: usize) -> Result<&Vec<f64>> {
    groups.get(n).ok_or_else(|| {
        BasisError::Value(format!(
            "parameters for {} shells are required but only {} were given",
            n + 1,
            groups.len()
        ))
    })
}

impl fmt::Display for BasisSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "<BasisSet(")?;
        writeln!(f, "\t{:<20} = {}", "element", self.element)?;
        writeln!(f, "\t{:<20} = {}", "name", self.name)?;
        for (shell, fs) in self.functions.iter() {
            writeln!(f, "\t{:<20} = {:?}", format!("{} exponents", shell), fs.exponents)?;
            for cf in fs.contracted.iter() {
                writeln!(
                    f,
                    "\t{:<20} = {:?} {:?}",
                    format!("{} contraction", shell),
                    cf.indices,
                    cf.coefficients
                )?;
            }
        }
        for (key, val) in self.extra.iter() {
            writeln!(f, "\t{:<20} = {}", key, val)?;
        }
        write!(f, ")>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::PRECISION;
    use crate::optimization::OptimizationRequestBuilder;
    use approx::AbsDiffEq;

    fn contracted_s() -> BasisSet {
        let mut bs: BasisSet = BasisSet::new("H", "contracted");
        bs.functions.insert(
            Shell::S,
            ShellFunctions::new(
                vec![13.01, 1.962, 0.4446, 0.122],
                vec![
                    Contraction::new(vec![0, 1, 2], vec![0.019685, 0.137977, 0.478148]),
                    Contraction::uncontracted(3),
                ],
            ),
        );
        bs.functions.insert(Shell::P, ShellFunctions::uncontracted(vec![0.727]));
        bs
    }

    #[test]
    fn from_sequence_single_formula() {
        let f = vec![(Shell::S, 5, vec![0.5, 2.0]), (Shell::P, 4, vec![1.0, 3.0])];
        let bs: BasisSet =
            BasisSet::from_sequence(&[Parametrization::EvenTempered], &f, "H", "small et").unwrap();
        assert_eq!(bs.name, "small et");
        assert_eq!(bs.element, "H");
        assert_eq!(bs.functions[&Shell::S].exponents, vec![0.5, 1.0, 2.0, 4.0, 8.0]);
        assert_eq!(bs.functions[&Shell::P].exponents, vec![1.0, 3.0, 9.0, 27.0]);
        assert_eq!(bs.functions[&Shell::P].contracted.len(), 4);
    }

    #[test]
    fn from_sequence_mixed_formulas() {
        let formulas = [
            Parametrization::EvenTempered,
            Parametrization::WellTempered,
            Parametrization::Legendre,
        ];
        let f = vec![
            (Shell::S, 5, vec![0.5, 2.0]),
            (Shell::P, 4, vec![0.5, 2.0, 3.0, 4.0]),
            (Shell::D, 3, vec![1.0, 1.5, 1.1]),
        ];
        let bs: BasisSet = BasisSet::from_sequence(&formulas, &f, "H", "mixed").unwrap();
        assert_eq!(bs.functions[&Shell::S].exponents, vec![0.5, 1.0, 2.0, 4.0, 8.0]);
        assert_eq!(
            bs.functions[&Shell::P].exponents,
            vec![0.505859375, 1.1875, 3.8984375, 16.0]
        );
        let leg_d: [f64; 3] = [1.8221188003905091, 1.5683121854901687, 36.59823444367801];
        for (e, r) in bs.functions[&Shell::D].exponents.iter().zip(leg_d.iter()) {
            assert!(e.abs_diff_eq(r, 1e-12));
        }
        assert!(BasisSet::from_sequence(&formulas[..2], &f, "H", "mixed").is_err());
    }

    #[test]
    fn from_optdict_even_tempered_skips_empty_shells() {
        let request = OptimizationRequestBuilder::default()
            .parametrization(Parametrization::EvenTempered)
            .nfpshell(vec![3, 0, 2])
            .element("Be")
            .name("opt")
            .build()
            .unwrap();
        let bs: BasisSet = BasisSet::from_optdict(&[0.5, 2.0, 1.0, 3.0], &request).unwrap();
        assert_eq!(bs.functions.len(), 2);
        assert_eq!(bs.functions[&Shell::S].exponents, vec![0.5, 1.0, 2.0]);
        assert_eq!(bs.functions[&Shell::D].exponents, vec![1.0, 3.0]);
        assert_eq!(bs.element, "Be");
    }

    #[test]
    fn from_optdict_exponents_and_legendre() {
        let request = OptimizationRequestBuilder::default()
            .parametrization(Parametrization::Exponents)
            .nfpshell(vec![2, 1])
            .build()
            .unwrap();
        let bs: BasisSet = BasisSet::from_optdict(&[4.0, 1.0, 0.5], &request).unwrap();
        assert_eq!(bs.functions[&Shell::S].exponents, vec![4.0, 1.0]);
        assert_eq!(bs.functions[&Shell::P].exponents, vec![0.5]);
        assert!(BasisSet::from_optdict(&[4.0, 1.0], &request).is_err());

        let request = OptimizationRequestBuilder::default()
            .parametrization(Parametrization::Legendre)
            .nfpshell(vec![0, 2])
            .params(vec![vec![1.0, 1.0]])
            .build()
            .unwrap();
        let bs: BasisSet = BasisSet::from_optdict(&[1.0, 1.0], &request).unwrap();
        assert_eq!(bs.functions[&Shell::P].exponents, vec![1.0, 7.3890560989306504]);
    }

    #[test]
    fn merge_with_copy_keeps_exponents() {
        let mut bs: BasisSet = contracted_s();
        let copy: BasisSet = bs.clone();
        bs.add(&copy, PRECISION).unwrap();
        assert_eq!(bs.primitives_per_shell(), vec![4, 1]);
        assert_eq!(bs.contractions_per_shell(), vec![4, 2]);
        bs.validate().unwrap();
        assert_eq!(bs.functions[&Shell::S].contracted[2].indices, vec![0, 1, 2]);
    }

    #[test]
    fn merge_disjoint_offsets_indices() {
        let mut bs: BasisSet = contracted_s();
        let mut other: BasisSet = BasisSet::new("H", "diffuse");
        other.functions.insert(
            Shell::S,
            ShellFunctions::new(
                vec![0.03, 0.01],
                vec![Contraction::new(vec![1, 0], vec![0.3, 0.7])],
            ),
        );
        bs.add(&other, PRECISION).unwrap();
        let s: &ShellFunctions = &bs.functions[&Shell::S];
        assert_eq!(s.exponents, vec![13.01, 1.962, 0.4446, 0.122, 0.03, 0.01]);
        assert_eq!(s.contracted[2].indices, vec![5, 4]);
        assert_eq!(s.contracted[2].coefficients, vec![0.3, 0.7]);
        // the donor is left untouched
        assert_eq!(other.functions[&Shell::S].contracted[0].indices, vec![1, 0]);
        bs.validate().unwrap();
    }

    #[test]
    fn shell_merge_rejects_broken_donor() {
        let mut s: ShellFunctions = contracted_s().functions[&Shell::S].clone();
        let before: ShellFunctions = s.clone();
        let broken: ShellFunctions =
            ShellFunctions::new(vec![13.01], vec![Contraction::new(vec![0, 2], vec![0.5, 0.5])]);
        assert!(matches!(s.merge(&broken, PRECISION), Err(BasisError::Value(_))));
        let short: ShellFunctions = ShellFunctions::new(vec![0.05], vec![Contraction::new(vec![0], vec![])]);
        assert!(s.merge(&short, PRECISION).is_err());
        assert_eq!(s, before);
        // missing coefficients read as zero instead of panicking
        assert_eq!(short.contracted[0].coefficient_of(0), 0.0);
    }

    #[test]
    fn merge_partial_overlap_remaps() {
        let mut bs: BasisSet = contracted_s();
        let mut other: BasisSet = BasisSet::new("H", "other");
        other.functions.insert(
            Shell::S,
            ShellFunctions::new(vec![0.05, 0.1220000001], vec![Contraction::new(vec![0, 1], vec![0.5, 0.5])]),
        );
        other.functions.insert(Shell::D, ShellFunctions::uncontracted(vec![0.8]));
        bs.add(&other, PRECISION).unwrap();
        let s: &ShellFunctions = &bs.functions[&Shell::S];
        assert_eq!(s.exponents, vec![13.01, 1.962, 0.4446, 0.122, 0.05]);
        assert_eq!(s.contracted[2].indices, vec![4, 3]);
        assert_eq!(bs.functions[&Shell::D].exponents, vec![0.8]);
    }

    #[test]
    fn add_and_union_with_other_element() {
        let mut bs: BasisSet = contracted_s();
        let mut other: BasisSet = contracted_s();
        other.element = String::from("Li");
        bs.add(&other, PRECISION).unwrap();
        assert_eq!(bs, contracted_s());
        assert!(matches!(
            bs.union(&other, PRECISION),
            Err(BasisError::Incompatible { .. })
        ));
        other.element = String::from("H");
        bs.union(&other, PRECISION).unwrap();
        assert_eq!(bs.contractions_per_shell(), vec![4, 2]);
    }

    #[test]
    fn invalid_donor_is_rejected() {
        let mut bs: BasisSet = contracted_s();
        let mut other: BasisSet = BasisSet::new("H", "broken");
        other.functions.insert(
            Shell::S,
            ShellFunctions::new(vec![1.0], vec![Contraction::new(vec![3], vec![1.0])]),
        );
        assert!(bs.add(&other, PRECISION).is_err());
        assert_eq!(bs, contracted_s());
    }

    #[test]
    fn counting_and_scheme() {
        let bs: BasisSet = contracted_s();
        assert_eq!(bs.nf(true), 2 + 3);
        assert_eq!(bs.nf(false), 2 + 3);
        assert_eq!(bs.contraction_scheme(), "(4s1p) -> [2s1p] : {31/1}");
        assert_eq!(bs.primitives_per_contraction(), vec![vec![3, 1], vec![1]]);
    }

    #[test]
    fn uncontraction() {
        let bs: BasisSet = contracted_s();
        let unc: BasisSet = bs.uncontracted();
        assert_eq!(unc.contractions_per_shell(), vec![4, 1]);
        assert_eq!(bs.contractions_per_shell(), vec![2, 1]);
        assert!(unc.functions[&Shell::S]
            .contracted
            .iter()
            .all(|cf| cf.coefficients == vec![1.0]));
    }

    #[test]
    fn display_lists_shells() {
        let text: String = contracted_s().to_string();
        assert!(text.starts_with("<BasisSet("));
        assert!(text.contains("s exponents"));
        assert!(text.ends_with(")>"));
    }
}
