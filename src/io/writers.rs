use crate::basis::{BasisSet, ShellFunctions};
use crate::error::Result;
use crate::io::{BasisFormat, Layout};

/// Render `basis` in the syntax of `format`. Shells are always written in the order
/// of their angular momentum. Fails if a contraction references a missing exponent.
pub fn write_basis(basis: &BasisSet, format: BasisFormat, layout: &Layout) -> Result<String> {
    basis.validate()?;
    let text: String = match format {
        BasisFormat::Dalton => write_dalton(basis, layout),
        BasisFormat::Gamess => write_gamess(basis, layout),
        BasisFormat::Molpro => write_molpro(basis, layout),
        BasisFormat::NwChem => write_nwchem(basis, layout),
        BasisFormat::Cfour => write_cfour(basis, layout),
    };
    Ok(text)
}

impl BasisSet {
    /// The basis set in `format` with the default layout of the format.
    pub fn write(&self, format: BasisFormat) -> Result<String> {
        write_basis(self, format, &format.default_layout())
    }

    pub fn to_dalton(&self) -> Result<String> {
        self.write(BasisFormat::Dalton)
    }

    pub fn to_gamess(&self) -> Result<String> {
        self.write(BasisFormat::Gamess)
    }

    pub fn to_molpro(&self) -> Result<String> {
        self.write(BasisFormat::Molpro)
    }

    pub fn to_nwchem(&self) -> Result<String> {
        self.write(BasisFormat::NwChem)
    }

    pub fn to_cfour(&self) -> Result<String> {
        self.write(BasisFormat::Cfour)
    }
}

// one row per exponent with a coefficient column for every contracted function
fn coefficient_rows(fs: &ShellFunctions, layout: &Layout) -> String {
    let mut res: String = String::new();
    for (i, expt) in fs.exponents.iter().enumerate() {
        res.push_str(&layout.exponent.render(*expt));
        for cf in fs.contracted.iter() {
            res.push_str(&layout.coefficient.render(cf.coefficient_of(i)));
        }
        res.push('\n');
    }
    res
}

fn write_dalton(basis: &BasisSet, layout: &Layout) -> String {
    let mut res: String = format!("! {}\n", basis.name);
    for (shell, fs) in basis.functions.iter() {
        res.push_str(&format!("! {} functions\n", shell));
        res.push_str(&format!("F{:>4}{:>4}\n", fs.exponents.len(), fs.contracted.len()));
        res.push_str(&coefficient_rows(fs, layout));
    }
    res
}

fn write_gamess(basis: &BasisSet, layout: &Layout) -> String {
    let mut res: String = String::new();
    for (shell, fs) in basis.functions.iter() {
        for cf in fs.contracted.iter() {
            res.push_str(&format!("{:<1}{:>3}\n", shell.label().to_ascii_uppercase(), cf.len()));
            for (i, (idx, coeff)) in cf.indices.iter().zip(cf.coefficients.iter()).enumerate() {
                res.push_str(&format!(
                    "{:>3}{}{}\n",
                    i + 1,
                    layout.exponent.render(fs.exponents[*idx]),
                    layout.coefficient.render(*coeff)
                ));
            }
        }
    }
    res.push('\n');
    res
}

fn write_molpro(basis: &BasisSet, layout: &Layout) -> String {
    let mut res: String = String::new();
    for (shell, fs) in basis.functions.iter() {
        let exps: Vec<String> = fs
            .exponents
            .iter()
            .map(|e| layout.exponent.render(*e).trim_start().to_string())
            .collect();
        res.push_str(&format!("{}, {}, {}\n", shell, basis.element, exps.join(", ")));
        for cf in fs.contracted.iter() {
            let (first, last): (usize, usize) = match (cf.indices.iter().min(), cf.indices.iter().max()) {
                (Some(first), Some(last)) => (*first, *last),
                _ => continue,
            };
            // the range is contiguous, primitives outside the contraction get 0.0
            let coeffs: Vec<String> = (first..=last)
                .map(|i| layout.coefficient.render(cf.coefficient_of(i)).trim_start().to_string())
                .collect();
            res.push_str(&format!("c, {}.{}, {}\n", first + 1, last + 1, coeffs.join(", ")));
        }
    }
    res
}

fn write_nwchem(basis: &BasisSet, layout: &Layout) -> String {
    let mut res: String = String::from("BASIS \"ao basis\" PRINT\n");
    for (shell, fs) in basis.functions.iter() {
        res.push_str(&format!("{} {}\n", basis.element, shell));
        res.push_str(&coefficient_rows(fs, layout));
    }
    res.push_str("END\n");
    res
}

fn write_cfour(basis: &BasisSet, layout: &Layout) -> String {
    let int_row = |values: Vec<usize>| -> String {
        values.iter().map(|v| format!("{:>5}", v)).collect::<String>() + "\n"
    };
    let mut res: String = format!("\n{}:{}\n\n\n", basis.element, basis.name);
    res.push_str(&format!("{:>3}\n", basis.functions.len()));
    res.push_str(&int_row(basis.functions.keys().map(|shell| shell.l()).collect()));
    res.push_str(&int_row(basis.contractions_per_shell()));
    res.push_str(&int_row(basis.primitives_per_shell()));

    for fs in basis.functions.values() {
        res.push('\n');
        for expt in fs.exponents.iter() {
            res.push_str(&layout.exponent.render(*expt));
        }
        res.push_str("\n\n");
        for i in 0..fs.exponents.len() {
            for cf in fs.contracted.iter() {
                res.push_str(&layout.coefficient.render(cf.coefficient_of(i)));
            }
            res.push('\n');
        }
    }
    res.push('\n');
    res
}
