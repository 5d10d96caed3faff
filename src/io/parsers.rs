use crate::basis::{BasisSet, Contraction, Shell, ShellFunctions};
use crate::defaults::PRECISION;
use crate::elements::{element, Element};
use crate::error::{BasisError, Result};
use crate::io::BasisFormat;
use hashbrown::HashMap;
use log::debug;
use std::convert::TryFrom;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Read all basis sets from the file at `path`. The basis sets are named after the
/// file stem.
pub fn from_file<P: AsRef<Path>>(path: P, format: BasisFormat) -> Result<HashMap<String, BasisSet>> {
    let path: &Path = path.as_ref();
    let text: String = fs::read_to_string(path)?;
    let mut basis: HashMap<String, BasisSet> = parse_basis(&text, format)?;
    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
        for bs in basis.values_mut() {
            bs.name = stem.to_string();
        }
    }
    debug!("{} basis sets read from {}", basis.len(), path.display());
    Ok(basis)
}

/// Parse basis set text in `format` into basis sets keyed by element symbol.
/// Contractions of the same shell are merged, so repeated exponents are stored once.
pub fn parse_basis(text: &str, format: BasisFormat) -> Result<HashMap<String, BasisSet>> {
    match format {
        BasisFormat::Molpro => parse_molpro(text),
        BasisFormat::Gamess => parse_gamess(text),
        BasisFormat::NwChem => parse_nwchem(text),
        _ => Err(BasisError::Value(format!("no parser for the {} format", format))),
    }
}

/// Collects shell blocks per element.
#[derive(Default)]
struct Collector {
    basis: HashMap<String, BasisSet>,
}

impl Collector {
    fn add(&mut self, symbol: &str, shell: Shell, block: ShellFunctions, line: usize) -> Result<()> {
        block
            .validate()
            .map_err(|err| BasisError::parse(line, format!("{} shell of {}: {}", shell, symbol, err)))?;
        let bs: &mut BasisSet = self
            .basis
            .entry(symbol.to_string())
            .or_insert_with(|| BasisSet::new(symbol, ""));
        match bs.functions.get_mut(&shell) {
            Some(fs) => fs.merge(&block, PRECISION)?,
            None => {
                bs.functions.insert(shell, block);
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<HashMap<String, BasisSet>> {
        for bs in self.basis.values() {
            bs.validate()?;
        }
        Ok(self.basis)
    }
}

fn lookup_symbol(id: &str, line: usize) -> Result<&'static str> {
    element(id)
        .map(|el: &Element| el.symbol)
        .map_err(|err| BasisError::parse(line, err.to_string()))
}

fn number<T: FromStr>(token: &str, line: usize) -> Result<T> {
    token
        .trim()
        .replace(|c: char| c == 'D' || c == 'd', "E")
        .parse::<T>()
        .map_err(|_| BasisError::parse(line, format!("cannot read number from \"{}\"", token)))
}

fn shell_label(token: &str, line: usize) -> Result<Shell> {
    token
        .parse::<Shell>()
        .map_err(|err| BasisError::parse(line, err.to_string()))
}

/// MOLPRO: "s, H, e1, e2, ..." lines followed by "c, first.last, c1, c2, ..." lines.
fn parse_molpro(text: &str) -> Result<HashMap<String, BasisSet>> {
    struct Block {
        symbol: &'static str,
        shell: Shell,
        fs: ShellFunctions,
    }

    fn flush(collector: &mut Collector, block: Option<Block>, line: usize) -> Result<()> {
        if let Some(mut block) = block {
            if block.fs.contracted.is_empty() {
                block.fs.uncontract();
            }
            collector.add(block.symbol, block.shell, block.fs, line)?;
        }
        Ok(())
    }

    let mut collector: Collector = Collector::default();
    let mut current: Option<Block> = None;

    for (n, raw) in text.lines().enumerate() {
        let line: usize = n + 1;
        let content: &str = raw.split('!').next().unwrap_or("").trim();
        let content: &str = content
            .trim_start_matches(|c: char| c == '}')
            .trim_end_matches(|c: char| c == '}' || c == ';')
            .trim();
        if content.is_empty() || content.to_lowercase().starts_with("basis") {
            continue;
        }
        let tokens: Vec<&str> = content.split(',').map(|t| t.trim()).collect();
        if tokens[0].eq_ignore_ascii_case("c") {
            let block: &mut Block = current
                .as_mut()
                .ok_or_else(|| BasisError::parse(line, "contraction without a shell"))?;
            let range: &str = tokens
                .get(1)
                .ok_or_else(|| BasisError::parse(line, "missing contraction range"))?;
            let mut bounds = range.split('.');
            let first: usize = number(bounds.next().unwrap_or(""), line)?;
            let last: usize = number(bounds.next().unwrap_or(""), line)?;
            if first == 0 || last < first || last > block.fs.exponents.len() {
                return Err(BasisError::parse(line, format!("invalid contraction range {}", range)));
            }
            let coefficients: Vec<f64> = tokens[2..]
                .iter()
                .filter(|t| !t.is_empty())
                .map(|t| number::<f64>(t, line))
                .collect::<Result<Vec<f64>>>()?;
            if coefficients.len() != last - first + 1 {
                return Err(BasisError::parse(
                    line,
                    format!(
                        "range {} needs {} coefficients, got {}",
                        range,
                        last - first + 1,
                        coefficients.len()
                    ),
                ));
            }
            block
                .fs
                .contracted
                .push(Contraction::new((first - 1..last).collect(), coefficients));
        } else {
            if tokens.len() < 3 {
                return Err(BasisError::parse(line, format!("cannot read shell from \"{}\"", content)));
            }
            let shell: Shell = shell_label(tokens[0], line)?;
            let symbol: &'static str = lookup_symbol(tokens[1], line)?;
            let exponents: Vec<f64> = tokens[2..]
                .iter()
                .filter(|t| !t.is_empty())
                .map(|t| number::<f64>(t, line))
                .collect::<Result<Vec<f64>>>()?;
            flush(&mut collector, current.take(), line)?;
            current = Some(Block {
                symbol,
                shell,
                fs: ShellFunctions::new(exponents, Vec::new()),
            });
        }
    }
    flush(&mut collector, current.take(), text.lines().count())?;
    collector.finish()
}

/// GAMESS(US): element names followed by "S n" headers and n rows
/// "i exponent coefficient". L shells carry an additional p coefficient.
fn parse_gamess(text: &str) -> Result<HashMap<String, BasisSet>> {
    let lines: Vec<&str> = text.lines().collect();
    let mut collector: Collector = Collector::default();
    let mut symbol_now: Option<&'static str> = None;
    let mut n: usize = 0;

    while n < lines.len() {
        let line: usize = n + 1;
        let content: &str = lines[n].split('!').next().unwrap_or("").trim();
        n += 1;
        if content.is_empty() || content.starts_with('$') {
            continue;
        }
        let tokens: Vec<&str> = content.split_whitespace().collect();
        let is_header: bool = tokens.len() == 2
            && tokens[0].chars().count() == 1
            && tokens[1].parse::<usize>().is_ok();
        if !is_header {
            symbol_now = Some(lookup_symbol(tokens[0], line)?);
            continue;
        }
        let symbol: &'static str =
            symbol_now.ok_or_else(|| BasisError::parse(line, "shell before any element"))?;
        let nprim: usize = number(tokens[1], line)?;
        let sp: bool = tokens[0].eq_ignore_ascii_case("l");
        let ncols: usize = if sp { 4 } else { 3 };

        let mut exponents: Vec<f64> = Vec::with_capacity(nprim);
        let mut coefficients: Vec<f64> = Vec::with_capacity(nprim);
        let mut p_coefficients: Vec<f64> = Vec::with_capacity(nprim);
        for _ in 0..nprim {
            let row_line: usize = n + 1;
            let row: Vec<&str> = lines
                .get(n)
                .ok_or_else(|| BasisError::parse(row_line, "unexpected end of the basis set"))?
                .split_whitespace()
                .collect();
            n += 1;
            if row.len() < ncols {
                return Err(BasisError::parse(
                    row_line,
                    format!("expected {} columns, got {}", ncols, row.len()),
                ));
            }
            exponents.push(number(row[1], row_line)?);
            coefficients.push(number(row[2], row_line)?);
            if sp {
                p_coefficients.push(number(row[3], row_line)?);
            }
        }
        let indices: Vec<usize> = (0..nprim).collect();
        if sp {
            collector.add(
                symbol,
                Shell::S,
                ShellFunctions::new(exponents.clone(), vec![Contraction::new(indices.clone(), coefficients)]),
                line,
            )?;
            collector.add(
                symbol,
                Shell::P,
                ShellFunctions::new(exponents, vec![Contraction::new(indices, p_coefficients)]),
                line,
            )?;
        } else {
            let shell: Shell = shell_label(tokens[0], line)?;
            collector.add(
                symbol,
                shell,
                ShellFunctions::new(exponents, vec![Contraction::new(indices, coefficients)]),
                line,
            )?;
        }
    }
    collector.finish()
}

/// NWChem: "El s" headers followed by rows "exponent c1 c2 ...". Every coefficient
/// column is one contracted function over its non-zero entries.
fn parse_nwchem(text: &str) -> Result<HashMap<String, BasisSet>> {
    struct Block {
        symbol: &'static str,
        shells: Vec<Shell>,
        rows: Vec<Vec<f64>>,
    }

    fn flush(collector: &mut Collector, block: Option<Block>, line: usize) -> Result<()> {
        let block: Block = match block {
            Some(block) => block,
            None => return Ok(()),
        };
        let exponents: Vec<f64> = block.rows.iter().map(|row| row[0]).collect();
        let ncols: usize = block.rows.iter().map(|row| row.len()).max().unwrap_or(1) - 1;
        if block.shells.len() > 1 && ncols != block.shells.len() {
            return Err(BasisError::parse(line, "SP shells need one s and one p column"));
        }
        for (s, shell) in block.shells.iter().enumerate() {
            let columns: Vec<usize> = if block.shells.len() > 1 { vec![s] } else { (0..ncols).collect() };
            let mut contracted: Vec<Contraction> = Vec::new();
            for col in columns.into_iter() {
                let (indices, coefficients): (Vec<usize>, Vec<f64>) = block
                    .rows
                    .iter()
                    .enumerate()
                    .filter_map(|(i, row)| row.get(col + 1).filter(|c| **c != 0.0).map(|c| (i, *c)))
                    .unzip();
                contracted.push(Contraction::new(indices, coefficients));
            }
            collector.add(block.symbol, *shell, ShellFunctions::new(exponents.clone(), contracted), line)?;
        }
        Ok(())
    }

    let mut collector: Collector = Collector::default();
    let mut current: Option<Block> = None;

    for (n, raw) in text.lines().enumerate() {
        let line: usize = n + 1;
        let content: &str = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        let upper: String = content.to_uppercase();
        if upper.starts_with("BASIS") || upper == "END" {
            flush(&mut collector, current.take(), line)?;
            continue;
        }
        let tokens: Vec<&str> = content.split_whitespace().collect();
        if tokens[0].parse::<f64>().is_err() && !tokens[0].contains(|c: char| c.is_ascii_digit()) {
            if tokens.len() != 2 {
                return Err(BasisError::parse(line, format!("cannot read shell from \"{}\"", content)));
            }
            flush(&mut collector, current.take(), line)?;
            let shells: Vec<Shell> = tokens[1]
                .chars()
                .map(|c| Shell::try_from(c).map_err(|err| BasisError::parse(line, err.to_string())))
                .collect::<Result<Vec<Shell>>>()?;
            current = Some(Block {
                symbol: lookup_symbol(tokens[0], line)?,
                shells,
                rows: Vec::new(),
            });
        } else {
            let block: &mut Block = current
                .as_mut()
                .ok_or_else(|| BasisError::parse(line, "exponents without a shell"))?;
            let row: Vec<f64> = tokens
                .iter()
                .map(|t| number::<f64>(t, line))
                .collect::<Result<Vec<f64>>>()?;
            if row.len() < 2 {
                return Err(BasisError::parse(line, "row without coefficients"));
            }
            block.rows.push(row);
        }
    }
    let end: usize = text.lines().count();
    flush(&mut collector, current.take(), end)?;
    collector.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOLPRO: &str = "basis={
!
! HYDROGEN       (4s,1p) -> [2s,1p]
s, H , 13.0100000, 1.9620000, 0.4446000, 0.1220000, 0.0297400
c, 1.3, 0.0196850, 0.1379770, 0.4781480
c, 4.4, 1
c, 5.5, 1
p, H , 0.7270000, 0.1410000
c, 1.1, 1
c, 2.2, 1
}";

    #[test]
    fn molpro_block() {
        let basis: HashMap<String, BasisSet> = parse_basis(MOLPRO, BasisFormat::Molpro).unwrap();
        let h: &BasisSet = &basis["H"];
        assert_eq!(h.nf(true), 9);
        assert_eq!(h.functions[&Shell::S].contracted[0].indices, vec![0, 1, 2]);
        assert_eq!(h.functions[&Shell::S].contracted[2].coefficients, vec![1.0]);
        assert_eq!(h.contraction_scheme(), "(5s2p) -> [3s2p] : {311/11}");
    }

    #[test]
    fn molpro_errors() {
        let err = parse_basis("c, 1.1, 1.0", BasisFormat::Molpro).unwrap_err();
        assert_eq!(err, BasisError::parse(1, "contraction without a shell"));
        let err = parse_basis("s, H, 1.0, 2.0\nc, 1.2, 0.5", BasisFormat::Molpro).unwrap_err();
        assert!(matches!(err, BasisError::Parse { line: 2, .. }));
        let err = parse_basis("s, Xx, 1.0", BasisFormat::Molpro).unwrap_err();
        assert!(matches!(err, BasisError::Parse { line: 1, .. }));
    }

    #[test]
    fn gamess_sp_shell() {
        let text: &str = "$DATA\nCARBON\nL   2\n  1  3.6  -0.1  0.2\n  2  0.9  0.4  0.6\nS   1\n  1  3.6000001  1.0\n$END";
        let basis: HashMap<String, BasisSet> = parse_basis(text, BasisFormat::Gamess).unwrap();
        let c: &BasisSet = &basis["C"];
        assert_eq!(c.primitives_per_shell(), vec![2, 2]);
        assert_eq!(c.contractions_per_shell(), vec![2, 1]);
        assert_eq!(c.functions[&Shell::S].contracted[1].indices, vec![0]);
        assert_eq!(c.functions[&Shell::P].contracted[0].coefficients, vec![0.2, 0.6]);
    }

    #[test]
    fn gamess_truncated_block() {
        let err = parse_basis("HYDROGEN\nS   3\n  1  1.0  1.0\n", BasisFormat::Gamess).unwrap_err();
        assert!(matches!(err, BasisError::Parse { line: 4, .. }));
    }

    #[test]
    fn nwchem_general_contraction() {
        let text: &str = "BASIS \"ao basis\" PRINT
#BASIS SET: (3s) -> [2s]
He    S
     38.36  0.0238  0.0
      5.77  0.1549  0.0
      1.24  0.4699  1.0
END";
        let basis: HashMap<String, BasisSet> = parse_basis(text, BasisFormat::NwChem).unwrap();
        let he: &BasisSet = &basis["He"];
        assert_eq!(he.primitives_per_contraction(), vec![vec![3, 1]]);
        assert_eq!(he.functions[&Shell::S].contracted[1].indices, vec![2]);
    }

    #[test]
    fn unsupported_formats() {
        assert!(matches!(
            parse_basis("", BasisFormat::Cfour),
            Err(BasisError::Value(_))
        ));
    }
}
