use crate::basis::{BasisSet, Parametrization, Shell};
use crate::defaults::{FINAL_BASIS_FILE_NAME, GROWTH_FRACTION, PRECISION};
use crate::error::BasisError;
use crate::io::SaturationConfig;
use crate::optimization::logging::*;
use crate::optimization::OptimizationRequest;
use crate::utils::Timer;
use anyhow::Context;
use chrono::Local;
use log::{debug, info, log_enabled, warn, Level};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Result of one evaluation of the objective: the optimized value and the optimized
/// parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub objective: f64,
    pub x: Vec<f64>,
}

/// External routine that optimizes the parameters of a request and returns the
/// objective (usually the total energy) at the optimum.
pub trait EnergyEvaluator {
    fn evaluate(&mut self, request: &OptimizationRequest) -> anyhow::Result<Evaluation>;
}

impl<F> EnergyEvaluator for F
where
    F: FnMut(&OptimizationRequest) -> anyhow::Result<Evaluation>,
{
    fn evaluate(&mut self, request: &OptimizationRequest) -> anyhow::Result<Evaluation> {
        self(request)
    }
}

/// Policy that provides the starting value of a new expansion parameter when the
/// parameter vector of a shell grows.
pub trait ParameterGrowth {
    fn extend(&self, params: &[f64]) -> f64;
}

/// The new parameter is a quarter of the smallest existing parameter, taken as
/// positive value.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuarterOfMinimum;

impl ParameterGrowth for QuarterOfMinimum {
    fn extend(&self, params: &[f64]) -> f64 {
        let min: f64 = params.iter().copied().fold(f64::INFINITY, f64::min);
        if min.is_finite() {
            (GROWTH_FRACTION * min).abs()
        } else {
            0.0
        }
    }
}

/// A shell together with the function counts that are scanned and the initial
/// expansion parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellTask {
    pub shell: Shell,
    pub nfs: Vec<usize>,
    pub guess: Vec<f64>,
}

impl ShellTask {
    pub fn new(shell: Shell, nfs: Vec<usize>, guess: Vec<f64>) -> Self {
        ShellTask { shell, nfs, guess }
    }
}

/// Shell saturation: functions are added to a shell until the objective changes by
/// less than the tolerance between two consecutive function counts.
#[derive(Debug, Clone)]
pub struct Saturation<G = QuarterOfMinimum> {
    pub config: SaturationConfig,
    pub precision: u32,
    pub growth: G,
}

impl Default for Saturation<QuarterOfMinimum> {
    fn default() -> Self {
        Saturation::new(SaturationConfig::default(), PRECISION)
    }
}

impl Saturation<QuarterOfMinimum> {
    pub fn new(config: SaturationConfig, precision: u32) -> Self {
        Saturation {
            config,
            precision,
            growth: QuarterOfMinimum,
        }
    }
}

impl<G: ParameterGrowth> Saturation<G> {
    pub fn with_growth(config: SaturationConfig, precision: u32, growth: G) -> Self {
        Saturation {
            config,
            precision,
            growth,
        }
    }

    /// Optimize the functions of `shell` for the function counts `nfs` (ascending)
    /// starting from the Legendre expansion `guess`. All other fields of `template`
    /// are passed to the evaluator unchanged. If the objective does not converge
    /// before `nfs` is exhausted the last result is returned.
    pub fn opt_shell_by_nf<E: EnergyEvaluator + ?Sized>(
        &self,
        shell: Shell,
        nfs: &[usize],
        guess: &[f64],
        template: &OptimizationRequest,
        evaluator: &mut E,
    ) -> anyhow::Result<BasisSet> {
        check_arguments(nfs, guess)?;
        let timer: Timer = Timer::start();
        saturation_init(shell, nfs, self.config.max_params, self.config.opt_tol);

        let mut request: OptimizationRequest = template.clone();
        request.parametrization = Parametrization::Legendre;
        request.params = vec![guess.to_vec()];

        let mut e_last: f64 = 0.0;
        let mut x_last: Vec<f64> = guess.to_vec();
        let mut nf_last: Option<usize> = None;

        for nf in nfs.iter() {
            request.nfpshell = shell_counts(shell, *nf);
            let res: Evaluation = evaluator
                .evaluate(&request)
                .with_context(|| format!("evaluation failed for {} {}-type functions", nf, shell))?;
            saturation_iteration(*nf, res.objective, e_last);

            if (res.objective - e_last).abs() < self.config.opt_tol {
                // without a previous iteration the current configuration is kept
                let nf_conv: usize = nf_last.unwrap_or(*nf);
                saturation_converged(&timer, shell, nf_conv);
                let basis: BasisSet = self.shell_basis(shell, nf_conv, &x_last, template)?;
                self.save_shell(shell, &basis)?;
                return Ok(basis);
            }
            x_last = res.x;
            nf_last = Some(*nf);
            let mut params: Vec<f64> = x_last.clone();
            if params.len() < self.config.max_params {
                let added: f64 = self.growth.extend(&params);
                params.push(added);
                parameters_added(params.len(), added);
            } else {
                debug!("maximal number of parameters reached: {}", params.len());
            }
            request.params = vec![params];
            e_last = res.objective;
        }

        let nf_exh: usize = nf_last.unwrap_or_else(|| nfs[nfs.len() - 1]);
        warn!(
            "supplied numbers of {}-type functions exhausted but the required accuracy was not reached",
            shell
        );
        saturation_exhausted(&timer, shell, nf_exh);
        let basis: BasisSet = self.shell_basis(shell, nf_exh, &x_last, template)?;
        self.save_shell(shell, &basis)?;
        Ok(basis)
    }

    /// Saturate the shells of `tasks` one after another and add every optimized shell
    /// to `accumulator`.
    pub fn opt_multishell<E: EnergyEvaluator + ?Sized>(
        &self,
        accumulator: BasisSet,
        tasks: &[ShellTask],
        template: &OptimizationRequest,
        evaluator: &mut E,
    ) -> anyhow::Result<BasisSet> {
        let timer: Timer = Timer::start();
        let mut total: BasisSet = accumulator;
        for task in tasks.iter() {
            let optimized: BasisSet =
                self.opt_shell_by_nf(task.shell, &task.nfs, &task.guess, template, evaluator)?;
            total.add(&optimized, self.precision)?;
        }
        multishell_end(&timer, &total);
        self.save_final(&total)?;
        Ok(total)
    }

    /// Like [Saturation::opt_multishell], but the shells are optimized independently on
    /// the rayon thread pool with one evaluator per shell created by `factory`. The
    /// results are added to `accumulator` in the order of `tasks`.
    pub fn opt_multishell_parallel<E, F>(
        &self,
        accumulator: BasisSet,
        tasks: &[ShellTask],
        template: &OptimizationRequest,
        factory: F,
    ) -> anyhow::Result<BasisSet>
    where
        E: EnergyEvaluator,
        F: Fn() -> E + Sync,
        G: Sync,
    {
        let timer: Timer = Timer::start();
        let shells: Vec<BasisSet> = tasks
            .par_iter()
            .map(|task| {
                let mut evaluator: E = factory();
                self.opt_shell_by_nf(task.shell, &task.nfs, &task.guess, template, &mut evaluator)
            })
            .collect::<anyhow::Result<Vec<BasisSet>>>()?;

        let mut total: BasisSet = accumulator;
        for optimized in shells.iter() {
            total.add(optimized, self.precision)?;
        }
        multishell_end(&timer, &total);
        self.save_final(&total)?;
        Ok(total)
    }

    fn shell_basis(
        &self,
        shell: Shell,
        nf: usize,
        x: &[f64],
        template: &OptimizationRequest,
    ) -> anyhow::Result<BasisSet> {
        let mut request: OptimizationRequest = template.clone();
        request.parametrization = Parametrization::Legendre;
        request.nfpshell = shell_counts(shell, nf);
        request.params = vec![x.to_vec()];
        let basis: BasisSet = BasisSet::from_optdict(x, &request)?;
        if log_enabled!(Level::Info) {
            basis.print_exponents();
        }
        Ok(basis)
    }

    fn save_shell(&self, shell: Shell, basis: &BasisSet) -> anyhow::Result<()> {
        if self.config.save {
            let path: PathBuf = self.config.output_directory.join(format!("{}_shell.bas", shell));
            save_basis(basis, &path)?;
        }
        Ok(())
    }

    fn save_final(&self, basis: &BasisSet) -> anyhow::Result<()> {
        if self.config.save {
            let path: PathBuf = self.config.output_directory.join(FINAL_BASIS_FILE_NAME);
            save_basis(basis, &path)?;
        }
        Ok(())
    }
}

/// Optimize a single shell with the default growth policy.
pub fn opt_shell_by_nf<E: EnergyEvaluator + ?Sized>(
    shell: Shell,
    nfs: &[usize],
    guess: &[f64],
    config: &SaturationConfig,
    template: &OptimizationRequest,
    evaluator: &mut E,
) -> anyhow::Result<BasisSet> {
    Saturation::new(config.clone(), PRECISION).opt_shell_by_nf(shell, nfs, guess, template, evaluator)
}

/// Optimize several shells one after another with the default growth policy.
pub fn opt_multishell<E: EnergyEvaluator + ?Sized>(
    accumulator: BasisSet,
    tasks: &[ShellTask],
    config: &SaturationConfig,
    template: &OptimizationRequest,
    evaluator: &mut E,
) -> anyhow::Result<BasisSet> {
    Saturation::new(config.clone(), PRECISION).opt_multishell(accumulator, tasks, template, evaluator)
}

/// Optimize several shells in parallel with the default growth policy.
pub fn opt_multishell_parallel<E, F>(
    accumulator: BasisSet,
    tasks: &[ShellTask],
    config: &SaturationConfig,
    template: &OptimizationRequest,
    factory: F,
) -> anyhow::Result<BasisSet>
where
    E: EnergyEvaluator,
    F: Fn() -> E + Sync,
{
    Saturation::new(config.clone(), PRECISION).opt_multishell_parallel(accumulator, tasks, template, factory)
}

fn check_arguments(nfs: &[usize], guess: &[f64]) -> Result<(), BasisError> {
    let min_nf: usize = nfs
        .iter()
        .copied()
        .min()
        .ok_or_else(|| BasisError::Value("no function counts to optimize".to_string()))?;
    if guess.is_empty() {
        return Err(BasisError::Value("the initial guess has no parameters".to_string()));
    }
    if guess.len() == 1 && min_nf != 1 {
        return Err(BasisError::Value(format!(
            "1 parameter and {} functions doesn't make sense",
            min_nf
        )));
    }
    if min_nf < guess.len() {
        return Err(BasisError::Value(format!(
            "more parameters ({}) than functions to optimize ({})",
            guess.len(),
            min_nf
        )));
    }
    Ok(())
}

// function counts with all lower shells empty
fn shell_counts(shell: Shell, nf: usize) -> Vec<usize> {
    let mut counts: Vec<usize> = vec![0; shell.l()];
    counts.push(nf);
    counts
}

/// Write the basis set as RON to `path`, creating missing directories.
pub fn save_basis(basis: &BasisSet, path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let body: String = ron::ser::to_string_pretty(basis, ron::ser::PrettyConfig::new())?;
    let text: String = format!(
        "// basis set {} for {}, written {}\n{}\n",
        basis.name,
        basis.element,
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        body
    );
    fs::write(path, text).with_context(|| format!("cannot write {}", path.display()))?;
    info!("{: <25} {}", "basis set written to:", path.display());
    Ok(())
}
