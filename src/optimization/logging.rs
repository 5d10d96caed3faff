use crate::basis::{BasisSet, Shell};
use crate::utils::Timer;
use log::info;

pub fn saturation_init(shell: Shell, nfs: &[usize], max_params: usize, opt_tol: f64) {
    info!("{:=^80}", "");
    info!("{:-^80}", format!(" Beginning optimization for {} shell ", shell));
    info!("{:=^80}", "");
    info!("{: <25} {:?}", "function counts:", nfs);
    info!("{: <25} {}", "max. parameters:", max_params);
    info!("{: <25} {:e}", "convergence criterium:", opt_tol);
    info!("{:^80}", "");
    info!(
        "{: >5} {: >20} {: >20} {: >20}",
        "nf", "Current value", "Previous value", "Difference"
    );
    info!("{:-^80} ", "");
}

pub fn saturation_iteration(nf: usize, objective: f64, previous: f64) {
    info!(
        "{: >5} {:>20.10} {:>20.10} {:>20.10}",
        nf,
        objective,
        previous,
        (objective - previous).abs()
    );
}

pub fn parameters_added(n_params: usize, added: f64) {
    info!("{: >5} adding parameter {:.6} ({} parameters)", "", added, n_params);
}

pub fn saturation_converged(timer: &Timer, shell: Shell, nf: usize) {
    info!("{:-^80} ", "");
    info!("{: ^80}", "Basis saturated with respect to threshold");
    info!("{:<25} {} {}-type functions", "final size:", nf, shell);
    info!("{:-<80} ", "");
    info!("{}", timer);
}

pub fn saturation_exhausted(timer: &Timer, shell: Shell, nf: usize) {
    info!("{:-^80} ", "");
    info!(
        "{: ^80}",
        "Supplied number of functions exhausted, the required accuracy was not reached"
    );
    info!("{:<25} {} {}-type functions", "final size:", nf, shell);
    info!("{:-<80} ", "");
    info!("{}", timer);
}

pub fn multishell_end(timer: &Timer, basis: &BasisSet) {
    info!("{:=^80}", "");
    info!("{: ^80}", "Shell optimization finished");
    info!("{:<25} {}", "element:", basis.element);
    info!("{:<25} {}", "contraction scheme:", basis.contraction_scheme());
    info!("{:<25} {}", "spherical functions:", basis.nf(true));
    info!("{:=^80}", "");
    info!("{}", timer);
}
