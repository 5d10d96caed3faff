mod logging;
mod request;
mod saturation;

pub use request::{OptimizationRequest, OptimizationRequestBuilder};
pub use saturation::{
    opt_multishell, opt_multishell_parallel, opt_shell_by_nf, save_basis, EnergyEvaluator,
    Evaluation, ParameterGrowth, QuarterOfMinimum, Saturation, ShellTask,
};
