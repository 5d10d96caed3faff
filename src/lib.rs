//! Gaussian basis sets: exponent generators, merging of contracted functions,
//! classification of contraction schemes, conversion between the basis set formats
//! of common quantum chemistry programs and the shell by shell saturation of a basis
//! set with an external energy evaluator.

pub mod basis;
pub mod cbs;
pub mod defaults;
pub mod elements;
pub mod error;
pub mod io;
pub mod optimization;
pub mod utils;

pub use basis::{BasisSet, Contraction, ContractionType, Parametrization, Shell, ShellFunctions};
pub use error::{BasisError, Result};
pub use io::{BasisFormat, Configuration, FieldFormat, Layout};
pub use optimization::{
    EnergyEvaluator, Evaluation, OptimizationRequest, OptimizationRequestBuilder, Saturation,
    ShellTask,
};
