// FLOAT COMPARISON
// number of significant digits used to decide if two exponents are equal
pub const PRECISION: u32 = 6;

// config file
pub const CONFIG_FILE_NAME: &str = "basisopt.toml";

// SHELL SATURATION
// maximal length of the legendre expansion
pub const MAX_PARAMS: usize = 5;
// a shell is saturated when the energy difference between two consecutive
// function counts drops below this threshold
pub const OPT_TOL: f64 = 1.0e-4;
// write every optimized shell to disk
pub const SAVE_BASIS: bool = false;
// file that receives the accumulated basis set
pub const FINAL_BASIS_FILE_NAME: &str = "final.bas";
// fraction of the smallest parameter that is appended when the expansion grows
pub const GROWTH_FRACTION: f64 = 0.25;

// OUTPUT
// field width and number of decimals for exponents
pub const EXPONENT_WIDTH: usize = 20;
pub const EXPONENT_PRECISION: usize = 10;
// field width and number of decimals for contraction coefficients
pub const COEFFICIENT_WIDTH: usize = 15;
pub const COEFFICIENT_PRECISION: usize = 8;
