//! 平台相关的输出

pub mod cli;

pub use cli::print_error;
