pub mod aggregate;
pub mod analyze;
pub mod check;
pub mod cli;
pub mod error;
pub mod filter;
pub mod model;
pub mod process;
pub mod render;
pub mod source;
