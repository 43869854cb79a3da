pub mod benchmark_runner;
pub mod chart_renderer;
pub mod report_parser;

pub use benchmark_runner::*;
pub use chart_renderer::*;
pub use report_parser::*;
