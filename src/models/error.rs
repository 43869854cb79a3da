use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("XML parsing error: {0}")]
    XmlParseError(String),

    #[error("section `{section}` has no `{param}` parameter")]
    MissingParam { section: String, param: &'static str },

    #[error("invalid numeric value `{value}` for `{name}`")]
    InvalidNumber { name: String, value: String },

    #[error("`{element}` element has no `{attribute}` attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("`{parent}` element has no `{child}` child")]
    MissingElement {
        parent: &'static str,
        child: &'static str,
    },

    #[error("report contains no benchmark series")]
    EmptyReport,

    #[error("`{program}` failed with {status}")]
    CommandFailed { program: String, status: ExitStatus },

    #[error("chart rendering error: {0}")]
    ChartError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
