use pyo3::exceptions::PyRuntimeError;
use pyo3::PyErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Table not loaded: {0}")]
    NotLoaded(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("InvalidData: {0}")]
    InvalidData(String),

    #[error("{0}")]
    General(String),
}

impl From<DashError> for PyErr {
    fn from(err: DashError) -> PyErr {
        PyRuntimeError::new_err(err.to_string())
    }
}

impl From<PyErr> for DashError {
    fn from(err: PyErr) -> Self {
        DashError::General(err.to_string())
    }
}
