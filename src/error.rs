use crate::{filter::FilterError, profiler::ProfilerError};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error in the `profiler` module")]
    Profiler(#[from] ProfilerError),
    #[error("Error in the `filter` module")]
    Filter(#[from] FilterError),
    #[error("Failed to write the prescriptions")]
    Csv(#[from] csv::Error),
    #[error("Failed to flush the prescriptions")]
    Io(#[from] std::io::Error),
}
pub type Result<T> = std::result::Result<T, Error>;
