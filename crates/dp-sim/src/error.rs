use dp_core::CoreError;
use dp_table::TableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("fork table invariant violated: {0}")]
    Table(#[from] TableError),
}

pub type SimResult<T> = Result<T, SimError>;
