use dp_core::{AgentId, ForkId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("agent {agent} released {fork} owned by {owner:?}")]
    ReleaseByNonOwner {
        fork:  ForkId,
        agent: AgentId,
        /// The actual holder at the time of the call (`None` = fork was free).
        owner: Option<AgentId>,
    },
}

pub type TableResult<T> = Result<T, TableError>;
