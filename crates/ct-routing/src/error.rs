//! Routing error type.
//!
//! An unreachable destination is *not* an error: searches return an empty
//! path with infinite totals.  Errors are reserved for malformed queries.

use thiserror::Error;

use ct_core::NodeId;
use ct_network::NetworkError;

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

pub type RoutingResult<T> = Result<T, RoutingError>;
