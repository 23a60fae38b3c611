use thiserror::Error;

use ct_network::NetworkError;
use ct_routing::RoutingError;

#[derive(Debug, Error)]
pub enum TransitError {
    #[error("transit data parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TransitResult<T> = Result<T, TransitError>;
