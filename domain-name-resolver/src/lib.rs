//! Iterative `A` record resolution starting from a root name server.

mod decision;
mod error;
mod ids;
mod resolve;
mod session;
mod transport;

#[cfg(test)]
mod test_support;

pub use decision::{decide, Alias, Step};
pub use error::LookupError;
pub use ids::{IdSource, SequentialIds};
pub use resolve::Resolver;
pub use session::{ChainScope, Limits, ResolutionSession};
pub use transport::{Received, Transport, UdpTransport, MAX_RESPONSE_SIZE, RECEIVE_TIMEOUT};
