use dns::{EncodeError, MessageError};
use domain_name_query_types::FailureCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("name does not exist")]
    NameError,

    #[error("no response after {0} consecutive attempts")]
    Timeout(u32),

    #[error("query budget of {0} queries exhausted")]
    QueryBudgetExceeded(u32),

    #[error("server answered with rcode {0}")]
    ServerFailure(u8),

    #[error("malformed response: {0}")]
    Malformed(#[from] MessageError),

    #[error("cannot build query: {0}")]
    InvalidName(#[from] EncodeError),

    #[error("response has no answer, referral or alias")]
    NoData,

    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),
}

impl LookupError {
    pub fn failure_code(&self) -> FailureCode {
        match self {
            LookupError::NameError => FailureCode::NameError,
            LookupError::Timeout(_) => FailureCode::Timeout,
            LookupError::QueryBudgetExceeded(_) => FailureCode::QueryBudgetExceeded,
            LookupError::ServerFailure(_)
            | LookupError::Malformed(_)
            | LookupError::InvalidName(_)
            | LookupError::NoData
            | LookupError::Transport(_) => FailureCode::Unresolved,
        }
    }
}
