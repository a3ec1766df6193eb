use thiserror::Error;

use crate::domain::request::RequestId;
use crate::domain::response::{InsurerName, ResponseAction, ResponseStatus};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("quote request `{0}` was not found")]
    RequestNotFound(RequestId),
    #[error("insurer `{insurer}` is not invited on request `{request}`")]
    InsurerNotFound { request: RequestId, insurer: InsurerName },
    #[error("{action:?} is not allowed while the response is {from:?}")]
    InvalidTransition { from: ResponseStatus, action: ResponseAction },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::DomainError;
    use crate::domain::request::RequestId;
    use crate::domain::response::{InsurerName, ResponseAction, ResponseStatus};

    #[test]
    fn not_found_messages_name_the_missing_entity() {
        let error = DomainError::RequestNotFound(RequestId("OTE-042".to_owned()));
        assert_eq!(error.to_string(), "quote request `OTE-042` was not found");

        let error = DomainError::InsurerNotFound {
            request: RequestId("OTE-042".to_owned()),
            insurer: InsurerName("New India Assurance".to_owned()),
        };
        assert!(error.to_string().contains("New India Assurance"));
    }

    #[test]
    fn invalid_transition_names_state_and_action() {
        let error = DomainError::InvalidTransition {
            from: ResponseStatus::Pending,
            action: ResponseAction::SubmitQuote,
        };
        assert!(error.to_string().contains("SubmitQuote"));
        assert!(error.to_string().contains("Pending"));
    }
}
