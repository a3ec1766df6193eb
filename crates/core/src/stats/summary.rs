//! Dashboard counter strips: the broker's request funnel and an insurer's
//! own worklist.

use serde::Serialize;

use crate::domain::request::{QuoteRequest, RequestStatus};
use crate::domain::response::{InsurerName, ResponseStatus};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BrokerSummary {
    pub total: u64,
    pub awaiting: u64,
    pub received: u64,
    pub closed: u64,
}

pub fn broker_summary(requests: &[QuoteRequest]) -> BrokerSummary {
    let mut summary = BrokerSummary { total: requests.len() as u64, ..BrokerSummary::default() };
    for request in requests {
        match request.status {
            RequestStatus::RequestSent
            | RequestStatus::AwaitingQuotes
            | RequestStatus::QueryRaised => summary.awaiting += 1,
            RequestStatus::QuotesReceived => summary.received += 1,
            RequestStatus::Accepted => summary.closed += 1,
            RequestStatus::AllRejected => {}
        }
    }
    summary
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InsurerSummary {
    /// Requests this insurer was invited on.
    pub assigned: u64,
    /// Invitations still needing an answer or a quote.
    pub pending: u64,
    pub quoted: u64,
    /// Requests the broker awarded to this insurer.
    pub won: u64,
}

pub fn insurer_summary(requests: &[QuoteRequest], insurer: &InsurerName) -> InsurerSummary {
    let mut summary = InsurerSummary::default();
    for request in requests {
        let Some(response) = request.response(insurer) else {
            continue;
        };
        summary.assigned += 1;
        match response.status {
            ResponseStatus::Pending | ResponseStatus::Accepted | ResponseStatus::QueryRaised => {
                summary.pending += 1;
            }
            ResponseStatus::Quoted => summary.quoted += 1,
            ResponseStatus::Rejected => {}
        }
        if request.awarded_to.as_ref() == Some(insurer) {
            summary.won += 1;
        }
    }
    summary
}
