//! Derives a request's overall status from its insurer responses.

use crate::domain::request::RequestStatus;
use crate::domain::response::{InsurerResponse, ResponseStatus};

/// Pure derivation over the current response collection. Never inspects a
/// clock or a viewer, and never produces `Accepted` - winning a request is an
/// explicit broker action handled by the store.
///
/// Precedence:
/// 1. every response settled (`Quoted`/`Rejected`) -> `QuotesReceived`, or
///    `AllRejected` when nothing was quoted;
/// 2. any `Pending` or `Accepted` -> `AwaitingQuotes`;
/// 3. otherwise a lingering `QueryRaised` remains -> `QueryRaised`.
pub fn derive_status(responses: &[InsurerResponse]) -> RequestStatus {
    if responses.is_empty() {
        return RequestStatus::RequestSent;
    }

    let all_settled = responses
        .iter()
        .all(|r| matches!(r.status, ResponseStatus::Quoted | ResponseStatus::Rejected));
    if all_settled {
        let any_quoted = responses.iter().any(|r| r.status == ResponseStatus::Quoted);
        return if any_quoted { RequestStatus::QuotesReceived } else { RequestStatus::AllRejected };
    }

    let any_open = responses
        .iter()
        .any(|r| matches!(r.status, ResponseStatus::Pending | ResponseStatus::Accepted));
    if any_open {
        return RequestStatus::AwaitingQuotes;
    }

    RequestStatus::QueryRaised
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::derive_status;
    use crate::domain::request::RequestStatus;
    use crate::domain::response::{InsurerName, InsurerResponse, ResponseStatus};

    fn responses(statuses: &[ResponseStatus]) -> Vec<InsurerResponse> {
        statuses
            .iter()
            .enumerate()
            .map(|(index, status)| {
                let mut response =
                    InsurerResponse::pending(InsurerName(format!("Insurer {index}")));
                response.status = *status;
                response
            })
            .collect()
    }

    #[test]
    fn all_pending_awaits_quotes() {
        let set = responses(&[ResponseStatus::Pending, ResponseStatus::Pending]);
        assert_eq!(derive_status(&set), RequestStatus::AwaitingQuotes);
    }

    #[test]
    fn quoted_and_rejected_mix_means_quotes_received() {
        let set =
            responses(&[ResponseStatus::Quoted, ResponseStatus::Quoted, ResponseStatus::Rejected]);
        assert_eq!(derive_status(&set), RequestStatus::QuotesReceived);
    }

    #[test]
    fn every_insurer_rejecting_means_all_rejected() {
        let set = responses(&[ResponseStatus::Rejected, ResponseStatus::Rejected]);
        assert_eq!(derive_status(&set), RequestStatus::AllRejected);
    }

    #[test]
    fn one_open_response_keeps_the_request_awaiting() {
        let set = responses(&[ResponseStatus::Quoted, ResponseStatus::Accepted]);
        assert_eq!(derive_status(&set), RequestStatus::AwaitingQuotes);

        let set = responses(&[ResponseStatus::Rejected, ResponseStatus::Pending]);
        assert_eq!(derive_status(&set), RequestStatus::AwaitingQuotes);
    }

    #[test]
    fn lingering_query_with_everything_else_settled_surfaces_query_raised() {
        let set = responses(&[
            ResponseStatus::Quoted,
            ResponseStatus::Rejected,
            ResponseStatus::QueryRaised,
        ]);
        assert_eq!(derive_status(&set), RequestStatus::QueryRaised);
    }

    #[test]
    fn empty_collection_stays_request_sent() {
        assert_eq!(derive_status(&[]), RequestStatus::RequestSent);
    }

    fn arb_status() -> impl Strategy<Value = ResponseStatus> {
        prop_oneof![
            Just(ResponseStatus::Pending),
            Just(ResponseStatus::Accepted),
            Just(ResponseStatus::Quoted),
            Just(ResponseStatus::Rejected),
            Just(ResponseStatus::QueryRaised),
        ]
    }

    proptest! {
        #[test]
        fn derivation_is_idempotent(statuses in proptest::collection::vec(arb_status(), 0..12)) {
            let set = responses(&statuses);
            prop_assert_eq!(derive_status(&set), derive_status(&set));
        }

        #[test]
        fn derivation_never_yields_the_won_status(
            statuses in proptest::collection::vec(arb_status(), 0..12),
        ) {
            let set = responses(&statuses);
            prop_assert_ne!(derive_status(&set), RequestStatus::Accepted);
        }

        #[test]
        fn settled_books_split_on_any_quote(
            quoted in 0usize..6, rejected in 1usize..6,
        ) {
            let mut statuses = vec![ResponseStatus::Quoted; quoted];
            statuses.extend(std::iter::repeat(ResponseStatus::Rejected).take(rejected));
            let set = responses(&statuses);
            let expected = if quoted > 0 {
                RequestStatus::QuotesReceived
            } else {
                RequestStatus::AllRejected
            };
            prop_assert_eq!(derive_status(&set), expected);
        }
    }
}
