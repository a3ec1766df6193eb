use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::response::{InsurerName, InsurerResponse};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Overall request status. Derived from the response collection, except
/// `Accepted` which only an explicit broker win action can set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    #[serde(rename = "Request Sent")]
    RequestSent,
    #[serde(rename = "Awaiting Quotes")]
    AwaitingQuotes,
    #[serde(rename = "Quotes Received")]
    QuotesReceived,
    #[serde(rename = "Query Raised")]
    QueryRaised,
    #[serde(rename = "All Rejected")]
    AllRejected,
    Accepted,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::RequestSent => "Request Sent",
            Self::AwaitingQuotes => "Awaiting Quotes",
            Self::QuotesReceived => "Quotes Received",
            Self::QueryRaised => "Query Raised",
            Self::AllRejected => "All Rejected",
            Self::Accepted => "Accepted",
        };
        f.write_str(label)
    }
}

/// Placement details captured on the request form. Opaque to the aggregation
/// core; carried for the presentation layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDetails {
    pub policy_type: String,
    pub sum_insured: Decimal,
    pub city: String,
    pub partner_code: Option<String>,
    pub partner_name: Option<String>,
    pub client_email: Option<String>,
    pub client_mobile: Option<String>,
    pub pincode: Option<String>,
    pub customer_type: Option<String>,
    pub occupancy: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub name: String,
    pub doc_type: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub id: RequestId,
    pub client_name: String,
    pub product: String,
    pub status: RequestStatus,
    pub created_by: String,
    pub creator_id: String,
    pub zone: String,
    pub created_at: DateTime<Utc>,
    pub details: RequestDetails,
    pub documents: Vec<DocumentRef>,
    pub insurers: Vec<InsurerResponse>,
    /// Set once by the broker's award action; never cleared.
    pub awarded_to: Option<InsurerName>,
}

impl QuoteRequest {
    pub fn response(&self, insurer: &InsurerName) -> Option<&InsurerResponse> {
        self.insurers.iter().find(|response| &response.insurer == insurer)
    }

    pub fn response_mut(&mut self, insurer: &InsurerName) -> Option<&mut InsurerResponse> {
        self.insurers.iter_mut().find(|response| &response.insurer == insurer)
    }

    /// Lowest premium among responses carrying a quote, shared on exact ties.
    pub fn l1_premium(&self) -> Option<Decimal> {
        self.insurers
            .iter()
            .filter_map(|response| response.quote.as_ref().map(|quote| quote.premium))
            .min()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::{QuoteRequest, RequestDetails, RequestId, RequestStatus};
    use crate::domain::response::{InsurerName, InsurerResponse, QuoteTerms, ResponseStatus};

    fn request_with_premiums(premiums: &[Option<i64>]) -> QuoteRequest {
        let insurers = premiums
            .iter()
            .enumerate()
            .map(|(index, premium)| {
                let mut response =
                    InsurerResponse::pending(InsurerName(format!("Insurer {index}")));
                if let Some(premium) = premium {
                    response.status = ResponseStatus::Quoted;
                    response.quote =
                        Some(QuoteTerms::new(Decimal::from(*premium), Decimal::from(10)));
                    response.submitted_at = Some(Utc::now());
                }
                response
            })
            .collect();

        QuoteRequest {
            id: RequestId("OTE-001".to_owned()),
            client_name: "TechNova Solutions".to_owned(),
            product: "Fire Insurance".to_owned(),
            status: RequestStatus::RequestSent,
            created_by: "Ravi Kumar".to_owned(),
            creator_id: "broker-sales-rm".to_owned(),
            zone: "North".to_owned(),
            created_at: Utc::now(),
            details: RequestDetails::default(),
            documents: Vec::new(),
            insurers,
            awarded_to: None,
        }
    }

    #[test]
    fn l1_premium_is_the_minimum_quoted_premium() {
        let request = request_with_premiums(&[Some(100_000), Some(90_000), None]);
        assert_eq!(request.l1_premium(), Some(Decimal::from(90_000)));
    }

    #[test]
    fn l1_premium_is_absent_without_quotes() {
        let request = request_with_premiums(&[None, None]);
        assert_eq!(request.l1_premium(), None);
    }

    #[test]
    fn responses_are_looked_up_by_insurer_name() {
        let request = request_with_premiums(&[Some(100_000), None]);
        assert!(request.response(&InsurerName::from("Insurer 1")).is_some());
        assert!(request.response(&InsurerName::from("Insurer 9")).is_none());
    }

    #[test]
    fn status_labels_match_the_portal_vocabulary() {
        assert_eq!(RequestStatus::QuotesReceived.to_string(), "Quotes Received");
        assert_eq!(
            serde_json::to_string(&RequestStatus::AllRejected).expect("serialize"),
            "\"All Rejected\""
        );
    }
}
