use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InsurerName(pub String);

impl fmt::Display for InsurerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InsurerName {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// One insurer's stance on a request. "Accepted" means the insurer has taken
/// the invitation and owes a quote; it is not the broker-side win.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseStatus {
    Pending,
    Accepted,
    Quoted,
    Rejected,
    #[serde(rename = "Query Raised")]
    QueryRaised,
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Quoted => "Quoted",
            Self::Rejected => "Rejected",
            Self::QueryRaised => "Query Raised",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseAction {
    Accept,
    SubmitQuote,
    Reject,
    RaiseQuery,
    ResolveQuery,
    /// Broker-side award of a submitted quote; valid only against `Quoted`.
    AcceptQuote,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTerms {
    pub premium: Decimal,
    pub commission: Decimal,
    pub terms: Option<String>,
    pub quote_document: Option<String>,
}

impl QuoteTerms {
    pub fn new(premium: Decimal, commission: Decimal) -> Self {
        Self { premium, commission, terms: None, quote_document: None }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.premium <= Decimal::ZERO {
            return Err(DomainError::InvalidInput(format!(
                "premium must be positive, got {}",
                self.premium
            )));
        }
        if self.commission < Decimal::ZERO || self.commission > Decimal::from(100) {
            return Err(DomainError::InvalidInput(format!(
                "commission must be within 0..=100 percent, got {}",
                self.commission
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub text: String,
    pub attachment: Option<String>,
    pub resolved_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsurerResponse {
    pub insurer: InsurerName,
    pub status: ResponseStatus,
    pub quote: Option<QuoteTerms>,
    pub reason: Option<String>,
    pub query: Option<String>,
    pub query_attachment: Option<String>,
    pub resolution: Option<Resolution>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl InsurerResponse {
    pub fn pending(insurer: InsurerName) -> Self {
        Self {
            insurer,
            status: ResponseStatus::Pending,
            quote: None,
            reason: None,
            query: None,
            query_attachment: None,
            resolution: None,
            submitted_at: None,
        }
    }

    fn guard(&self, expected: ResponseStatus, action: ResponseAction) -> Result<(), DomainError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition { from: self.status, action })
        }
    }

    /// Pending -> Accepted: the insurer takes the invitation and owes a quote.
    pub fn accept(&mut self) -> Result<(), DomainError> {
        self.guard(ResponseStatus::Pending, ResponseAction::Accept)?;
        self.status = ResponseStatus::Accepted;
        Ok(())
    }

    /// Accepted -> Quoted. Stamps the submission time used for TAT.
    pub fn submit_quote(
        &mut self,
        terms: QuoteTerms,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.guard(ResponseStatus::Accepted, ResponseAction::SubmitQuote)?;
        terms.validate()?;
        self.status = ResponseStatus::Quoted;
        self.quote = Some(terms);
        self.submitted_at = Some(now);
        Ok(())
    }

    /// Pending -> Rejected. A non-empty reason is mandatory; any stale quote
    /// payload is dropped so re-solicitation can never leak old terms.
    pub fn reject(&mut self, reason: &str, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.guard(ResponseStatus::Pending, ResponseAction::Reject)?;
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(DomainError::InvalidInput("rejection reason must not be empty".to_owned()));
        }
        self.status = ResponseStatus::Rejected;
        self.reason = Some(reason.to_owned());
        self.quote = None;
        self.submitted_at = Some(now);
        Ok(())
    }

    /// Pending -> QueryRaised.
    pub fn raise_query(
        &mut self,
        text: &str,
        attachment: Option<String>,
    ) -> Result<(), DomainError> {
        self.guard(ResponseStatus::Pending, ResponseAction::RaiseQuery)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::InvalidInput("query text must not be empty".to_owned()));
        }
        self.status = ResponseStatus::QueryRaised;
        self.query = Some(text.to_owned());
        self.query_attachment = attachment;
        Ok(())
    }

    /// QueryRaised -> Accepted. The original query and attachment are kept for
    /// audit; the resolution is stored alongside them.
    pub fn resolve_query(
        &mut self,
        response_text: &str,
        attachment: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.guard(ResponseStatus::QueryRaised, ResponseAction::ResolveQuery)?;
        let response_text = response_text.trim();
        if response_text.is_empty() {
            return Err(DomainError::InvalidInput(
                "query resolution text must not be empty".to_owned(),
            ));
        }
        self.status = ResponseStatus::Accepted;
        self.resolution =
            Some(Resolution { text: response_text.to_owned(), attachment, resolved_at: now });
        Ok(())
    }
}
