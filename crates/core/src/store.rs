//! In-memory request book: the single-writer collection every mutation goes
//! through, re-deriving overall status after each change.

use chrono::Utc;

use crate::aggregate::derive_status;
use crate::audit::{AuditCategory, AuditEvent, AuditOutcome, AuditSink, NoopAuditSink};
use crate::domain::request::{
    DocumentRef, QuoteRequest, RequestDetails, RequestId, RequestStatus,
};
use crate::domain::response::{
    InsurerName, InsurerResponse, QuoteTerms, ResponseAction, ResponseStatus,
};
use crate::domain::user::RequestScope;
use crate::errors::DomainError;

#[derive(Clone, Debug)]
pub struct NewRequest {
    pub client_name: String,
    pub product: String,
    pub created_by: String,
    pub creator_id: String,
    pub zone: String,
    pub details: RequestDetails,
    pub documents: Vec<DocumentRef>,
    pub insurers: Vec<InsurerName>,
}

pub struct RequestStore {
    requests: Vec<QuoteRequest>,
    next_seq: u64,
    audit: Box<dyn AuditSink>,
}

impl Default for RequestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestStore {
    pub fn new() -> Self {
        Self::with_audit(Box::new(NoopAuditSink))
    }

    pub fn with_audit(audit: Box<dyn AuditSink>) -> Self {
        Self { requests: Vec::new(), next_seq: 1, audit }
    }

    /// Seeds the store with a pre-built book (fixtures, snapshots). Sequence
    /// numbering continues after the seeded requests.
    pub fn with_requests(requests: Vec<QuoteRequest>) -> Self {
        let next_seq = requests.len() as u64 + 1;
        Self { requests, next_seq, audit: Box::new(NoopAuditSink) }
    }

    pub fn requests(&self) -> &[QuoteRequest] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn find(&self, request_id: &RequestId) -> Option<&QuoteRequest> {
        self.requests.iter().find(|request| &request.id == request_id)
    }

    pub fn requests_for(&self, scope: &RequestScope) -> Vec<&QuoteRequest> {
        self.requests.iter().filter(|request| scope.includes(request)).collect()
    }

    /// Creates a request with one `Pending` response per invited insurer and
    /// prepends it to the book (newest first).
    pub fn create_request(&mut self, new: NewRequest) -> Result<RequestId, DomainError> {
        if new.client_name.trim().is_empty() {
            return Err(DomainError::InvalidInput("client name must not be empty".to_owned()));
        }
        if new.product.trim().is_empty() {
            return Err(DomainError::InvalidInput("product must not be empty".to_owned()));
        }
        if new.insurers.is_empty() {
            return Err(DomainError::InvalidInput(
                "at least one insurer must be invited".to_owned(),
            ));
        }
        for (index, insurer) in new.insurers.iter().enumerate() {
            if new.insurers[..index].contains(insurer) {
                return Err(DomainError::InvalidInput(format!(
                    "insurer `{insurer}` is invited more than once"
                )));
            }
        }

        let id = RequestId(format!("OTE-{:03}", self.next_seq));
        self.next_seq += 1;

        let request = QuoteRequest {
            id: id.clone(),
            client_name: new.client_name,
            product: new.product,
            status: RequestStatus::RequestSent,
            created_by: new.created_by,
            creator_id: new.creator_id,
            zone: new.zone,
            created_at: Utc::now(),
            details: new.details,
            documents: new.documents,
            insurers: new.insurers.into_iter().map(InsurerResponse::pending).collect(),
            awarded_to: None,
        };
        let actor = request.created_by.clone();
        let invited = request.insurers.len();
        self.requests.insert(0, request);

        self.audit.emit(
            AuditEvent::new(
                Some(id.clone()),
                "request.created",
                AuditCategory::Request,
                actor,
                AuditOutcome::Success,
            )
            .with_metadata("invited", invited.to_string()),
        );
        Ok(id)
    }

    /// The insurer takes the invitation and owes a quote.
    pub fn accept_invitation(
        &mut self,
        request_id: &RequestId,
        insurer: &InsurerName,
    ) -> Result<(), DomainError> {
        self.update_response(request_id, insurer, "response.accepted", |response| {
            response.accept()
        })
    }

    pub fn submit_quote(
        &mut self,
        request_id: &RequestId,
        insurer: &InsurerName,
        terms: QuoteTerms,
    ) -> Result<(), DomainError> {
        self.update_response(request_id, insurer, "response.quoted", move |response| {
            response.submit_quote(terms, Utc::now())
        })
    }

    pub fn reject_quote(
        &mut self,
        request_id: &RequestId,
        insurer: &InsurerName,
        reason: &str,
    ) -> Result<(), DomainError> {
        self.update_response(request_id, insurer, "response.rejected", |response| {
            response.reject(reason, Utc::now())
        })
    }

    pub fn raise_query(
        &mut self,
        request_id: &RequestId,
        insurer: &InsurerName,
        query: &str,
        attachment: Option<String>,
    ) -> Result<(), DomainError> {
        self.update_response(request_id, insurer, "response.query_raised", |response| {
            response.raise_query(query, attachment)
        })
    }

    pub fn resolve_query(
        &mut self,
        request_id: &RequestId,
        insurer: &InsurerName,
        response_text: &str,
        attachment: Option<String>,
    ) -> Result<(), DomainError> {
        self.update_response(request_id, insurer, "response.query_resolved", |response| {
            response.resolve_query(response_text, attachment, Utc::now())
        })
    }

    /// The broker awards the request to one quoted insurer. This is the only
    /// way a request reaches `Accepted`, and nothing reverts it.
    pub fn accept_quote(
        &mut self,
        request_id: &RequestId,
        insurer: &InsurerName,
    ) -> Result<(), DomainError> {
        let (request_index, position) = match self.locate(request_id, insurer) {
            Ok(found) => found,
            Err(error) => {
                self.emit_rejected(request_id, insurer, "request.won", &error);
                return Err(error);
            }
        };

        let from = self.requests[request_index].insurers[position].status;
        if from != ResponseStatus::Quoted {
            let error =
                DomainError::InvalidTransition { from, action: ResponseAction::AcceptQuote };
            self.emit_rejected(request_id, insurer, "request.won", &error);
            return Err(error);
        }

        self.requests[request_index].status = RequestStatus::Accepted;
        self.requests[request_index].awarded_to = Some(insurer.clone());
        self.audit.emit(
            AuditEvent::new(
                Some(request_id.clone()),
                "request.won",
                AuditCategory::Request,
                insurer.0.clone(),
                AuditOutcome::Success,
            )
            .with_metadata("insurer", insurer.0.clone()),
        );
        Ok(())
    }

    /// Locates one response, applies the transition to a scratch copy, and
    /// only commits (plus status re-derivation) when it succeeds. A failed
    /// mutation leaves the book exactly as it was.
    fn update_response<F>(
        &mut self,
        request_id: &RequestId,
        insurer: &InsurerName,
        event_type: &str,
        apply: F,
    ) -> Result<(), DomainError>
    where
        F: FnOnce(&mut InsurerResponse) -> Result<(), DomainError>,
    {
        let (request_index, position) = match self.locate(request_id, insurer) {
            Ok(found) => found,
            Err(error) => {
                self.emit_rejected(request_id, insurer, event_type, &error);
                return Err(error);
            }
        };

        let mut updated = self.requests[request_index].insurers[position].clone();
        if let Err(error) = apply(&mut updated) {
            self.emit_rejected(request_id, insurer, event_type, &error);
            return Err(error);
        }

        let new_status = updated.status;
        let request = &mut self.requests[request_index];
        request.insurers[position] = updated;
        let derived = derive_status(&request.insurers);
        if request.status != RequestStatus::Accepted {
            request.status = derived;
        }
        let overall = request.status;

        self.audit.emit(
            AuditEvent::new(
                Some(request_id.clone()),
                event_type,
                AuditCategory::Response,
                insurer.0.clone(),
                AuditOutcome::Success,
            )
            .with_metadata("response_status", new_status.to_string())
            .with_metadata("request_status", overall.to_string()),
        );
        Ok(())
    }

    fn locate(
        &self,
        request_id: &RequestId,
        insurer: &InsurerName,
    ) -> Result<(usize, usize), DomainError> {
        let request_index = self
            .requests
            .iter()
            .position(|request| &request.id == request_id)
            .ok_or_else(|| DomainError::RequestNotFound(request_id.clone()))?;
        let position = self.requests[request_index]
            .insurers
            .iter()
            .position(|response| &response.insurer == insurer)
            .ok_or_else(|| DomainError::InsurerNotFound {
                request: request_id.clone(),
                insurer: insurer.clone(),
            })?;
        Ok((request_index, position))
    }

    fn emit_rejected(
        &self,
        request_id: &RequestId,
        insurer: &InsurerName,
        event_type: &str,
        error: &DomainError,
    ) {
        self.audit.emit(
            AuditEvent::new(
                Some(request_id.clone()),
                event_type,
                AuditCategory::Response,
                insurer.0.clone(),
                AuditOutcome::Rejected,
            )
            .with_metadata("error", error.to_string()),
        );
    }
}
