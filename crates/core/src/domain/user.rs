use serde::{Deserialize, Serialize};

use crate::domain::request::QuoteRequest;
use crate::domain::response::InsurerName;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Broker,
    Insurer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SalesRm,
    TeamMember,
    ZonalHead,
    Nsm,
    Admin,
    Underwriter,
    InsurerSalesRm,
}

impl Role {
    pub fn entity(self) -> Entity {
        match self {
            Self::SalesRm | Self::TeamMember | Self::ZonalHead | Self::Nsm | Self::Admin => {
                Entity::Broker
            }
            Self::Underwriter | Self::InsurerSalesRm => Entity::Insurer,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub brokerage: Option<String>,
    pub insurer: Option<InsurerName>,
    pub zone: Option<String>,
    pub assigned_rm: Option<String>,
}

/// Which slice of the request book a viewer may see. One closed predicate per
/// role; no string dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestScope {
    Own(String),
    Team(String),
    Zone(String),
    All,
    Insurer(InsurerName),
}

impl RequestScope {
    /// The visibility a user gets on their own dashboard.
    pub fn for_user(user: &User) -> Self {
        match user.role {
            Role::SalesRm => Self::Own(user.id.clone()),
            Role::TeamMember => {
                Self::Team(user.assigned_rm.clone().unwrap_or_else(|| user.id.clone()))
            }
            Role::ZonalHead => Self::Zone(user.zone.clone().unwrap_or_default()),
            Role::Nsm | Role::Admin => Self::All,
            Role::Underwriter | Role::InsurerSalesRm => Self::Insurer(
                user.insurer.clone().unwrap_or_else(|| InsurerName(String::new())),
            ),
        }
    }

    pub fn includes(&self, request: &QuoteRequest) -> bool {
        match self {
            Self::Own(creator_id) => &request.creator_id == creator_id,
            Self::Team(rm_id) => &request.creator_id == rm_id,
            Self::Zone(zone) => &request.zone == zone,
            Self::All => true,
            Self::Insurer(insurer) => request.response(insurer).is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{RequestScope, Role, User};
    use crate::domain::request::{QuoteRequest, RequestDetails, RequestId, RequestStatus};
    use crate::domain::response::{InsurerName, InsurerResponse};

    fn request(creator_id: &str, zone: &str, insurers: &[&str]) -> QuoteRequest {
        QuoteRequest {
            id: RequestId("OTE-001".to_owned()),
            client_name: "GreenField Industries".to_owned(),
            product: "Marine Insurance".to_owned(),
            status: RequestStatus::RequestSent,
            created_by: "Ravi Kumar".to_owned(),
            creator_id: creator_id.to_owned(),
            zone: zone.to_owned(),
            created_at: Utc::now(),
            details: RequestDetails::default(),
            documents: Vec::new(),
            insurers: insurers
                .iter()
                .map(|name| InsurerResponse::pending(InsurerName::from(*name)))
                .collect(),
            awarded_to: None,
        }
    }

    fn user(role: Role) -> User {
        User {
            id: "broker-sales-rm".to_owned(),
            name: "Ravi Kumar".to_owned(),
            role,
            brokerage: Some("Global Brokerage Inc.".to_owned()),
            insurer: None,
            zone: Some("North".to_owned()),
            assigned_rm: None,
        }
    }

    #[test]
    fn sales_rm_sees_only_own_requests() {
        let scope = RequestScope::for_user(&user(Role::SalesRm));
        assert!(scope.includes(&request("broker-sales-rm", "North", &[])));
        assert!(!scope.includes(&request("broker-other", "North", &[])));
    }

    #[test]
    fn team_member_sees_their_rm_requests() {
        let mut member = user(Role::TeamMember);
        member.id = "broker-team-member".to_owned();
        member.assigned_rm = Some("broker-sales-rm".to_owned());

        let scope = RequestScope::for_user(&member);
        assert!(scope.includes(&request("broker-sales-rm", "South", &[])));
        assert!(!scope.includes(&request("broker-team-member", "South", &[])));
    }

    #[test]
    fn zonal_head_is_scoped_by_zone_and_nsm_sees_all() {
        let zonal = RequestScope::for_user(&user(Role::ZonalHead));
        assert!(zonal.includes(&request("anyone", "North", &[])));
        assert!(!zonal.includes(&request("anyone", "South", &[])));

        let national = RequestScope::for_user(&user(Role::Nsm));
        assert!(national.includes(&request("anyone", "South", &[])));
    }

    #[test]
    fn insurer_roles_see_requests_they_are_invited_on() {
        let mut underwriter = user(Role::Underwriter);
        underwriter.insurer = Some(InsurerName::from("ICICI Lombard General Insurance"));

        let scope = RequestScope::for_user(&underwriter);
        assert!(scope.includes(&request("anyone", "North", &["ICICI Lombard General Insurance"])));
        assert!(!scope.includes(&request("anyone", "North", &["New India Assurance"])));
    }

    #[test]
    fn roles_map_to_their_entity() {
        assert_eq!(Role::Admin.entity(), super::Entity::Broker);
        assert_eq!(Role::Underwriter.entity(), super::Entity::Insurer);
    }
}
