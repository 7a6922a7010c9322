use crate::domain::policies::{
    payment_cardinality::CardinalityPolicyKind, status_transitions::TransitionPolicyKind,
};

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub database: Database,
    pub jwt: JwtSecret,
    pub sibling_services: SiblingServices,
    pub payment_policies: PaymentPolicies,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    /// Megabytes.
    pub body_limit: u64,
    /// Seconds.
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
    /// Pool size; r2d2's default when unset.
    pub max_connections: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct JwtSecret {
    pub access_secret: String,
}

#[derive(Debug, Clone)]
pub struct SiblingServices {
    pub user_service_url: String,
    pub appointment_service_url: String,
}

#[derive(Debug, Clone, Default)]
pub struct PaymentPolicies {
    pub status_transitions: TransitionPolicyKind,
    pub cardinality: CardinalityPolicyKind,
}
