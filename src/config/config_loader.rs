use std::str::FromStr;

use anyhow::{Context, Result};

use super::{
    config_model::{
        Database, DotEnvyConfig, JwtSecret, PaymentPolicies, Server, SiblingServices,
    },
    stage::Stage,
};
use crate::domain::policies::{
    payment_cardinality::CardinalityPolicyKind, status_transitions::TransitionPolicyKind,
};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: parsed("SERVER_PORT")?,
        body_limit: parsed("SERVER_BODY_LIMIT")?,
        timeout: parsed("SERVER_TIMEOUT")?,
    };

    let database = Database {
        url: required("DATABASE_URL")?,
        max_connections: optional("DATABASE_MAX_CONNECTIONS")
            .map(|value| value.trim().parse::<u32>())
            .transpose()
            .context("DATABASE_MAX_CONNECTIONS is invalid")?,
    };

    let jwt = JwtSecret {
        access_secret: required("JWT_ACCESS_SECRET")?,
    };

    let sibling_services = SiblingServices {
        user_service_url: required("USER_SERVICE_URL")?,
        appointment_service_url: required("APPOINTMENT_SERVICE_URL")?,
    };

    let payment_policies = PaymentPolicies {
        status_transitions: optional("PAYMENT_STATUS_TRANSITIONS")
            .map(|value| TransitionPolicyKind::try_from(value.as_str()))
            .transpose()
            .context("PAYMENT_STATUS_TRANSITIONS is invalid")?
            .unwrap_or_default(),
        cardinality: optional("PAYMENT_CARDINALITY")
            .map(|value| CardinalityPolicyKind::try_from(value.as_str()))
            .transpose()
            .context("PAYMENT_CARDINALITY is invalid")?
            .unwrap_or_default(),
    };

    Ok(DotEnvyConfig {
        server,
        database,
        jwt,
        sibling_services,
        payment_policies,
    })
}

pub fn get_stage() -> Stage {
    dotenvy::dotenv().ok();

    let stage_str = std::env::var("STAGE").unwrap_or_default();
    Stage::try_from(stage_str.as_str()).unwrap_or_default()
}

fn required(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("{key} is invalid"))
}

fn optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parsed<T>(key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    required(key)?
        .trim()
        .parse::<T>()
        .with_context(|| format!("{key} is invalid"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn set_env_vars() {
        unsafe {
            env::set_var("SERVER_PORT", "8080");
            env::set_var("SERVER_BODY_LIMIT", "10");
            env::set_var("SERVER_TIMEOUT", "30");
            env::set_var("DATABASE_URL", "postgres://localhost:5432/payments");
            env::set_var("JWT_ACCESS_SECRET", "supersecretjwtsecretforunittesting123");
            env::set_var("USER_SERVICE_URL", "http://user-service:8080");
            env::set_var("APPOINTMENT_SERVICE_URL", "http://appointment-service:8080");
            env::set_var("PAYMENT_STATUS_TRANSITIONS", "forward_only");
            env::remove_var("PAYMENT_CARDINALITY");
            env::set_var("DATABASE_MAX_CONNECTIONS", "4");
        }
    }

    // Env vars are process-wide, so every case lives in one test.
    #[test]
    fn load_reads_environment() {
        set_env_vars();

        let config = load().unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.body_limit, 10);
        assert_eq!(config.server.timeout, 30);
        assert_eq!(config.database.max_connections, Some(4));
        assert_eq!(config.jwt.access_secret, "supersecretjwtsecretforunittesting123");
        assert_eq!(
            config.payment_policies.status_transitions,
            TransitionPolicyKind::ForwardOnly
        );
        assert_eq!(
            config.payment_policies.cardinality,
            CardinalityPolicyKind::Multiple
        );

        unsafe {
            env::set_var("SERVER_PORT", "not-a-port");
        }
        let err = load().unwrap_err();
        assert!(err.to_string().contains("SERVER_PORT"));

        unsafe {
            env::set_var("SERVER_PORT", "8080");
            env::set_var("PAYMENT_CARDINALITY", "sometimes");
        }
        let err = load().unwrap_err();
        assert!(err.to_string().contains("PAYMENT_CARDINALITY"));
    }
}
