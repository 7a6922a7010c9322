use crate::domain::value_objects::enums::roles::Role;

/// Writes guarded by the authorization policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ManagePaymentInformation,
    CreatePaymentAttempt,
}

pub trait AuthorizationPolicy: Send + Sync {
    fn permits(&self, role: Role, capability: Capability) -> bool;
}

/// Only patients may register instruments or start attempts.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatientOnlyPolicy;

impl AuthorizationPolicy for PatientOnlyPolicy {
    fn permits(&self, role: Role, capability: Capability) -> bool {
        match capability {
            Capability::ManagePaymentInformation | Capability::CreatePaymentAttempt => {
                role == Role::Patient
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_patients_hold_write_capabilities() {
        let policy = PatientOnlyPolicy;
        for capability in [
            Capability::ManagePaymentInformation,
            Capability::CreatePaymentAttempt,
        ] {
            assert!(policy.permits(Role::Patient, capability));
            assert!(!policy.permits(Role::Doctor, capability));
            assert!(!policy.permits(Role::Admin, capability));
            assert!(!policy.permits(Role::Unknown, capability));
        }
    }
}
