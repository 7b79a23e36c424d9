//! Colaborador de perfiles de usuario.

use log::debug;
use std::collections::HashMap;

use fin_domain::UserProfile;

use crate::error::ProviderError;
use crate::seed;

/// Fetcher de perfiles. `fetch` devuelve el perfil completo o
/// `ProviderError::ProfileNotFound`.
pub trait UserProfileProvider: Send + Sync {
    fn fetch(&self, user_id: i64) -> Result<UserProfile, ProviderError>;
}

/// Proveedor en memoria con perfiles fijos, para demos y tests.
pub struct CannedUserProfiles {
    profiles: HashMap<i64, UserProfile>,
}

impl CannedUserProfiles {
    pub fn empty() -> Self {
        CannedUserProfiles { profiles: HashMap::new() }
    }

    /// Proveedor cargado con los perfiles de muestra.
    pub fn with_seed() -> Self {
        let mut canned = CannedUserProfiles::empty();
        for profile in seed::sample_profiles() {
            canned.insert(profile);
        }
        canned
    }

    pub fn insert(&mut self, profile: UserProfile) {
        self.profiles.insert(profile.user_id, profile);
    }
}

impl UserProfileProvider for CannedUserProfiles {
    fn fetch(&self, user_id: i64) -> Result<UserProfile, ProviderError> {
        debug!("[providers] fetch perfil user_id={user_id}");
        self.profiles
            .get(&user_id)
            .cloned()
            .ok_or(ProviderError::ProfileNotFound(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_provider_returns_alice() {
        let provider = CannedUserProfiles::with_seed();
        let profile = provider.fetch(1).expect("perfil sembrado");
        assert_eq!(profile.name.as_deref(), Some("Alice Johnson"));
        assert_eq!(profile.monthly_income, Some(100_000.0));
    }

    #[test]
    fn test_unknown_user_yields_not_found_message() {
        let provider = CannedUserProfiles::empty();
        let err = provider.fetch(404).unwrap_err();
        assert_eq!(err.to_string(), "No profile found for user_id 404");
    }
}
