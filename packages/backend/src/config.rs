//! Backend endpoint configuration.
//!
//! The client needs two values: the service's base URL and its public anon
//! key. Both come from the environment — the wasm build bakes them in at
//! compile time, native builds can override from the process environment.

use crate::error::Error;

pub const ENV_URL: &str = "TRACKER_BACKEND_URL";
pub const ENV_ANON_KEY: &str = "TRACKER_ANON_KEY";

/// Where the hosted backend lives and the public key that identifies this app.
#[derive(Clone, Debug, PartialEq)]
pub struct BackendConfig {
    /// Base URL without a trailing slash, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// Public anon key sent as the `apikey` header on every request.
    pub anon_key: String,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let url: String = url.into();
        Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    /// Resolve from the environment. Process env wins on native; the values
    /// captured at compile time are the fallback and the only source on wasm.
    pub fn from_env() -> Result<Self, Error> {
        let url = env_value(ENV_URL, option_env!("TRACKER_BACKEND_URL"))
            .ok_or_else(|| Error::Config(format!("{ENV_URL} is not set")))?;
        let anon_key = env_value(ENV_ANON_KEY, option_env!("TRACKER_ANON_KEY"))
            .ok_or_else(|| Error::Config(format!("{ENV_ANON_KEY} is not set")))?;
        Ok(Self::new(url, anon_key))
    }
}

fn env_value(key: &str, baked: Option<&str>) -> Option<String> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Ok(value) = std::env::var(key) {
            if !value.is_empty() {
                return Some(value);
            }
        }
    }
    let _ = key;
    baked.map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_strips_trailing_slash() {
        let config = BackendConfig::new("https://xyz.supabase.co/", "anon");
        assert_eq!(config.url, "https://xyz.supabase.co");
    }

    #[test]
    fn test_baked_value_used_when_process_env_missing() {
        assert_eq!(
            env_value("TRACKER_TEST_UNSET_VARIABLE", Some("baked")),
            Some("baked".to_string())
        );
        assert_eq!(env_value("TRACKER_TEST_UNSET_VARIABLE", None), None);
    }
}
