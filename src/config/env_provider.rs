/// Source of environment variables
///
/// Settings are read through this trait so tests can supply values without
/// touching the process environment, which parallel tests would race on.
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Reads the real process environment (after `.env` has been applied)
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory variables for unit tests
#[cfg(test)]
pub struct MockEnvironment {
    vars: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MockEnvironment {
    pub fn empty() -> Self {
        Self {
            vars: std::collections::HashMap::new(),
        }
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_vars(self, vars: &[(&str, &str)]) -> Self {
        vars.iter()
            .fold(self, |env, (key, value)| env.with_var(key, value))
    }
}

#[cfg(test)]
impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_environment_reads_process_env() {
        let provider = SystemEnvironment;
        assert!(provider.get_var("CMCS_SURELY_UNSET_VARIABLE_31337").is_none());
        assert!(provider.get_var("PATH").is_some());
    }

    #[test]
    fn test_mock_environment_with_vars() {
        let provider = MockEnvironment::empty()
            .with_var("PORT", "8080")
            .with_vars(&[("DATA_DIR", "/tmp/cmcs"), ("PORT", "9090")]);

        assert_eq!(provider.get_var("PORT"), Some("9090".to_string()));
        assert_eq!(provider.get_var("DATA_DIR"), Some("/tmp/cmcs".to_string()));
        assert_eq!(provider.get_var("HOST"), None);
    }
}
