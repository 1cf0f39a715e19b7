#[derive(Debug, thiserror::Error)]
pub enum FromEnvError {
  #[error("Invalid value for {0}: {1}")]
  InvalidKey(String, anyhow::Error),
}

/// Reads `key`, treating unset, empty and non-unicode values as absent.
pub fn optional_var(key: &str) -> Option<String> {
  std::env::var(key).ok().filter(|value| !value.is_empty())
}
