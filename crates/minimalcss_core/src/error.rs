use thiserror::Error;

pub type MinimizeResult<T> = std::result::Result<T, MinimizeError>;

/// A selector segment the matching engine could not parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid selector `{segment}`: {reason}")]
pub struct InvalidSelector {
  pub segment: String,
  pub reason: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MinimizeError {
  #[error("Failed to parse CSS: {message}")]
  StyleParse { message: String },

  #[error("Unable to match selector `{selector}` against the document: {source}")]
  SelectorSyntax {
    selector: String,
    source: InvalidSelector,
  },

  #[error("Failed to print CSS: {}", .0)]
  Serialize(String),
}

impl MinimizeError {
  /// The selector text that aborted the run, if a selector did.
  pub fn selector(&self) -> Option<&str> {
    let Self::SelectorSyntax { selector, .. } = self else {
      return None;
    };
    Some(selector)
  }
}

impl From<lightningcss::error::PrinterError> for MinimizeError {
  fn from(error: lightningcss::error::PrinterError) -> Self {
    MinimizeError::Serialize(error.to_string())
  }
}
