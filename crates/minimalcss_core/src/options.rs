use serde::Deserialize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MinimizeOptions {
  /// Prepend `/* length before: N length after: M */` to the output
  pub include_stats_comment: bool,
  /// Drop the leading `/*! ... */` comments, which are otherwise preserved.
  /// `/*!` comments after the first rule never survive parsing.
  pub remove_exclamation_comments: bool,
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn deserializes_camel_case_keys() {
    let options: MinimizeOptions =
      serde_json::from_str(r#"{ "includeStatsComment": true }"#).unwrap();

    assert_eq!(
      options,
      MinimizeOptions {
        include_stats_comment: true,
        remove_exclamation_comments: false,
      }
    );
  }

  #[test]
  fn defaults_to_everything_off() {
    let options: MinimizeOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(options, MinimizeOptions::default());
  }
}
