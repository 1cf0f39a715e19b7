use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, StyleSheet};
use scraper::Html;

use crate::error::{MinimizeError, MinimizeResult};
use crate::matcher::{parse_markup, HtmlMatcher};
use crate::options::MinimizeOptions;
use crate::reachability::{ReachabilityEngine, ReachabilityStats};
use crate::usage::{prune_unused_at_rules, UsageSets};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimizeOutput {
  pub final_css: String,
  /// Byte length of the input style text
  pub size_before: usize,
  /// Byte length of the output, not counting the stats comment
  pub size_after: usize,
  pub report: PruneReport,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PruneReport {
  pub reachability: ReachabilityStats,
  pub usage: UsageSets,
}

/// Reduces `stylesheet` to the rules that can apply to `markup`.
///
/// Everything built here, the presence cache included, lives for this call
/// only. Any error aborts the call without output.
#[tracing::instrument(
  level = "info",
  skip_all,
  fields(markup_len = markup.len(), css_len = stylesheet.len())
)]
pub fn minimize(
  markup: &str,
  stylesheet: &str,
  options: &MinimizeOptions,
) -> MinimizeResult<MinimizeOutput> {
  let mut sheet = StyleSheet::parse(stylesheet, ParserOptions::default()).map_err(|err| {
    MinimizeError::StyleParse {
      message: err.to_string(),
    }
  })?;
  let document = parse_markup(markup);

  let report = prune_stylesheet(&mut sheet, &document)?;

  if options.remove_exclamation_comments {
    sheet.license_comments.clear();
  }

  // Merges rules that ended up with the same selectors or declarations
  sheet
    .minify(MinifyOptions::default())
    .map_err(|err| MinimizeError::Serialize(err.to_string()))?;

  let printed = sheet.to_css(PrinterOptions {
    minify: true,
    ..PrinterOptions::default()
  })?;

  let size_before = stylesheet.len();
  let size_after = printed.code.len();
  tracing::debug!(size_before, size_after, "Minimized stylesheet");

  let final_css = if options.include_stats_comment {
    format!(
      "/* length before: {size_before} length after: {size_after} */\n{}",
      printed.code
    )
  } else {
    printed.code
  };

  Ok(MinimizeOutput {
    final_css,
    size_before,
    size_after,
    report,
  })
}

/// Runs the reachability pass and then the usage pass over a caller-owned
/// rule tree, leaving it in place for inspection.
pub fn prune_stylesheet(
  sheet: &mut StyleSheet<'_>,
  document: &Html,
) -> MinimizeResult<PruneReport> {
  let matcher = HtmlMatcher::new(document);
  let mut engine = ReachabilityEngine::new(&matcher);
  engine.prune(&mut sheet.rules)?;

  let reachability = engine.stats();
  tracing::debug!(?reachability, "Removed unreachable rules");

  let usage = prune_unused_at_rules(&mut sheet.rules)?;

  Ok(PruneReport {
    reachability,
    usage,
  })
}
