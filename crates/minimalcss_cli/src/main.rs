#![deny(unused_crate_dependencies)]

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use minimalcss_core::{minimize, MinimizeOptions, MinimizeOutput};

/// Removes the CSS rules that can never apply to an HTML document
#[derive(Parser, Debug)]
#[command(name = "minimalcss", version)]
pub struct MinimalcssCommand {
  /// HTML document the stylesheet is reduced against
  #[arg(long)]
  pub html: PathBuf,
  /// Stylesheet to reduce; repeat to concatenate several in order
  #[arg(long, required = true)]
  pub css: Vec<PathBuf>,
  /// Where to write the reduced stylesheet [default: stdout]
  #[arg(long, short)]
  pub output: Option<PathBuf>,
  /// JSON file with `includeStatsComment` and `removeExclamationComments`
  #[arg(long)]
  pub config: Option<PathBuf>,
  /// Prepend a comment with the sizes before and after
  #[arg(long)]
  pub stats_comment: bool,
  /// Drop `/*! ... */` comments
  #[arg(long)]
  pub remove_exclamation_comments: bool,
  /// [possible values: "error", "warn", "info", "debug", "trace"]
  #[arg(env = "RUST_LOG")]
  pub _rust_log: Option<String>,
}

impl MinimalcssCommand {
  /// Options from `--config`, with flags switching options on over it.
  pub fn options(&self) -> anyhow::Result<MinimizeOptions> {
    let mut options = match &self.config {
      Some(path) => read_options(path)?,
      None => MinimizeOptions::default(),
    };

    options.include_stats_comment |= self.stats_comment;
    options.remove_exclamation_comments |= self.remove_exclamation_comments;

    Ok(options)
  }
}

fn read_options(path: &Path) -> anyhow::Result<MinimizeOptions> {
  let contents = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config {}", path.display()))?;
  serde_json::from_str(&contents)
    .with_context(|| format!("Invalid config {}", path.display()))
}

fn read_stylesheets(paths: &[PathBuf]) -> anyhow::Result<String> {
  let mut stylesheet = String::new();
  for path in paths {
    let contents = std::fs::read_to_string(path)
      .with_context(|| format!("Failed to read stylesheet {}", path.display()))?;
    stylesheet.push_str(&contents);
    if !stylesheet.ends_with('\n') {
      stylesheet.push('\n');
    }
  }
  Ok(stylesheet)
}

pub fn run(cmd: &MinimalcssCommand) -> anyhow::Result<MinimizeOutput> {
  let options = cmd.options()?;
  let markup = std::fs::read_to_string(&cmd.html)
    .with_context(|| format!("Failed to read document {}", cmd.html.display()))?;
  let stylesheet = read_stylesheets(&cmd.css)?;

  let output = minimize(&markup, &stylesheet, &options)?;
  tracing::info!(
    size_before = output.size_before,
    size_after = output.size_after,
    "Minimized {} stylesheet(s)",
    cmd.css.len()
  );

  match &cmd.output {
    Some(path) => std::fs::write(path, &output.final_css)
      .with_context(|| format!("Failed to write {}", path.display()))?,
    None => {
      let mut stdout = std::io::stdout().lock();
      writeln!(stdout, "{}", output.final_css)?;
    }
  }

  Ok(output)
}

fn main() -> anyhow::Result<()> {
  minimalcss_monitoring::initialize_from_env()?;

  let cmd = MinimalcssCommand::parse();
  let result = run(&cmd);

  minimalcss_monitoring::close_monitoring();
  result.map(|_| ())
}
