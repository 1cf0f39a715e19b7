//! This module configures `tracing_subscriber` to write to standard error, a
//! rolling log file, or both.
//!
//! Tracing is disabled by default.
use std::sync::Arc;
use std::sync::Mutex;

use anyhow::anyhow;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

use crate::from_env::{optional_var, FromEnvError};

pub const TRACING_MODE_VAR: &str = "MINIMALCSS_TRACING_MODE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracerMode {
  /// Output the tracer logs to stderr, leaving stdout for the stylesheet
  Stderr,
  /// Output the tracer logs to an hourly rolling file in the temp directory
  File,
}

impl TracerMode {
  pub fn from_env() -> Result<Vec<Self>, FromEnvError> {
    let Some(mode) = optional_var(TRACING_MODE_VAR) else {
      return Ok(vec![]);
    };

    let mut tracer_modes = vec![];
    for mode in mode.split(',').map(|s| s.trim()) {
      let tracer_mode = match mode {
        "stderr" => Self::Stderr,
        "file" => Self::File,
        value => {
          return Err(FromEnvError::InvalidKey(
            String::from(TRACING_MODE_VAR),
            anyhow!("Invalid value: {}", value),
          ))
        }
      };

      if !tracer_modes.contains(&tracer_mode) {
        tracer_modes.push(tracer_mode);
      }
    }

    Ok(tracer_modes)
  }
}

pub struct Tracer {
  #[allow(unused)]
  worker_guards: Arc<Mutex<Vec<WorkerGuard>>>,
}

impl Tracer {
  pub fn new(options: &[TracerMode]) -> anyhow::Result<Self> {
    let mut worker_guards = vec![];

    let file_layer = if options.contains(&TracerMode::File) {
      let directory = std::env::temp_dir()
        .join("minimalcss_trace")
        .to_string_lossy()
        .to_string();
      let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::HOURLY)
        .max_log_files(4)
        .filename_prefix("minimalcss-tracing")
        .build(&directory)
        .map_err(|err| anyhow!(err))?;
      let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);
      worker_guards.push(worker_guard);

      Some(
        tracing_subscriber::fmt::layer()
          .with_writer(non_blocking)
          .with_ansi(false)
          .with_span_events(FmtSpan::CLOSE)
          .with_filter(EnvFilter::from_default_env()),
      )
    } else {
      None
    };

    let stderr_layer = if options.contains(&TracerMode::Stderr) {
      let (non_blocking, worker_guard) = tracing_appender::non_blocking(std::io::stderr());
      worker_guards.push(worker_guard);

      Some(
        tracing_subscriber::fmt::layer()
          .with_writer(non_blocking)
          .with_span_events(FmtSpan::CLOSE)
          .with_filter(EnvFilter::from_default_env()),
      )
    } else {
      None
    };

    let subscriber = Registry::default().with(file_layer).with(stderr_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(Self {
      worker_guards: Arc::new(Mutex::new(worker_guards)),
    })
  }
}
