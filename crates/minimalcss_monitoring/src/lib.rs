//! This module configures tracing for the minimalcss binary.
//!
//! Tracing is disabled unless `MINIMALCSS_TRACING_MODE` asks for it, and
//! should only be initialized once per process.
use std::sync::Mutex;

pub use from_env::FromEnvError;
pub use tracer::TracerMode;
pub use tracer::TRACING_MODE_VAR;

mod from_env;
mod tracer;

pub static MONITORING_GUARD: Mutex<Option<MonitoringGuard>> = Mutex::new(None);

#[derive(Default)]
pub struct MonitoringGuard {
  #[allow(unused)]
  tracer: Option<tracer::Tracer>,
}

#[derive(Debug, Default)]
pub struct MonitoringOptions {
  pub tracing_options: Vec<TracerMode>,
}

impl MonitoringOptions {
  pub fn from_env() -> Result<Self, FromEnvError> {
    Ok(Self {
      tracing_options: TracerMode::from_env()?,
    })
  }
}

pub fn initialize_monitoring(options: MonitoringOptions) -> anyhow::Result<()> {
  let mut global = MONITORING_GUARD
    .lock()
    .map_err(|_| anyhow::anyhow!("Monitoring guard is poisoned"))?;
  if global.is_some() {
    tracing::warn!("Monitoring is getting set-up twice, this will no-op");
    return Ok(());
  }

  let tracer = if options.tracing_options.is_empty() {
    None
  } else {
    Some(tracer::Tracer::new(&options.tracing_options)?)
  };

  *global = Some(MonitoringGuard { tracer });

  Ok(())
}

pub fn initialize_from_env() -> anyhow::Result<()> {
  initialize_monitoring(MonitoringOptions::from_env()?)
}

/// Drops the tracer guards, flushing any buffered log lines.
pub fn close_monitoring() {
  if let Ok(mut global) = MONITORING_GUARD.lock() {
    if let Some(guard) = global.as_mut() {
      guard.tracer = None;
    }
  }
}
