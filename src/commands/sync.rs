//! Main sync command

use crate::executor::{execute_manifest, ExecutionEvent, ExecutionStats};
use crate::manifest::load_manifest;
use crate::types::SyncError;
use crate::ui::ProgressReporter;
use crate::Config;

/// Run the sync operation
///
/// Loads the manifest named by `config`, copies what changed and prints a
/// summary. The first error ends the run.
pub fn run(config: &Config) -> Result<ExecutionStats, SyncError> {
    let manifest = load_manifest(&config.manifest_path)?;
    tracing::debug!(
        "Loaded {} file(s) and {} dir(s) from {}",
        manifest.files.len(),
        manifest.dirs.len(),
        config.manifest_path.display()
    );

    let reporter = ProgressReporter::new(config.verbose);
    let on_event = |event: &ExecutionEvent| reporter.handle(event);

    let result = execute_manifest(&manifest, config, Some(&on_event));
    if result.is_err() {
        reporter.abandon();
    }
    result
}
