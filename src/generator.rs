//! Generation pipeline
//!
//! Runs the full sequence for one invocation: validate configuration,
//! discover model files, partition them, synthesize rule records and
//! assemble the script text. Strictly sequential and fail-fast; any error
//! aborts before a single byte of output exists.

use crate::classify::{partition, Classifier, MarkerClassifier, Partition};
use crate::config::BuildConfig;
use crate::discovery::discover;
use crate::fs::FileSystem;
use crate::rules::RuleRecord;
use crate::script::assemble;
use anyhow::Result;
use tracing::{debug, info};

/// Outcome of a generation run
#[derive(Debug)]
pub struct GeneratedScript {
    /// Complete build-script text, ready to be written
    pub text: String,
    /// How many files went down each route
    pub accelerated_count: usize,
    pub direct_count: usize,
}

/// Generates the build script with the production classifier.
pub fn generate(fs: &dyn FileSystem, config: &BuildConfig) -> Result<GeneratedScript> {
    generate_with(fs, config, &MarkerClassifier::new())
}

/// Generates the build script with a caller-supplied classification strategy.
pub fn generate_with(
    fs: &dyn FileSystem,
    config: &BuildConfig,
    classifier: &dyn Classifier,
) -> Result<GeneratedScript> {
    config.validate()?;

    let files = discover(fs, &config.shared_model_dir(), &config.model_dir)?;
    info!(count = files.len(), "Discovered model files");

    // Without acceleration every file takes the direct route; content is not read.
    let buckets = if config.accelerated() {
        partition(fs, classifier, files.clone())?
    } else {
        Partition::all_direct(files.clone())
    };
    debug!(
        accelerated = buckets.accelerated.len(),
        direct = buckets.direct.len(),
        "Partitioned model files"
    );

    let (accelerated, direct) = synthesize(&buckets);
    let text = assemble(config, &files, &accelerated, &direct);

    Ok(GeneratedScript {
        text,
        accelerated_count: accelerated.len(),
        direct_count: direct.len(),
    })
}

fn synthesize(buckets: &Partition) -> (Vec<RuleRecord>, Vec<RuleRecord>) {
    let accelerated: Vec<_> = buckets
        .accelerated
        .iter()
        .map(RuleRecord::accelerated)
        .collect();
    let direct: Vec<_> = buckets.direct.iter().map(RuleRecord::direct).collect();
    (accelerated, direct)
}
