mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::Parser;

use crate::input::layout::InputLayout;
use crate::input::load_track_profile;
use crate::model::profile::{TrackKind, TrackProfile, is_plain_component};
use crate::pipeline::PipelineError;
use crate::pipeline::stage1_load::run_stage1;
use crate::pipeline::stage2_metrics::run_stage2;
use crate::pipeline::stage3_aggregate::{Aggregate, run_stage3};
use crate::pipeline::stage4_report::{Stage4Input, write_reports};
use crate::report::text::render_summary_text;

#[derive(Debug, Parser)]
#[command(
    name = "mia-scoring",
    version,
    about = "Scores membership inference attack submissions against ground-truth challenge labels"
)]
struct Cli {
    /// Partition to score (dev, final, eval); names the input sub-directories.
    #[arg(long, aliases = ["dev_or_final", "dev_or_eval"])]
    partition: String,

    /// Base directory holding `ref/` (ground truth) and `res/` (submission).
    #[arg(long, default_value = "/app/input")]
    input: PathBuf,

    #[arg(long, default_value = "/app/output")]
    output: PathBuf,

    #[arg(long, value_enum, default_value_t = TrackKind::SingleTable)]
    track: TrackKind,

    /// JSON track profile; replaces the built-in profile selected by --track.
    #[arg(long, conflicts_with = "track")]
    track_config: Option<PathBuf>,

    /// Also write scores.html and every derived metric.
    #[arg(long)]
    detailed: bool,
}

#[derive(Debug, Clone)]
struct RunConfig {
    partition: String,
    input_dir: PathBuf,
    out_dir: PathBuf,
    profile: TrackProfile,
}

fn main() {
    logging::init_logging();
    let cli = Cli::parse();
    if let Err(err) = build_config(cli).and_then(|config| run(&config)) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn build_config(cli: Cli) -> Result<RunConfig, PipelineError> {
    if !is_plain_component(&cli.partition) {
        return Err(PipelineError::Config(format!(
            "partition {:?} must be a plain directory name",
            cli.partition
        )));
    }

    let mut profile = match &cli.track_config {
        Some(path) => load_track_profile(path)?,
        None => cli.track.profile(),
    };
    if cli.detailed {
        profile.detailed = true;
    }

    Ok(RunConfig {
        partition: cli.partition,
        input_dir: cli.input,
        out_dir: cli.output,
        profile,
    })
}

fn run(config: &RunConfig) -> Result<Aggregate, PipelineError> {
    let profile = &config.profile;
    tracing::info!(
        track = %profile.name,
        partition = %config.partition,
        input = %config.input_dir.display(),
        "scoring submission"
    );

    let layout = InputLayout::from_base(&config.input_dir);
    let stage1 = run_stage1(&layout, profile, &config.partition)?;
    let stage2 = run_stage2(&stage1.sets, profile)?;
    let aggregate = run_stage3(&stage2.scores, profile)?;

    write_reports(
        &Stage4Input {
            title: &profile.title,
            scores: &stage2.scores,
            aggregate: &aggregate,
            detailed: profile.detailed,
        },
        &config.out_dir,
    )?;

    print!(
        "{}",
        render_summary_text(
            &stage2.scores,
            &stage1.skipped,
            &aggregate,
            profile.max_fpr
        )
    );
    Ok(aggregate)
}

#[cfg(test)]
#[path = "../tests/src_inline/fixtures.rs"]
mod fixtures;

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
