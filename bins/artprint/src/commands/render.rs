//! Render commands

use crate::RenderOneArgs;
use anyhow::{bail, Result};
use artprint_cli::output::{format_size, RunSummary, Status};
use artprint_cli::progress::{finish_error, finish_success, job_progress};
use artprint_core::config::{Artwork, BackgroundConfig, Config, RenderJob, RenderSettings};
use artprint_core::Error;
use artprint_image::{render_job, EncodeOutcome};
use artprint_telemetry::Timer;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Render the configured jobs, or only those whose ids are listed
pub fn run(config_path: Option<&Path>, only: &[String]) -> Result<()> {
    let config = Config::load(config_path)?;
    match &config.path {
        Some(path) => Status::info(&format!("Using {}", path.display())),
        None => Status::info("No artprint.toml found, using defaults"),
    }

    let jobs = select_jobs(&config, only)?;
    if jobs.is_empty() {
        Status::warning("No render jobs configured");
        return Ok(());
    }

    let started = Instant::now();
    let pb = job_progress(jobs.len() as u64);
    let mut summary = RunSummary::default();

    for job in &jobs {
        pb.set_message(job.artwork.title.clone());
        let settings = config.schema.settings_for(job);
        let timer = Timer::start(format!("render:{}", job.artwork.id));

        match render_job(&job.artwork, settings) {
            Ok(EncodeOutcome::Written { size, .. }) => summary.record_written(size),
            Ok(EncodeOutcome::ExceededBudget { best_size, .. }) => {
                summary.record_over_budget();
                pb.suspend(|| {
                    Status::warning(&format!(
                        "{}: smallest encoding was {}, nothing written",
                        job.artwork.id,
                        format_size(best_size)
                    ))
                });
            }
            Err(e) => {
                summary.record_failure();
                pb.suspend(|| Status::error(&format!("{}: {e}", job.artwork.id)));
            }
        }

        timer.stop();
        pb.inc(1);
    }

    if summary.failed > 0 {
        finish_error(&pb, "done with failures");
    } else {
        finish_success(&pb, "done");
    }
    summary.print(started.elapsed());

    if summary.failed > 0 {
        bail!("{} of {} render jobs failed", summary.failed, jobs.len());
    }
    Ok(())
}

fn select_jobs<'a>(config: &'a Config, only: &[String]) -> Result<Vec<&'a RenderJob>> {
    if only.is_empty() {
        return Ok(config.schema.jobs.iter().collect());
    }

    only.iter()
        .map(|id| {
            config.schema.job(id).ok_or_else(|| {
                Error::invalid_settings(format!("no render job with id `{id}`"))
                    .with_suggestion("Check the `id` fields under [[jobs]] in artprint.toml")
                    .into()
            })
        })
        .collect()
}

/// Render one artwork file straight from the command line
pub fn run_one(args: &RenderOneArgs) -> Result<()> {
    let (artwork, settings) = job_from_args(args)?;

    match render_job(&artwork, &settings)? {
        EncodeOutcome::Written { path, size, quality } => {
            Status::success(&format!("Wrote {}", path.display()));
            Status::detail("size", &format_size(size));
            Status::detail("quality", &quality.to_string());
            Ok(())
        }
        EncodeOutcome::ExceededBudget { best_size, floor_quality } => {
            Status::warning(&format!(
                "Could not get under {} (smallest: {} at quality {floor_quality}); nothing written",
                format_size(settings.max_file_size),
                format_size(best_size)
            ));
            Ok(())
        }
    }
}

fn job_from_args(args: &RenderOneArgs) -> Result<(Artwork, RenderSettings)> {
    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| Error::file_not_found(&args.file))?;
    let stem = args
        .file
        .file_stem()
        .map_or_else(|| file_name.clone(), |s| s.to_string_lossy().into_owned());

    let artwork = Artwork {
        id: args.id.clone().unwrap_or_else(|| stem.clone()),
        title: stem,
        height_inches: args.height_in,
        width_inches: args.width_in,
        file_name,
    };

    let background = match (&args.wall, args.wall_height_in, args.transparent) {
        (Some(image), Some(height_inches), _) => BackgroundConfig::Wall {
            image: image.clone(),
            height_inches,
        },
        (_, _, true) => BackgroundConfig::Transparent,
        _ => BackgroundConfig::default(),
    };

    let settings = RenderSettings {
        format: args.format,
        canvas_width: args.canvas_width,
        canvas_height: args.canvas_height,
        background,
        position: args.position,
        x_offset: args.x_offset,
        y_offset: args.y_offset,
        input_dir: args
            .file
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
        output_dir: args.output_dir.clone(),
        output_name: args.output_name.clone(),
        max_file_size: args.max_size,
        shadow_layers: args.shadow_layers,
    };
    settings.validate()?;

    Ok((artwork, settings))
}
