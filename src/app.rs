//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler, registers
//! the job and runs the requested unit of work on its own thread.

use anyhow::{Context, Result, anyhow, bail};
use std::sync::{Arc, Mutex};
use tracing::{debug, error};

use post_finalize::cli::{Args, Command};
use post_finalize::config::{load_config, load_config_from_xml_path, validate_and_normalize};
use post_finalize::output as out;
use post_finalize::{CleanupStatus, Config, FinalizeError, Job, JobId, JobQueue, MoveStatus, PostProcessor};

use crate::logging::init_tracing;

const CLI_JOB: JobId = JobId(1);

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Config file first, CLI overrides on top.
    let mut cfg = match args.config.as_deref() {
        Some(path) => load_config_from_xml_path(path)?,
        None => load_config()?.unwrap_or_default(),
    };
    args.apply_overrides(&mut cfg);

    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            out::print_warn("Received interrupt; flushing logs. Files already moved stay in place.");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
            std::process::exit(130);
        })
        .context("install signal handler")?;
    }

    debug!("Starting post_finalize: {:?}", args);

    let result = run_job(&args.command, cfg);
    if let Err(e) = &result {
        match e.downcast_ref::<FinalizeError>() {
            Some(fe) => error!(code = fe.code(), error = %fe, "Job aborted"),
            None => error!(error = ?e, "Job aborted"),
        }
    }

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

fn run_job(command: &Command, mut cfg: Config) -> Result<()> {
    validate_and_normalize(&mut cfg)?;

    let name = command.job_name();
    let queue = Arc::new(JobQueue::new());
    let job = match command {
        Command::Move {
            inter_dir,
            final_dir,
            ..
        } => {
            let job = Job::new(&name, inter_dir);
            match final_dir {
                Some(d) => job.with_final_dir(d),
                None => job,
            }
        }
        Command::Cleanup { dir, final_dir, .. } => {
            let job = Job::new(&name, dir);
            match final_dir {
                Some(d) => job.with_final_dir(d),
                None => job,
            }
        }
    };
    queue.insert(CLI_JOB, job)?;
    queue.mark_working(CLI_JOB)?;

    let processor = Arc::new(PostProcessor::new(cfg, queue.clone()));

    match command {
        Command::Move { .. } => {
            let handle = processor
                .start_move_job(CLI_JOB)
                .context("spawn move thread")?;
            let status = handle
                .join()
                .map_err(|_| anyhow!("move thread panicked"))??;
            out::print_move_status(&name, status);
            if let Some(done) = queue.snapshot(CLI_JOB)
                && status == MoveStatus::Success
            {
                out::print_info(&format!("files are now in {}", done.dest_dir.display()));
            }
            if status != MoveStatus::Success {
                bail!("move for {name} failed");
            }
        }
        Command::Cleanup { .. } => {
            let handle = processor
                .start_cleanup_job(CLI_JOB)
                .context("spawn cleanup thread")?;
            let status = handle
                .join()
                .map_err(|_| anyhow!("cleanup thread panicked"))??;
            out::print_cleanup_status(&name, status);
            if status != CleanupStatus::Success {
                bail!("cleanup for {name} failed");
            }
        }
    }

    Ok(())
}
