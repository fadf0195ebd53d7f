use anyhow::Context;
use clap::Parser;
use display_bridge::bridge::{display_bind_address, DisplayBridge};
use display_bridge::model::RunReport;
use generator::profile::{build_samples, SampleGenerator};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod display_bridge;
mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Synthetic ingest driver for the aero telemetry core")]
struct Args {
    /// Ingest one generated batch and print a scenario summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load engine and generator settings from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 600)]
    samples: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 20.0)]
    rate_hz: f64,
    /// Write the offline averages report as JSON
    #[arg(long)]
    report: Option<PathBuf>,
    /// Stream live samples and serve the HTTP display bridge until Ctrl+C
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.samples, args.seed, args.rate_hz)
    };

    let runner = Runner::new(workflow_config.engine.clone())?;
    let bridge = DisplayBridge::new(runner.engine());

    if args.offline {
        let samples = build_samples(&workflow_config.engine, &workflow_config.generator)?;
        let result = runner.execute(&samples)?;

        println!(
            "Offline run -> ingested {}, aggregated {}, degenerate {}, missing reference {}, missing readings {}",
            result.ingested,
            result.counters.aggregated,
            result.counters.degenerate,
            result.counters.missing_reference,
            result.counters.missing_readings
        );
        for (scenario, count) in &result.scenario_counts {
            println!("  {:<10} {} samples", scenario, count);
        }

        if let Some(report_path) = args.report {
            if let Some(parent) = report_path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            let report = serde_json::to_string_pretty(&RunReport::from(&result))
                .context("serializing run report")?;
            fs::write(&report_path, report)
                .with_context(|| format!("writing report {}", report_path.display()))?;
            bridge.publish_status(&format!("Report written to {}", report_path.display()));
        }
    }

    if args.serve {
        let _server = bridge.serve(display_bind_address());
        let stop = Arc::new(AtomicBool::new(false));
        let generator = SampleGenerator::new(
            &workflow_config.engine,
            workflow_config.generator.clone(),
        );
        let ingest = runner.spawn_live(generator, workflow_config.generator.rate_hz, stop.clone());
        bridge.publish_status("Live ingest and HTTP bridge running (Ctrl+C to stop)...");

        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;

        stop.store(true, Ordering::Relaxed);
        let ingested = ingest
            .join()
            .map_err(|_| anyhow::anyhow!("live ingest thread panicked"))??;
        bridge.publish_status(&format!("Stopped after {} live samples", ingested));
    }

    if !args.offline && !args.serve {
        log::info!("nothing to do; pass --offline and/or --serve");
    }

    Ok(())
}
