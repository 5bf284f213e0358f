use std::io;
use std::sync::Arc;

use prodcon::prelude::*;
use tokio_util::sync::CancellationToken;

type StdoutReport = Arc<TextReport<io::Stdout>>;

#[tokio::main]
async fn main() {
    let args = Args::parse_with_usage();

    CliApp::new("prodcon")
        .with_drain_on_signal(true)
        .run(|shutdown| run_pipeline(args, shutdown))
        .await
}

/// Main application logic - runs the pipeline and prints the global report
async fn run_pipeline(args: Args, shutdown: CancellationToken) -> Result<(), AppError> {
    setup_telemetry(args.log_directive())?;

    let config = args.pipeline_config()?;
    println!("{}\n", config);

    let sink: StdoutReport = Arc::new(TextReport::new(io::stdout()));
    let results = match args.global_store {
        GlobalStore::Locked => {
            run_with(config, LockedAccumulator::new(), Arc::clone(&sink), args.seed, shutdown)
                .await?
        }
        GlobalStore::Sharded => {
            run_with(config, ConcurrentAccumulator::new(), Arc::clone(&sink), args.seed, shutdown)
                .await?
        }
    };

    sink.report("Global Results", &results.global)?;

    Ok(())
}

/// Run the blocking pipeline off the async runtime, cancelling production
/// when `shutdown` fires
async fn run_with<G>(
    config: PipelineConfig,
    global: G,
    sink: StdoutReport,
    seed: Option<u64>,
    shutdown: CancellationToken,
) -> Result<PipelineResults, AppError>
where
    G: SharedAccumulator + 'static,
{
    let pipeline = Pipeline::new(config, global, sink).with_sources(move |id| match seed {
        Some(seed) => RandomSource::seeded(seed.wrapping_add(u64::from(id))),
        None => RandomSource::new(),
    });

    let cancel = pipeline.cancel_handle();
    let watcher = tokio::spawn(async move {
        shutdown.cancelled().await;
        cancel.cancel();
    });

    let results = tokio::task::spawn_blocking(move || pipeline.run()).await?;
    watcher.abort();

    Ok(results?)
}
