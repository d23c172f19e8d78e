use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::sync::oneshot;
use tracing::error;

use host_probe::{HostProbe, LogFormat, ProbeConfig, ProbeRequest, ProbeResult};

#[derive(Debug, Parser)]
#[command(name = "host-probe", version, about = "Resolve a host and check whether it is reachable")]
struct Args {
    /// Hostname or textual address
    host: String,

    /// JSON config file (defaults to $PROBE_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reachability check timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    #[arg(long)]
    log_level: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let mut config = ProbeConfig::load(args.config.as_deref()).await?;
    config.apply_overrides(args.timeout_ms, args.log_level.clone());
    config.validate()?;

    init_tracing(&config)?;

    let prober = HostProbe::from_config(&config);
    let (tx, rx) = oneshot::channel();
    prober.spawn_with(ProbeRequest::new(args.host.clone()), tx);

    let result = match rx.await {
        Ok(result) => result,
        Err(e) => {
            error!("probe task ended without a result: {:?}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string(&result)?);
    } else {
        println!("{}", summary(&result));
    }

    Ok(if result.success { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn init_tracing(config: &ProbeConfig) -> anyhow::Result<()> {
    let level = config.get_tracing_level()?;
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("host_probe={}", level.as_str().to_lowercase()).parse()?);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
    Ok(())
}

fn summary(r: &ProbeResult) -> String {
    match (&r.error, &r.ip, r.time_millis) {
        (Some(err), _, _) => format!("{}: {}", r.host, err),
        (None, Some(ip), Some(ms)) if r.success => format!("{} ({}): reachable in {} ms", r.host, ip, ms),
        (None, Some(ip), Some(ms)) => format!("{} ({}): not reachable after {} ms", r.host, ip, ms),
        _ => format!("{}: incomplete result", r.host),
    }
}
