use clap::Parser;
use gogog_exec::{CodeRunner, RunnerConfig};
use gogog_server::{create_app, run_server};
use std::{net::SocketAddr, path::PathBuf, time::Duration};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to listen on
    #[arg(short, long, env = "GOGOG_ADDR", default_value = "0.0.0.0:8080")]
    addr: SocketAddr,

    /// Toolchain binary used to run submissions
    #[arg(long, env = "GOGOG_TOOLCHAIN", default_value = "go")]
    toolchain: String,

    /// Wall-clock limit per execution, in seconds
    #[arg(short, long, env = "GOGOG_TIMEOUT_SECS", default_value = "5")]
    timeout_secs: u64,

    /// Directory for temporary source files [default: system temp dir]
    #[arg(long, env = "GOGOG_TEMP_DIR")]
    temp_dir: Option<PathBuf>,
}

impl Args {
    fn runner_config(&self) -> RunnerConfig {
        let config = RunnerConfig::default()
            .with_toolchain(self.toolchain.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs));

        match &self.temp_dir {
            Some(dir) => config.with_temp_dir(dir.clone()),
            None => config,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let runner = CodeRunner::new(args.runner_config());

    match runner.check_toolchain() {
        Ok(path) => info!("Using toolchain at {}", path.display()),
        Err(e) => warn!("{}; executions will fail until it is installed", e),
    }
    info!(
        "Execution timeout {:?}, temp dir {}",
        runner.config().timeout,
        runner.config().temp_dir.display()
    );

    let app = create_app(runner);
    run_server(app, args.addr).await?;

    Ok(())
}
