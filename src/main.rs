use checkout_flow::application::submit;
use checkout_flow::domain::ports::Collaborators;
use checkout_flow::infrastructure::card_validator::BasicCardValidator;
use checkout_flow::infrastructure::simulated::{
    BackendOutcome, GatewayOutcome, SimulatedOrderClient, SimulatedTokenizer,
};
use checkout_flow::interfaces::json::request_reader::RequestReader;
use checkout_flow::interfaces::json::step_writer::StepWriter;
use checkout_flow::logging::{LogFormat, init_logging};
use clap::{Parser, ValueEnum};
use futures::StreamExt;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GatewayMode {
    Approve,
    Decline,
    Reject,
    Unavailable,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendMode {
    Accept,
    Fail,
}

/// Runs one checkout transaction against simulated payment collaborators and
/// prints each step as a JSON line.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Transaction request JSON file
    input: PathBuf,

    /// How the tokenization gateway behaves.
    #[arg(long, env = "CHECKOUT_GATEWAY", value_enum, default_value_t = GatewayMode::Approve)]
    gateway: GatewayMode,

    /// Message attached to a declined token request.
    #[arg(long, env = "CHECKOUT_DECLINE_MESSAGE", default_value = "card declined")]
    decline_message: String,

    /// How the order backend behaves.
    #[arg(long, env = "CHECKOUT_BACKEND", value_enum, default_value_t = BackendMode::Accept)]
    backend: BackendMode,

    /// Error reported by a failing backend.
    #[arg(long, env = "CHECKOUT_BACKEND_ERROR", default_value = "transaction rejected")]
    backend_error: String,

    /// Default log level when RUST_LOG is not set.
    #[arg(long, env = "CHECKOUT_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Log output format.
    #[arg(long, env = "CHECKOUT_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

impl Cli {
    fn collaborators(&self) -> Collaborators {
        let gateway = match self.gateway {
            GatewayMode::Approve => GatewayOutcome::Approve,
            GatewayMode::Decline => GatewayOutcome::Decline(self.decline_message.clone()),
            GatewayMode::Reject => GatewayOutcome::Reject,
            GatewayMode::Unavailable => GatewayOutcome::Unavailable,
        };
        let backend = match self.backend {
            BackendMode::Accept => BackendOutcome::Accept,
            BackendMode::Fail => BackendOutcome::Fail(self.backend_error.clone()),
        };

        Collaborators::new(
            Arc::new(BasicCardValidator::new()),
            Arc::new(SimulatedTokenizer::new(gateway)),
            Arc::new(SimulatedOrderClient::new(backend)),
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format);

    let file = File::open(&cli.input).into_diagnostic()?;
    let request = RequestReader::new(file).request().into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = StepWriter::new(stdout.lock());
    let mut flow = submit(request, cli.collaborators());

    while let Some(step) = flow.next().await {
        let step = step.into_diagnostic()?;
        writer.write_step(&step).into_diagnostic()?;
        if step.last {
            info!(step = step.name.as_str(), failed = step.is_failure(), "transaction finished");
        }
    }

    Ok(())
}
