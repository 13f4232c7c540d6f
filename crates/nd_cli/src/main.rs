use clap::{Args, Parser, Subcommand};
use nd_inference::{global_model, Config};
use nd_pipeline::{ErrorResponse, Pipeline, SummarizeRequest};
use nd_web::{create_app, AppState};
use tracing::info;

mod logging;

#[derive(Parser)]
#[command(name = "nd", about = "News article summarization and evaluation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1:5000")]
        addr: String,
        #[command(flatten)]
        model: ModelArgs,
    },
    /// Summarize one article and print the JSON envelope
    Summarize {
        /// Article URL to fetch and summarize
        #[arg(long)]
        url: Option<String>,
        /// Raw text, used instead of (or as fallback for) the URL
        #[arg(long)]
        text: Option<String>,
        #[command(flatten)]
        model: ModelArgs,
    },
}

#[derive(Args)]
struct ModelArgs {
    /// Base URL of the hosted summarization endpoint
    #[arg(long)]
    model_endpoint: Option<String>,
    /// Model name requested from the endpoint
    #[arg(long)]
    model_name: Option<String>,
    /// API key for the endpoint
    #[arg(long)]
    api_key: Option<String>,
    /// Use the offline dummy model regardless of endpoint settings
    #[arg(long)]
    dummy_model: bool,
}

impl ModelArgs {
    fn config(&self) -> Config {
        Config {
            endpoint: self.model_endpoint.clone(),
            model_name: self.model_name.clone(),
            api_key: self.api_key.clone(),
            use_dummy: self.dummy_model,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { addr, model } => {
            let pipeline = Pipeline::new(global_model(&model.config()));
            let app = create_app(AppState { pipeline });
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            info!("listening on {}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Summarize { url, text, model } => {
            let pipeline = Pipeline::new(global_model(&model.config()));
            let request = SummarizeRequest { url, text };
            match pipeline.run(request).await {
                Ok(response) => println!("{}", serde_json::to_string_pretty(&response)?),
                Err(err) => {
                    let envelope = ErrorResponse::from(&err);
                    eprintln!("{}", serde_json::to_string_pretty(&envelope)?);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
