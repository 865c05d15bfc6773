use boq_matcher::{cli, config, error, matcher, pipeline};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use std::io::IsTerminal;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    config::load_dotenv();
    let config = Config::load()?;

    match cli.command.unwrap_or_default() {
        Commands::Match(args) => {
            println!("🏗  boq-matcher - construction activity matching\n");

            // APIキーがなければファイルに触れる前に終了
            let api_key = config.get_api_key()?;
            let job = args.resolve(&config);

            let backend =
                matcher::OpenAiCompatibleBackend::new(&config.base_url, &api_key, config.timeout_seconds)?;
            println!("✓ Client initialized ({})", config.base_url);

            let report = pipeline::run(&job, &backend).await?;
            tracing::debug!(
                "run finished: {}/{} matched (model: {:?})",
                report.matched,
                report.considered,
                report.model
            );
        }

        Commands::Config { set_api_key, set_models, set_base_url, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ API key saved");
            }

            if let Some(models) = set_models {
                config.set_models(models)?;
                println!("✔ Candidate models saved");
            }

            if let Some(url) = set_base_url {
                config.set_base_url(url)?;
                println!("✔ Base URL saved");
            }

            if show {
                println!("Config: {}", Config::config_path()?.display());
                println!("  Base URL: {}", config.base_url);
                println!("  Models: {}", config.models.join(", "));
                println!("  Max tokens: {}", config.max_tokens);
                println!("  Temperature: {}", config.temperature);
                println!("  Timeout: {}s", config.timeout_seconds);
                println!("  Input: {} (column: {})", config.input_path.display(), config.input_column);
                println!("  Reference: {} (column: {})", config.reference_path.display(), config.reference_column);
                println!("  Output: {}", config.output_path.display());
                println!("  API key: {}", if config.get_api_key().is_ok() { "set" } else { "not set" });
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_max_level(level)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}
