use clap::Parser;

use diagram_summary::cli::{self, Cli, Commands};
use diagram_summary::config::Config;
use diagram_summary::server;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let config = Config::new();

    match cli.command {
        Some(Commands::Serve) | None => {
            actix_web::rt::System::new().block_on(server::run(config))
        }
        Some(Commands::Summarize { image }) => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(cli::handle_summarize(&image, &config))
        }
        Some(Commands::Preprocess { input, output }) => cli::handle_preprocess(&input, &output),
    }
}
