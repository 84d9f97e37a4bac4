use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use log::info;
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::handlers;
use crate::services::{DiagramSummarizer, OllamaChatProvider, TesseractOcrProvider};

pub async fn run(config: Config) -> anyhow::Result<()> {
    let host = config.host.clone();
    let port = config.port;

    let summarizer = build_summarizer(&config)?;

    print_banner(&host, port);
    info!("Server running at http://{}:{}/", host, port);
    info!(
        "OCR: {} | LLM: {} at {}",
        config.tesseract_cmd.display(),
        config.ollama_model,
        config.ollama_host
    );

    let startup_time = Instant::now();

    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&config.cors_origins))
            .wrap(Logger::default())
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(summarizer.clone()))
            .configure(configure_routes)
    })
    .bind((host, port))?
    .run()
    .await?;

    info!("Server stopped. Uptime: {:?}", startup_time.elapsed());
    Ok(())
}

pub fn build_summarizer(config: &Config) -> anyhow::Result<DiagramSummarizer> {
    let ocr = TesseractOcrProvider::from_config(config);
    let chat = OllamaChatProvider::from_config(config)?;
    Ok(DiagramSummarizer::new(Arc::new(ocr), Arc::new(chat)))
}

/// Allow-listed origins get every method and header, with credentials.
pub fn build_cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/summarize-ocr/", web::post().to(handlers::summarize_ocr))
        .route("/healthz", web::get().to(|| async { "OK" }));
}

fn print_banner(host: &str, port: u16) {
    let banner = r#"
 ___  _                                 ___
|   \(_)__ _ __ _ _ _ __ _ _ __    ___ / __|_  _ _ __  _ __  __ _ _ _ _  _
| |) | / _` / _` | '_/ _` | '  \  |___|\__ \ || | '  \| '  \/ _` | '_| || |
|___/|_\__,_\__, |_| \__,_|_|_|_|      |___/\_,_|_|_|_|_|_|_\__,_|_|  \_, |
            |___/                                                    |__/
"#;
    println!("{}", banner);
    println!("         Diagram summary server started at: http://{}:{}\n", host, port);
}
