mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use postblocks_config::Config;
use postblocks_engine::io::resolve_document_path;
use postblocks_publish::{HttpPublisher, ServerState};
use std::path::{Path, PathBuf};

use commands::PublishOptions;

#[derive(Parser, Debug)]
#[command(name = "postblocks")]
#[command(author, version, about = "Compose block-based multilingual blog posts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new document with a single English version
    New {
        file: PathBuf,

        /// Overwrite an existing document
        #[arg(long)]
        force: bool,
    },

    /// Show section, word and block counts per language
    Stats { file: PathBuf },

    /// Render a language version as HTML
    Preview {
        file: PathBuf,

        /// Language code (defaults to the preview language)
        #[arg(short, long)]
        language: Option<String>,

        /// Title shown in the preview header
        #[arg(short, long)]
        title: Option<String>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Apply one editing command given as JSON, e.g. '{"action":"addSection"}'
    Apply { file: PathBuf, command: String },

    /// Add a language from the built-in catalog
    AddLanguage { file: PathBuf, code: String },

    /// List present and available languages
    Languages { file: PathBuf },

    /// Send the document to the publish endpoint
    Publish {
        file: PathBuf,

        #[arg(long)]
        title: String,

        #[arg(long)]
        slug: Option<String>,

        #[arg(long)]
        excerpt: Option<String>,

        /// May be repeated
        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        featured_image: Option<String>,

        /// Publish as draft instead of published
        #[arg(long)]
        draft: bool,

        /// Override the configured endpoint URL
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Run the stub publish endpoint
    Serve {
        /// Address to bind, overriding the config file
        #[arg(long)]
        bind: Option<String>,

        /// Simulated processing delay in milliseconds
        #[arg(long)]
        latency_ms: Option<u64>,
    },
}

fn document(config: &Config, file: &Path) -> PathBuf {
    resolve_document_path(file, config.documents_path.as_deref())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let config = Config::load_or_default().with_context(|| {
        format!(
            "Failed to load config file {}",
            Config::config_path().display()
        )
    })?;

    match cli.command {
        Command::New { file, force } => {
            println!("{}", commands::new_document(&document(&config, &file), force)?);
        }
        Command::Stats { file } => {
            let output = commands::stats(&document(&config, &file), config.words_per_minute)?;
            println!("{output}");
        }
        Command::Preview {
            file,
            language,
            title,
            output,
        } => {
            let html = commands::preview(
                &document(&config, &file),
                language.as_deref(),
                title,
                config.words_per_minute,
            )?;
            match output {
                Some(path) => {
                    std::fs::write(&path, html)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    log::info!("Preview written to {}", path.display());
                }
                None => print!("{html}"),
            }
        }
        Command::Apply { file, command } => {
            println!("{}", commands::apply(&document(&config, &file), &command)?);
        }
        Command::AddLanguage { file, code } => {
            println!("{}", commands::add_language(&document(&config, &file), &code)?);
        }
        Command::Languages { file } => {
            println!("{}", commands::list_languages(&document(&config, &file))?);
        }
        Command::Publish {
            file,
            title,
            slug,
            excerpt,
            tags,
            category,
            featured_image,
            draft,
            endpoint,
        } => {
            let publisher =
                HttpPublisher::new(endpoint.unwrap_or_else(|| config.publish_endpoint.clone()));
            let options = PublishOptions {
                title,
                slug,
                excerpt,
                tags,
                category,
                featured_image,
                draft,
            };
            let receipt =
                commands::publish(&document(&config, &file), options, &publisher).await?;
            println!("Blog published successfully! ID: {}", receipt.id);
            println!("URL: {}", receipt.url);
        }
        Command::Serve { bind, latency_ms } => {
            let bind = bind.unwrap_or(config.server.bind);
            let state = ServerState::with_latency_ms(
                latency_ms.unwrap_or(config.server.simulated_latency_ms),
            );
            let listener = tokio::net::TcpListener::bind(&bind)
                .await
                .with_context(|| format!("Failed to bind {bind}"))?;
            postblocks_publish::serve(listener, state).await?;
        }
    }

    Ok(())
}
