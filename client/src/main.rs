use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use filemgr_client::FileManagerClient;
use std::io::Read;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "filemgr", about = "Command-line agent for the file manager server")]
struct Opts {
    /// Server URL (e.g., http://localhost:10000)
    #[clap(short, long, default_value = "http://127.0.0.1:10000")]
    server: String,

    /// Client name to act as; defaults to this machine's host name
    #[clap(short, long)]
    name: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the server is up
    Ping,
    /// Register this client with the server
    Register,
    /// Show all registered clients
    Clients,
    /// List a directory on the server (working directory when omitted)
    Ls { path: Option<String> },
    /// Print a text file
    Cat { path: String },
    /// Delete a file or an empty directory
    Rm { path: String },
    /// Write a file, reading content from stdin when not given
    Write { path: String, content: Option<String> },
    /// Create a directory and any missing parents
    Mkdir { path: String },
}

fn local_name() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "client".into())
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let name = opts.name.unwrap_or_else(local_name);
    let client = FileManagerClient::new(opts.server);
    info!("Using server {} as client {}", client.base_url(), name);

    match opts.command {
        Command::Ping => println!("{}", client.health().await?),
        Command::Register => {
            client.register(&name).await?;
            println!("Registered as {}", name);
        }
        Command::Clients => {
            let clients = client.clients().await?;
            println!("{}", serde_json::to_string_pretty(&clients)?);
        }
        Command::Ls { path } => {
            let listing = client.file_list(&name, path.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        Command::Cat { path } => print!("{}", client.read_file(&name, &path).await?),
        Command::Rm { path } => {
            client.delete_file(&name, &path).await?;
        }
        Command::Write { path, content } => {
            let content = match content {
                Some(content) => content,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("reading content from stdin")?;
                    buf
                }
            };
            client.create_file(&name, &path, &content).await?;
        }
        Command::Mkdir { path } => {
            client.create_directory(&name, &path).await?;
        }
    }

    Ok(())
}
