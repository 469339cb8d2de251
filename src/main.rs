use anyhow::Context;
use clap::{Parser, Subcommand};
use content_cluster::config::{ContentMode, StorageSettings};
use content_cluster::content::{self, ContentRouter, ContentService, LocalContentService};
use content_cluster::membership::AdminClient;
use content_cluster::storage::{self, FsBackend};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "content-cluster")]
#[command(about = "Consistent-hashing content storage for a video backend")]
struct Cli {
    /// Maximum log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a storage node serving blobs from a local directory
    Storage {
        #[arg(long, env = "CONTENT_STORAGE_HOST", default_value = "0.0.0.0")]
        host: String,

        #[arg(long, env = "CONTENT_STORAGE_PORT", default_value_t = 8090)]
        port: u16,

        /// Directory the node keeps blobs in
        root: PathBuf,
    },
    /// Run the content gateway in front of local or networked storage
    Gateway {
        #[arg(long, env = "CONTENT_GATEWAY_BIND", default_value = "0.0.0.0:8080")]
        bind: String,

        /// fs:<dir> or nw:<admin_addr>,<node>,<node>...
        #[arg(long, env = "CONTENT_MODE")]
        content: String,

        /// Per-call timeout for storage node RPCs
        #[arg(long, default_value_t = 5000)]
        rpc_timeout_ms: u64,
    },
    /// Change or inspect the membership of a running content router
    Admin {
        /// Address of the router's admin service
        #[arg(long)]
        admin: String,

        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    AddNode { address: String },
    RemoveNode { address: String },
    ListNodes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .init();

    match cli.command {
        Commands::Storage { host, port, root } => {
            run_storage(StorageSettings::new(host, port, root)?).await
        }
        Commands::Gateway {
            bind,
            content,
            rpc_timeout_ms,
        } => run_gateway(&bind, &content, Duration::from_millis(rpc_timeout_ms)).await,
        Commands::Admin { admin, command } => run_admin(&admin, command).await,
    }
}

async fn run_storage(settings: StorageSettings) -> anyhow::Result<()> {
    let backend = Arc::new(
        FsBackend::new(&settings.root)
            .with_context(|| format!("cannot open storage root {}", settings.root.display()))?,
    );
    let app = storage::router(backend);

    let listener = tokio::net::TcpListener::bind(settings.bind_addr()).await?;
    tracing::info!(
        "Storage node listening on {}, root {}",
        listener.local_addr()?,
        settings.root.display()
    );
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn run_gateway(bind: &str, content: &str, rpc_timeout: Duration) -> anyhow::Result<()> {
    let service: Arc<dyn ContentService> = match ContentMode::parse(content)? {
        ContentMode::Local { root } => {
            tracing::info!("Serving content from local directory {}", root.display());
            Arc::new(LocalContentService::new(&root)?)
        }
        ContentMode::Network(settings) => {
            tracing::info!(
                "Routing content across {} storage node(s): {:?}",
                settings.storage_nodes.len(),
                settings.storage_nodes
            );
            let router = ContentRouter::new(settings.with_rpc_timeout(rpc_timeout));
            let admin_addr = router.start().await?;
            tracing::info!("Admin service listening on {}", admin_addr);
            Arc::new(router)
        }
    };

    let app = content::handlers::router(service);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("Content gateway listening on {}", listener.local_addr()?);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn run_admin(admin_addr: &str, command: AdminCommands) -> anyhow::Result<()> {
    let client = AdminClient::new(admin_addr);

    match command {
        AdminCommands::AddNode { address } => {
            let migrated = client.add_node(&address).await?;
            println!("added {}, migrated {} key(s)", address, migrated);
        }
        AdminCommands::RemoveNode { address } => {
            let migrated = client.remove_node(&address).await?;
            println!("removed {}, migrated {} key(s)", address, migrated);
        }
        AdminCommands::ListNodes => {
            for address in client.list_nodes().await? {
                println!("{}", address);
            }
        }
    }

    Ok(())
}
