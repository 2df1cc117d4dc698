//! CLI entry point for blogkit

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blogkit::content::CollectionKind;

#[derive(Parser)]
#[command(name = "blogkit")]
#[command(version)]
#[command(about = "Validate, list and build the content of a markdown blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new draft entry
    New {
        /// Title of the new entry
        title: String,

        /// Collection to add it to (blog, til, recipe)
        #[arg(short = 'C', long, default_value = "blog")]
        collection: String,
    },

    /// Validate content and write the feed, redirect table and preview cards
    #[command(alias = "b")]
    Build,

    /// Validate content without writing anything
    Check,

    /// List site content
    List {
        /// Type of content to list (post, draft, til, recipe, tag)
        #[arg(default_value = "post")]
        r#type: String,

        /// Only show entries with this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Print the redirect table as JSON
    Redirects,

    /// Clean the public folder
    Clean,

    /// Build, then serve the public folder locally
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4321")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Display version information
    Version,
}

fn parse_collection(name: &str) -> Result<CollectionKind> {
    CollectionKind::ALL
        .into_iter()
        .find(|kind| kind.dir_name() == name)
        .ok_or_else(|| anyhow::anyhow!("Unknown collection: {}. Available: blog, til, recipe", name))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blogkit=debug,info"
    } else {
        "blogkit=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            blogkit::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New { title, collection } => {
            let site = blogkit::Site::new(&base_dir)?;
            let kind = parse_collection(&collection)?;
            let path = site.new_entry(&title, kind)?;
            println!("Created {}", path.display());
        }

        Commands::Build => {
            let site = blogkit::Site::new(&base_dir)?;
            tracing::info!("Building...");
            site.build()?;
            println!("Built successfully!");
        }

        Commands::Check => {
            let site = blogkit::Site::new(&base_dir)?;
            site.check()?;
        }

        Commands::List { r#type, tag } => {
            let site = blogkit::Site::new(&base_dir)?;
            blogkit::commands::list::run(&site, &r#type, tag.as_deref())?;
        }

        Commands::Redirects => {
            let site = blogkit::Site::new(&base_dir)?;
            blogkit::commands::redirects::run(&site)?;
        }

        Commands::Clean => {
            let site = blogkit::Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Server { port, ip } => {
            let site = blogkit::Site::new(&base_dir)?;

            // Build first
            tracing::info!("Building...");
            site.build()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            blogkit::server::start(&site, &ip, port).await?;
        }

        Commands::Version => {
            println!("blogkit version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
