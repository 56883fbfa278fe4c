//! CLI entry point for postpress

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postpress::og::OgQuery;
use postpress::Blog;

#[derive(Parser)]
#[command(name = "postpress")]
#[command(version)]
#[command(about = "A markdown blog with server-rendered pages and Open Graph previews", long_about = None)]
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
    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Slug for the new post (defaults to the slugified title)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Pre-render the home page and every post into the public folder
    #[command(alias = "g")]
    Generate,

    /// Start the server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// Render a preview image to a file
    Og {
        /// Title drawn on the image
        #[arg(short, long)]
        title: Option<String>,

        /// Background image URL or site path
        #[arg(short, long)]
        bg_image: Option<String>,

        /// Username credited by the branded template
        #[arg(short, long)]
        username: Option<String>,

        /// Template: branded or generic
        #[arg(long)]
        template: Option<String>,

        /// Output PNG file
        #[arg(short, long, default_value = "og.png")]
        output: PathBuf,
    },

    /// Remove generated pages from the public folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, route)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postpress=debug,tower_http=debug,info"
    } else {
        "postpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::New { title, slug } => {
            let blog = Blog::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            postpress::commands::new::run(&blog, &title, slug.as_deref())?;
        }

        Commands::Generate => {
            let blog = Blog::new(&base_dir)?;
            tracing::info!("Generating static files...");
            blog.generate()?;
        }

        Commands::Serve { port, ip, open } => {
            let blog = Blog::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            postpress::server::start(&blog, &ip, port, open).await?;
        }

        Commands::Og {
            title,
            bg_image,
            username,
            template,
            output,
        } => {
            let blog = Blog::new(&base_dir)?;
            let query = OgQuery {
                title,
                bg_image,
                username,
                template,
            };
            let output = if output.is_absolute() {
                output
            } else {
                base_dir.join(output)
            };
            postpress::commands::og::run(&blog, &query, &output).await?;
        }

        Commands::Clean => {
            let blog = Blog::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let blog = Blog::new(&base_dir)?;
            postpress::commands::list::run(&blog, &r#type)?;
        }

        Commands::Version => {
            println!("postpress version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
