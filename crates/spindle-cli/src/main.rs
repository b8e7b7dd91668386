use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use spindle_catalog::{SearchType, DEFAULT_PAGE, DEFAULT_PER_PAGE};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "spindle", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the database (default: ~/.local/share/spindle/spindle.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Discogs personal access token for this invocation only
    #[arg(long, global = true)]
    token: Option<String>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Inspect or create the configuration file
    #[command(subcommand)]
    Config(commands::ConfigCommand),
    #[command(flatten)]
    Collection(CollectionCommand),
}

/// Commands that need the database.
#[derive(Debug, clap::Subcommand)]
enum CollectionCommand {
    /// List every record in the collection
    List,
    /// Show one record in full
    Show {
        /// Record id
        id: String,
    },
    /// Add a record by hand
    ///
    /// Fields that are not given are stored empty. `--image` takes either
    /// a URL or a local file, which is embedded in the record as a data URI.
    Add {
        #[command(flatten)]
        fields: commands::RecordFields,

        /// Cover or label image: a URL or a path to a local file
        #[arg(long)]
        image: Option<String>,
    },
    /// Change fields of an existing record
    ///
    /// Only the fields given are changed; everything else is kept.
    Edit {
        /// Record id
        id: String,

        #[command(flatten)]
        fields: commands::RecordFields,

        /// Replace the image: a URL or a path to a local file
        #[arg(long)]
        image: Option<String>,
    },
    /// Remove a record (no error if it does not exist)
    Delete {
        /// Record id
        id: String,
    },
    /// Run label extraction on a photo and save the result
    ///
    /// Text extraction is not available yet, so the record is saved with
    /// the image and whatever fields are given on the command line.
    Scan {
        /// Path to (or URL of) the label photo
        image: String,

        #[command(flatten)]
        fields: commands::RecordFields,
    },
    /// Search the Discogs database
    Search {
        /// Free-text query
        query: String,

        /// Restrict to one result type (release, master, artist, label)
        #[arg(long = "type")]
        kind: Option<SearchType>,

        #[arg(long, default_value_t = DEFAULT_PAGE)]
        page: u32,

        #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
        per_page: u32,
    },
    /// Look up releases by barcode (UPC/EAN)
    Barcode {
        barcode: String,
    },
    /// Look up releases by catalog number
    Catno {
        catno: String,

        #[arg(long, default_value_t = DEFAULT_PAGE)]
        page: u32,
    },
    /// Show full details of a Discogs release
    Release {
        /// Discogs release id
        id: u64,
    },
    /// Show a Discogs master release (raw JSON)
    Master {
        /// Discogs master id
        id: u64,
    },
    /// Fetch a Discogs release and add it to the collection
    Import {
        /// Discogs release id
        id: u64,
    },
    /// Manage saved Discogs credentials
    #[command(subcommand)]
    Credentials(commands::CredentialsCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let Cli { command, db, token } = Cli::parse();

    // Config commands must work even when the config itself is broken.
    let command = match command {
        Commands::Config(command) => return commands::run_config(command),
        Commands::Collection(command) => command,
    };

    let mut config = match db {
        Some(path) => spindle_catalog::Config::load_with_db_path(path)?,
        None => spindle_catalog::Config::load()?,
    };
    config.cli_token = token;

    // Ensure database directory exists
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let ctx = commands::Context::open(config)?;

    match command {
        CollectionCommand::List => commands::list_records(&ctx).await?,
        CollectionCommand::Show { id } => commands::show_record(&ctx, id).await?,
        CollectionCommand::Add { fields, image } => {
            commands::add_record(&ctx, fields, image).await?;
        }
        CollectionCommand::Edit { id, fields, image } => {
            commands::edit_record(&ctx, id, fields, image).await?;
        }
        CollectionCommand::Delete { id } => commands::delete_record(&ctx, id).await?,
        CollectionCommand::Scan { image, fields } => {
            commands::scan_label(&ctx, image, fields).await?;
        }
        CollectionCommand::Search {
            query,
            kind,
            page,
            per_page,
        } => commands::search(&ctx, &query, kind, page, per_page).await?,
        CollectionCommand::Barcode { barcode } => {
            commands::search_barcode(&ctx, &barcode).await?;
        }
        CollectionCommand::Catno { catno, page } => {
            commands::search_catno(&ctx, &catno, page).await?;
        }
        CollectionCommand::Release { id } => commands::show_release(&ctx, id).await?,
        CollectionCommand::Master { id } => commands::show_master(&ctx, id).await?,
        CollectionCommand::Import { id } => commands::import_release(&ctx, id).await?,
        CollectionCommand::Credentials(command) => {
            commands::run_credentials(&ctx, command)?;
        }
    }

    Ok(())
}
