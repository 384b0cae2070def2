use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bookclub")]
#[command(about = "Command line interface for the book club catalog API")]
#[command(version)]
#[command(after_help = "Examples:
  bookclub books list                               # First page of books
  bookclub books list --sort title --all            # Every book, by title
  bookclub books list --filter genres=fiction,drama # Books in either genre
  bookclub books delete 42                          # Delete book 42
  bookclub genres create --data '{\"name\":\"poetry\",\"description\":\"verse\"}'
  bookclub nav /app/books/42/edit                   # Breadcrumbs for a route
  bookclub config set --url http://localhost:8080

Environment Variables:
  BOOKCLUB_API_TOKEN   Bearer token sent with every request
  BOOKCLUB_API_URL     Catalog API base URL")]
pub struct Cli {
    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Custom configuration directory path
    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    /// Catalog API base URL (overrides BOOKCLUB_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token for the catalog API
    #[arg(long, global = true, env = "BOOKCLUB_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage books
    Books {
        #[command(subcommand)]
        command: BookCommands,
    },
    /// Manage authors
    Authors {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Manage genres
    Genres {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Configuration management (show, set)
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Print the breadcrumb trail for an application route
    Nav {
        /// Route such as /app/books/42/edit
        path: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum BookCommands {
    /// List books page by page
    List(ListArgs),
    /// Create a book from a JSON document
    Create(CreateArgs),
    /// Delete a book by id
    Delete {
        /// Book id
        id: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List records page by page
    List(ListArgs),
    /// Create a record from a JSON document
    Create(CreateArgs),
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set configuration values
    #[command(after_help = "Examples:
  bookclub config set --url http://localhost:8080
  bookclub config set --page-size 25 --debounce-ms 300")]
    Set {
        /// Catalog API base URL
        #[arg(long)]
        url: Option<String>,
        /// Rows requested per page
        #[arg(long)]
        page_size: Option<u32>,
        /// Quiet period before search input is applied (TUI)
        #[arg(long)]
        debounce_ms: Option<u64>,
    },
}

/// Paging, sorting and filtering for list commands
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Rows per page (defaults to the configured page size)
    #[arg(long, help_heading = "Paging Options")]
    pub size: Option<u32>,

    /// Number of pages to load
    #[arg(long, default_value = "1", conflicts_with = "all", help_heading = "Paging Options")]
    pub pages: u32,

    /// Keep loading until the server has nothing more
    #[arg(long, help_heading = "Paging Options")]
    pub all: bool,

    /// Column to sort by
    #[arg(long, help_heading = "Query Options")]
    pub sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort", help_heading = "Query Options")]
    pub desc: bool,

    /// Free-text search
    #[arg(long, help_heading = "Query Options")]
    pub search: Option<String>,

    /// Column filter as id=value[,value...] (can be repeated)
    #[arg(long, action = clap::ArgAction::Append, help_heading = "Query Options")]
    pub filter: Vec<String>,

    /// Follow the server's opaque `next` cursor instead of counting pages
    #[arg(long, help_heading = "Paging Options")]
    pub cursor: bool,

    /// Print rows as JSON instead of a table
    #[arg(long, help_heading = "Output Options")]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Record as a JSON object
    #[arg(long)]
    pub data: String,
}
