use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "notedesk")]
#[command(version, about = "Notes for the marketplace admin dashboard")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Default, Clone)]
pub struct GlobalArgs {
    /// User id whose notes to act on (overrides NOTEDESK_USER_ID)
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Role of the acting user: admin, business or freelancer
    #[arg(long, global = true)]
    pub role: Option<String>,

    /// Base URL of the notes API
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Local storage file used by the `local` commands
    #[arg(long, global = true, value_name = "PATH")]
    pub storage: Option<PathBuf>,

    /// YAML config file (defaults to .notedesk/config.yaml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the user's notes from the backend
    List {
        /// Bucket to show (note, archive, trash)
        #[arg(long, short = 'b', default_value = "note", conflicts_with = "all")]
        bucket: String,

        /// Show every bucket
        #[arg(long)]
        all: bool,

        /// Only notes whose title or text contains this
        #[arg(long, short = 'q')]
        query: Option<String>,

        /// Only notes of this type (personal, work, reminder, task)
        #[arg(long = "type")]
        category: Option<String>,

        /// Only notes linked to this entity type (BUSINESS, FREELANCER, ...)
        #[arg(long)]
        entity_type: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note
    Get {
        /// Note id or unique id prefix
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a note on the backend
    Add(AddArgs),

    /// Move a note to the archive
    Archive {
        /// Note id or unique id prefix
        id: String,
    },

    /// Move a note to the trash
    Trash {
        /// Note id or unique id prefix
        id: String,
    },

    /// Move a note back to the active notes
    Restore {
        /// Note id or unique id prefix
        id: String,
    },

    /// Delete a note permanently
    Delete {
        /// Note id or unique id prefix
        id: String,
    },

    /// Notes kept only in local storage
    Local(LocalCommand),
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Note title
    pub title: String,

    /// Note body
    #[arg(long, short = 'c', conflicts_with = "stdin")]
    pub content: Option<String>,

    /// Read the body from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Note type (personal, work, reminder, task)
    #[arg(long = "type")]
    pub category: Option<String>,

    /// Background color, e.g. "#FFF4C2"
    #[arg(long)]
    pub color: Option<String>,

    /// Banner image
    #[arg(long)]
    pub banner: Option<String>,

    /// The body is HTML
    #[arg(long)]
    pub html: bool,

    /// Id of the business/freelancer/project the note is about
    #[arg(long)]
    pub entity_id: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct LocalCommand {
    #[command(subcommand)]
    pub action: LocalAction,
}

#[derive(Subcommand, Debug)]
pub enum LocalAction {
    /// List locally stored notes
    List {
        /// Only notes whose title or text contains this
        #[arg(long, short = 'q')]
        query: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a note to local storage
    Add(AddArgs),

    /// Remove a note from local storage
    Delete {
        /// Note id or unique id prefix
        id: String,
    },

    /// Remove every locally stored note
    Clear,
}
