use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server (contact API, health check, static site).
    Serve(ServeArgs),
    /// Inspect the submission inbox.
    Inbox {
        #[command(subcommand)]
        action: InboxCommands,
    },
    /// Print the JSON Schema of one inbox line.
    Schema,
    /// Print the effective configuration with secrets redacted.
    Config,
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Interface to bind (overrides `server.bind`).
    #[arg(long)]
    pub bind: Option<String>,

    /// Port to listen on (overrides `server.port`).
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum InboxCommands {
    /// Print stored submissions, oldest first.
    List {
        /// Keep only the most recent N submissions.
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Check every line of the inbox and report malformed ones.
    Verify,
}
