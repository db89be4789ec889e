use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "portfolio-repos",
    version,
    about = "List a GitHub user's pinned or public repositories and the languages they use"
)]
pub struct Cli {
    /// GitHub login to query (default: GITHUB_USERNAME)
    #[arg(long, global = true)]
    pub username: Option<String>,

    /// Print the result as JSON instead of a text listing
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Pinned repositories with every language they use
    Pinned,
    /// All public repositories with their primary languages
    Public,
}
