// Command-line interface

pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "newsfeed")]
#[command(about = "Fetch a news feed through a CORS proxy and render it as HTML", long_about = None)]
pub struct Cli {
    /// Feed to fetch
    #[arg(long, global = true, env = "FEED_URL")]
    pub feed_url: Option<String>,

    /// Proxy prefix the encoded feed URL is appended to
    #[arg(long, global = true, env = "PROXY_URL")]
    pub proxy_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the feed through the proxy and print the rendered items
    Fetch {
        /// Print normalized items as JSON instead of HTML
        #[arg(long)]
        json: bool,

        /// Escape and clean feed content before rendering
        #[arg(long, conflicts_with = "json")]
        sanitize: bool,
    },

    /// Render a local feed document
    Render {
        /// Path to an RSS document, or `-` for stdin
        #[arg(default_value = "-")]
        path: String,

        /// Print normalized items as JSON instead of HTML
        #[arg(long)]
        json: bool,

        /// Escape and clean feed content before rendering
        #[arg(long, conflicts_with = "json")]
        sanitize: bool,
    },

    /// Print the expected feed styles
    Styles {
        /// Print CSS rules instead of JSON
        #[arg(long)]
        css: bool,
    },

    /// Run the built-in feed checks against test doubles
    SelfTest,
}
