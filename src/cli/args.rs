//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// In-memory XML element tree: inspect, query and export the course-plan sample
#[derive(Parser, Debug)]
#[command(name = "xmlmodel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (repeat for more: -d -d -d)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the sample document
    Show,

    /// Print every element name in pre-order
    Names,

    /// Print every element's attributes in pre-order
    Attributes,

    /// Print every element matching a path (`//` or a tag name)
    Find {
        /// Path expression
        expr: String,
    },

    /// Apply the sample edits and write the document to a file
    Export {
        /// Output file (default: from config)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,

        /// Write the document without applying the edits
        #[arg(long)]
        raw: bool,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
