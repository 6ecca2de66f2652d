//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `picpush`.
#[derive(Debug, Parser)]
#[command(name = "picpush", version, about = "Publish images to a static site repository")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Push an image to the configured branch.
    Push {
        /// Path of the image file to upload.
        image: PathBuf,
        /// Destination path inside the repository (defaults to the
        /// configured one).
        #[arg(long)]
        path: Option<String>,
        /// Commit message (defaults to "uploaded <image> to <path>").
        #[arg(long)]
        message: Option<String>,
        /// Target branch (defaults to the configured one).
        #[arg(long)]
        branch: Option<String>,
    },
    /// Check that a passphrase opens the sealed credential.
    Unlock,
}
