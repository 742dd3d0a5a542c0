pub mod files;
pub mod init;
pub mod menu;
pub mod mirror;
pub mod simulate;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Interactive harvest registration and reporting session")]
    Menu(menu::MenuArgs),
    #[command(about = "Calculate losses and savings for hypothetical harvest figures")]
    Simulate(simulate::SimulateArgs),
    #[command(about = "Manage harvests stored in the SQLite database", arg_required_else_help = true)]
    Mirror(mirror::MirrorArgs),
    #[command(about = "List exported files")]
    Files(files::FilesArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Menu(args) => menu::cmd(args),
            Commands::Simulate(args) => simulate::cmd(args),
            Commands::Mirror(args) => mirror::cmd(args),
            Commands::Files(args) => files::cmd(args),
        }
    }
}
