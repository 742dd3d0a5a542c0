use crate::{
    libs::{config::Config, export, messages::Message, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct FilesArgs {
    /// Directory to scan [default: configured export directory]
    #[arg(short, long)]
    dir: Option<PathBuf>,
}

pub fn cmd(args: FilesArgs) -> Result<()> {
    let directory = match args.dir {
        Some(dir) => dir,
        None => Config::read()?.export_or_default().directory,
    };
    show(&directory)
}

/// Prints the exported files found in `directory`, newest first.
pub fn show(directory: &Path) -> Result<()> {
    let files = export::list_exported_files(directory)?;
    if files.is_empty() {
        msg_info!(Message::NoExportedFiles(directory.display().to_string()));
        return Ok(());
    }

    msg_print!(Message::ExportedFilesHeader(files.len()));
    View::files(&files)
}
