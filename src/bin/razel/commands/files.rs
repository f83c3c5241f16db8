//! `razel files` command

use anyhow::Result;

use crate::cli::FilesArgs;
use razel::core::load_exclude_patterns;
use razel::util::fs::{filter_excluded, list_files, to_slash};

pub fn execute(args: FilesArgs) -> Result<()> {
    let patterns = load_exclude_patterns(&args.exclude_files)?;
    let files = filter_excluded(list_files(&args.dir)?, &patterns);

    for file in files {
        println!("{}", to_slash(&file));
    }

    Ok(())
}
