//! `razel parse` command

use anyhow::Result;

use crate::cli::ParseArgs;
use razel::core::parse_dcf_file;

pub fn execute(args: ParseArgs) -> Result<()> {
    let fields = parse_dcf_file(&args.file)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&fields)?);
    } else {
        print!("{}", fields.to_dcf());
    }

    Ok(())
}
