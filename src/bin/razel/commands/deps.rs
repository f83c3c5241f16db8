//! `razel deps` command

use anyhow::{Context, Result};

use crate::cli::DepsArgs;
use razel::core::{parse_dcf_file, parse_deps};
use razel::ops::imports::{DEPS_FIELDS, SUGGESTS_FIELD};

pub fn execute(args: DepsArgs) -> Result<()> {
    let fields = parse_dcf_file(&args.file)?;

    let names: &[&str] = if args.suggested {
        &[SUGGESTS_FIELD]
    } else {
        DEPS_FIELDS
    };

    for field in names {
        let Some(value) = fields.get(field) else {
            tracing::debug!("{} has no `{}` field", args.file.display(), field);
            continue;
        };
        let deps = parse_deps(value)
            .with_context(|| format!("in field `{}` of {}", field, args.file.display()))?;
        for dep in deps {
            println!("{}", dep);
        }
    }

    Ok(())
}
