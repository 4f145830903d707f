use std::fs;

use anyhow::{Context, Result};
use colored::Colorize;

use super::helper::{LookupContext, block_on};
use crate::cli::{
    args::{HoverCommand, OutputFormat},
    exit_status::ExitStatus,
};

pub fn hover(cmd: HoverCommand) -> Result<ExitStatus> {
    let ctx = LookupContext::from_args(&cmd.common)?;
    let source = fs::read_to_string(&cmd.file)
        .with_context(|| format!("Failed to read source file: {}", cmd.file.display()))?;

    let found = block_on(ctx.resolver.resolve_at(&source, cmd.line, cmd.character))?;

    match (&found, cmd.format) {
        (None, _) => eprintln!(
            "{} no translation at {}:{}:{}",
            "warning:".bold().yellow(),
            cmd.file.display(),
            cmd.line,
            cmd.character
        ),
        (Some(m), OutputFormat::Text) => println!("{}", m.translation),
        (Some(m), OutputFormat::Json) => println!("{}", serde_json::to_string_pretty(m)?),
    }
    Ok(ExitStatus::from_found(found.is_some()))
}
