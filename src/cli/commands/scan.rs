use std::fs;

use anyhow::{Context, Result};

use super::helper::{LookupContext, block_on};
use crate::cli::{
    args::{OutputFormat, ScanCommand},
    exit_status::ExitStatus,
    report::{FileReport, print_no_dictionaries_warning, report, report_json},
};

pub fn scan(cmd: ScanCommand) -> Result<ExitStatus> {
    let ctx = LookupContext::from_args(&cmd.common)?;

    let mut sources = Vec::with_capacity(cmd.files.len());
    for path in &cmd.files {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read source file: {}", path.display()))?;
        sources.push((path.display().to_string(), source));
    }

    let files = block_on(async {
        if !ctx.has_dictionaries().await {
            print_no_dictionaries_warning(&ctx.root, &ctx.config.dictionary_suffix);
        }

        let mut files = Vec::with_capacity(sources.len());
        for (file_path, source) in sources {
            let matches = ctx.resolver.scan_document(&source).await;
            files.push(FileReport {
                file_path,
                source,
                matches,
            });
        }
        files
    })?;

    match cmd.format {
        OutputFormat::Text => report(&files, &ctx.config.locale_label),
        OutputFormat::Json => report_json(&files)?,
    }

    Ok(ExitStatus::Success)
}
