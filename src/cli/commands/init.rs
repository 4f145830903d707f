use std::{
    fs::OpenOptions,
    io::{ErrorKind, Write},
};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::cli::{exit_status::ExitStatus, report::SUCCESS_MARK};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

/// Write a default `.langlsprc.json` into the working directory.
///
/// An existing file is never touched; `create_new` makes the existence check
/// and the creation a single step.
pub fn init() -> Result<ExitStatus> {
    let contents = default_config_json()?;

    let mut file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(CONFIG_FILE_NAME)
    {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
            return Ok(ExitStatus::Failure);
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to create {}", CONFIG_FILE_NAME));
        }
    };
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    let message = format!("Created {}", CONFIG_FILE_NAME);
    println!("{} {}", SUCCESS_MARK.green(), message.green());
    Ok(ExitStatus::Success)
}
