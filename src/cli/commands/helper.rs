use std::{future::Future, path::PathBuf};

use anyhow::{Context, Result};

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::Resolver,
};

/// Project root, effective configuration and resolver for one CLI invocation.
pub struct LookupContext {
    pub root: PathBuf,
    pub config: Config,
    pub resolver: Resolver,
}

impl LookupContext {
    pub fn from_args(common: &CommonArgs) -> Result<Self> {
        let root = common
            .root
            .canonicalize()
            .with_context(|| format!("Project root not found: {}", common.root.display()))?;

        let mut config = load_config(&root)?.config;
        if let Some(backend) = common.discovery {
            config.discovery = backend;
        }
        tracing::debug!(root = %root.display(), discovery = ?config.discovery, "lookup context ready");

        let resolver = Resolver::from_config(&root, &config);
        Ok(Self {
            root,
            config,
            resolver,
        })
    }

    /// True when discovery finds at least one dictionary under the root.
    pub async fn has_dictionaries(&self) -> bool {
        !self
            .resolver
            .discoverer()
            .list_candidate_files(&self.root)
            .await
            .is_empty()
    }
}

/// Run a future to completion on a single-threaded runtime.
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    Ok(runtime.block_on(future))
}
