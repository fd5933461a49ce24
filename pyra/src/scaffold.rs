//! Starter declaration written by `pyra init`.

use std::path::{Path, PathBuf};

use eyre::Result;

/// Result of a scaffold write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File was skipped (already exists)
    Skipped,
}

/// The starter functions.toml for a new module.
pub struct StarterToml<'a> {
    name: &'a str,
}

impl<'a> StarterToml<'a> {
    pub fn new(name: &'a str) -> Self {
        Self { name }
    }

    pub fn path(&self, base: &Path) -> PathBuf {
        base.join("functions.toml")
    }

    pub fn render(&self) -> String {
        format!(
            r#"[module]
name = "{name}"
region = "us-central1"

# A raw HTTPS function. The handler defaults to the declared name.
[functions.hello]
trigger = "https"

# An event function fired for every message on the "events" topic.
# [functions.on_event]
# trigger = "pubsub"
# topic = "events"
# retry = true
"#,
            name = self.name
        )
    }

    /// Write the starter file, skipping when one already exists.
    pub fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = self.path(base);
        if path.exists() {
            return Ok(WriteResult::Skipped);
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.render())?;
        Ok(WriteResult::Written)
    }
}
