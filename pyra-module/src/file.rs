use std::path::{Path, PathBuf};

use pyra_registry::Registry;

use crate::{Diagnostic, ModuleDecl, Result, build_registry, lint};

/// Represents a functions.toml file with both raw content and parsed declaration.
#[derive(Debug)]
pub struct FunctionsToml {
    path: PathBuf,
    content: String,
    decl: ModuleDecl,
}

impl FunctionsToml {
    /// Open and parse a functions.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let decl = ModuleDecl::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            decl,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed declaration.
    pub fn decl(&self) -> &ModuleDecl {
        &self.decl
    }

    /// Run the load phase, producing the registry for this declaration.
    pub fn registry(&self) -> Result<Registry> {
        build_registry(
            &self.decl,
            &self.content,
            &self.path.display().to_string(),
        )
    }

    /// Run all lints over the declaration.
    pub fn lint(&self) -> Vec<Diagnostic> {
        lint(&self.decl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_and_build() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [module]
            name = "greeter"
            region = "us-central1"

            [functions.greet]
            trigger = "https"
            "#
        )
        .unwrap();

        let functions_toml = FunctionsToml::open(file.path()).unwrap();
        assert_eq!(functions_toml.decl().module.name, "greeter");

        let registry = functions_toml.registry().unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_open_missing_file() {
        let err = FunctionsToml::open("does/not/exist/functions.toml").unwrap_err();
        assert!(matches!(*err, crate::Error::Io { .. }));
    }
}
