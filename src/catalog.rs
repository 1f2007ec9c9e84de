use std::path::{Path, PathBuf};

use crate::models::Module;
use crate::store;

/// Owns the module collection loaded for this run.
#[derive(Debug, Clone)]
pub struct Catalog {
    source: PathBuf,
    modules: Vec<Module>,
}

impl Catalog {
    pub fn load(source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        let modules = store::load_or_empty(&source);
        Self { source, modules }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn find_by_code(&self, code: &str) -> Option<&Module> {
        self.modules
            .iter()
            .find(|module| module.code.eq_ignore_ascii_case(code))
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&self.source)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        store::save_modules(path, &self.modules)
    }
}
