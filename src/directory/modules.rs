use crate::core::{BoardError, Result};
use crate::model::{ExternalExaminer, Module, validate_module_code};
use crate::storage::{PartitionName, PartitionStore};
use tracing::info;

/// Owns the `modules` partition and resolves module codes for the other
/// components. Uniqueness is checked against a fresh load, never a cache.
#[derive(Clone)]
pub struct ModuleDirectory {
    store: PartitionStore,
}

impl ModuleDirectory {
    pub fn new(store: PartitionStore) -> Self {
        Self { store }
    }

    pub fn register(&self, module: Module) -> Result<Module> {
        validate_module_code(&module.code)?;

        let mut modules = self.list()?;
        if let Some(existing) = find_code_clash(&modules, &module.code) {
            return Err(BoardError::AlreadyExists(format!("Module '{}'", existing.code)));
        }
        modules.push(module.clone());
        self.store.save(&PartitionName::Modules, &modules)?;

        info!(code = %module.code, external_examiner = %module.external_examiner.id, "module registered");
        Ok(module)
    }

    /// Whether `code` is already registered, ignoring ASCII case. Codes become
    /// file names, so `CS101` and `cs101` would share a partition on
    /// case-insensitive filesystems.
    pub fn is_code_taken(&self, code: &str) -> Result<bool> {
        Ok(find_code_clash(&self.list()?, code).is_some())
    }

    pub fn list(&self) -> Result<Vec<Module>> {
        self.store.load(&PartitionName::Modules)
    }

    pub fn resolve_module(&self, code: &str) -> Result<Option<Module>> {
        Ok(self.list()?.into_iter().find(|module| module.code == code))
    }

    pub fn require(&self, code: &str) -> Result<Module> {
        self.resolve_module(code)?
            .ok_or_else(|| BoardError::not_found(format!("Module '{}'", code)))
    }

    /// Codes of every module whose stored external examiner equals `examiner`
    /// field for field, in directory order.
    pub fn find_modules_for_examiner(&self, examiner: &ExternalExaminer) -> Result<Vec<String>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|module| &module.external_examiner == examiner)
            .map(|module| module.code)
            .collect())
    }
}

fn find_code_clash<'a>(modules: &'a [Module], code: &str) -> Option<&'a Module> {
    modules
        .iter()
        .find(|existing| existing.code.eq_ignore_ascii_case(code))
}
