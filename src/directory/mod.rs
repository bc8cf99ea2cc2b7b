//! The two global registries: examiners and the module directory.

pub mod examiners;
pub mod modules;

pub use examiners::ExaminerRegistry;
pub use modules::ModuleDirectory;
