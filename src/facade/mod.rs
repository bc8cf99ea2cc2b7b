pub mod board;

pub use board::{ActionRequest, ExamBoard, PaperFilter, ReconcileReport};
