pub mod disk;
pub mod sync;

pub use sync::AssessmentReconciler;
