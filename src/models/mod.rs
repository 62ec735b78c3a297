pub mod assessments;
pub mod courses;
pub mod disk;
pub mod sync;
