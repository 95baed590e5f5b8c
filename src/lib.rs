// Library exports for the Telar lesson assembly engine
pub mod config;
pub mod lesson;

// Re-export key types for convenience
pub use config::TelarConfig;
pub use lesson::{
    compose_lesson, AssemblyReport, AuthorPolicy, ComposeConfig, ComposedLesson, Item, ItemKind,
    Lesson, LessonError, LessonValidator, RawItem, SequenceError, SequenceSpec, ValidationResult,
    ValidationSeverity,
};
