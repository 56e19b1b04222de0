pub mod annotation;
pub mod task;
