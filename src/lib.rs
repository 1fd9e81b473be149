pub mod actor;
pub mod space;
pub mod sys;
