pub mod convert;
pub mod dataset;
pub mod lua;
