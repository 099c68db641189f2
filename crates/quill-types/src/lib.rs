pub mod forms;
pub mod validate;
