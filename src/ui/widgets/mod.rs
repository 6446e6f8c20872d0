pub mod r#box;
pub mod spinner;
