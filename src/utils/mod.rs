pub mod filename;
pub mod photo;
pub mod validation;
