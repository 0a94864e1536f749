pub mod contracts;
pub mod decoder;
pub mod domain;
pub mod order;
