pub mod checker;
pub mod entity;
pub mod scope;
