pub mod access;
pub mod entities;
