//! Domain Layer

pub mod entity;
pub mod rating;
pub mod repository;
pub mod value_object;
