//! Domain Layer

pub mod confirmation;
pub mod entity;
pub mod policy;
pub mod repository;
pub mod token;
pub mod value_object;
