//! Configuration module

pub mod strategy;

pub use strategy::*;
