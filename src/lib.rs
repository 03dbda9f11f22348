//! Library exports for the FoodFest backend
//!
//! This module exposes internal components for testing and potential library usage.

pub mod error;
pub mod handler;
pub mod menu;
pub mod model;
pub mod orders;
pub mod route;
pub mod store;
