// src/core/mod.rs

pub mod greek;
pub mod html;
pub mod sanitize;
