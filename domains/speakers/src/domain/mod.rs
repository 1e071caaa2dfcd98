//! Domain layer for the Speakers domain

pub mod entities;
pub mod error;
pub mod state;
