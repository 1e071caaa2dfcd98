//! HTTP handlers for the Speakers domain

pub mod speakers;
