// ABOUTME: Root module for symposium - deadlock-free dining philosophers.
// ABOUTME: Re-exports all public types from submodules.

pub mod config;
pub mod error;
pub mod fork;
pub mod philosopher;
pub mod prelude;
pub mod table;

pub use error::SymposiumError;
