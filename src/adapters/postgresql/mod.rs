//! edoo.sys PostgreSQL database integration
//!
//! This module reads teachers, subjects, classes, students and their
//! relations for one school and school year.

pub mod adapter;
pub mod client;
pub mod models;
pub mod queries;

pub use adapter::EdoosysDbReader;
pub use client::PostgreSQLClient;
