//! Integrals over contracted Gaussian orbitals described in a YAML file.

pub mod app;
pub mod config;
pub mod io;
