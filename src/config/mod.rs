//! Configuration modules for the Compasso API.
//!
//! Each submodule handles one aspect of configuration, loaded from
//! environment variables:
//!
//! - [`cors`]: CORS allowed origins for the browser front end
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: JWT authentication configuration

pub mod cors;
pub mod database;
pub mod jwt;
