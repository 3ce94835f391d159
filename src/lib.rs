//! redpersona: infer user personas from public Reddit activity.
//!
//! Data flows through four stages, each in its own module:
//! acquisition ([`reddit`]), signal extraction ([`signals`]), persona
//! assembly ([`persona`]) and rendering ([`render`]). [`pipeline`] runs the
//! stages per handle and writes the results.

pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod logging;
pub mod nlp;
pub mod persona;
pub mod pipeline;
pub mod reddit;
pub mod render;
pub mod signals;
pub mod util;

pub use config::Config;
pub use error::{Error, Result};
