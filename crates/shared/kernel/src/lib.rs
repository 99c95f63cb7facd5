//! Kernel utilities shared across crates.
//! Keep this crate lightweight; today it owns layered configuration loading.
//!
//! ## Config loading
//! ```rust,no_run
//! use fontloom_kernel::config::load_config;
//! use fontloom_kernel::domain::config::AppConfig;
//!
//! let cfg: AppConfig = load_config(Some("fontloom")).unwrap_or_default();
//! ```
pub mod config;

pub use fontloom_domain as domain;
