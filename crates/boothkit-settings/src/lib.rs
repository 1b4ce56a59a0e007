//! # Boothkit Settings
//!
//! Configuration and persistence for the layout designer: the designer's
//! TOML config file and the JSON-backed saved-layout store. The designer
//! itself only sees `boothkit_core::DesignerConfig` and the
//! `boothkit_core::LayoutStore` trait; this crate decides where those live
//! on disk.

pub mod config;
pub mod error;
pub mod layout_store;

pub use config::{
    default_config_path, load_config, load_config_or_default, save_config, validate,
};
pub use error::{SettingsError, SettingsResult};
pub use layout_store::{default_layouts_path, FileLayoutStore};
