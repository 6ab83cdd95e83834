//! Module parameters and the descriptor generated from them

pub mod descriptor;
pub mod settings;

pub use descriptor::ModDescriptor;
pub use settings::{ModuleSettings, SettingsOverrides};
