pub mod bootstrap;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod fuzzy;
pub mod hotkey;
pub mod hotkey_runtime;
pub mod kv_store;
pub mod logging;
pub mod model;
pub mod palette;
pub mod recent_store;
pub mod search;
pub mod settings;
pub mod surface;
