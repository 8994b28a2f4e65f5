pub mod config;
pub mod logging;

pub mod api;
pub mod checksum;
pub mod date;
pub mod fetch;
pub mod filename;
pub mod index;
pub mod pipeline;
pub mod wallpaper;
