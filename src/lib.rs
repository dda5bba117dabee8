//! ShoShiy studio site.
//!
//! The host side renders the static document and its SEO companions
//! ([`site`], [`page`], [`seo`]). The wasm32 side animates that document:
//! canvas scenes, the custom cursor and the projects carousel, all mounted by
//! [`app::App`] against a [`host::Host`].

pub mod app;
pub mod carousel;
pub mod config;
pub mod content;
pub mod context;
pub mod cursor;
pub mod error;
pub mod host;
pub mod i18n;
pub mod logging;
pub mod page;
pub mod palette;
pub mod render;
pub mod scenes;
pub mod seo;
pub mod site;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use config::SiteConfig;
pub use error::{SiteError, SiteResult};
