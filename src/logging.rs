//! `tracing` subscriber setup for the CLI and for the browser console.

use tracing_subscriber::EnvFilter;

use crate::error::{SiteError, SiteResult};

pub const DEFAULT_FILTER: &str = "info";

/// Builds a filter from `directives`, falling back to `RUST_LOG` and then to
/// [`DEFAULT_FILTER`].
pub fn filter(directives: Option<&str>) -> SiteResult<EnvFilter> {
    match directives {
        Some(d) => EnvFilter::try_new(d).map_err(|e| SiteError::logging(format!("filter '{d}': {e}"))),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Installs a stderr fmt subscriber. Fails if one is already installed.
pub fn init_host(directives: Option<&str>) -> SiteResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(directives)?)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| SiteError::logging(e.to_string()))
}

#[cfg(target_arch = "wasm32")]
pub use console::init_browser;

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;

    use tracing::{Level, Metadata};
    use tracing_subscriber::fmt::MakeWriter;
    use wasm_bindgen::JsValue;

    use super::*;

    /// Buffers one formatted event and hands it to the console on drop.
    pub struct ConsoleWriter {
        buf: Vec<u8>,
        level: Level,
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let text = String::from_utf8_lossy(&self.buf);
            let line = JsValue::from_str(text.trim_end());
            match self.level {
                Level::ERROR => web_sys::console::error_1(&line),
                Level::WARN => web_sys::console::warn_1(&line),
                Level::INFO => web_sys::console::info_1(&line),
                _ => web_sys::console::log_1(&line),
            }
        }
    }

    pub struct MakeConsoleWriter;

    impl<'a> MakeWriter<'a> for MakeConsoleWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter {
                buf: Vec::new(),
                level: Level::INFO,
            }
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            ConsoleWriter {
                buf: Vec::new(),
                level: *meta.level(),
            }
        }
    }

    /// Routes `tracing` output to the browser console. The clock is left out:
    /// the console stamps entries itself.
    pub fn init_browser(directives: &str) -> SiteResult<()> {
        let filter = EnvFilter::try_new(directives)
            .map_err(|e| SiteError::logging(format!("filter '{directives}': {e}")))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .without_time()
            .with_writer(MakeConsoleWriter)
            .try_init()
            .map_err(|e| SiteError::logging(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directives_are_validated() {
        assert!(filter(Some("shoshiy_site=debug,warn")).is_ok());
        assert!(matches!(filter(Some("shoshiy_site=verbose")), Err(SiteError::Logging(_))));
    }
}
