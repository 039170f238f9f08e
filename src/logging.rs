//! Process-wide `tracing` setup for the binary.
//!
//! Library code only emits events; nothing is printed until [`init`] installs
//! a subscriber. `RUST_LOG` takes precedence over [`LogConfig::level`].

use std::io::{self, IsTerminal};
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level used when `RUST_LOG` is not set.
    pub level: Level,
    /// Include worker thread names in each line.
    pub show_thread_info: bool,
    pub show_time: bool,
    /// Extra directives, e.g. `"mandel_world::core::actions::schedule=debug"`.
    pub target_filters: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            show_thread_info: true,
            show_time: true,
            target_filters: None,
        }
    }
}

impl LogConfig {
    /// Warnings only; used by `--quiet`.
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            level: Level::WARN,
            show_thread_info: false,
            ..Self::default()
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.to_string()));

        if let Some(filters) = &self.target_filters {
            for directive in filters.split(',').filter_map(|f| f.trim().parse().ok()) {
                filter = filter.add_directive(directive);
            }
        }

        filter
    }
}

static INIT: Once = Once::new();

/// Installs the global subscriber. Only the first call has any effect.
pub fn init(config: LogConfig) {
    INIT.call_once(|| {
        let fmt_layer = fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(io::stderr().is_terminal())
            .with_target(false)
            .with_thread_names(config.show_thread_info);

        let registry = tracing_subscriber::registry().with(config.env_filter());

        let result = if config.show_time {
            registry.with(fmt_layer).try_init()
        } else {
            registry.with(fmt_layer.without_time()).try_init()
        };

        if let Err(err) = result {
            eprintln!("Error setting global tracing subscriber: {err}");
        }
    });
}
