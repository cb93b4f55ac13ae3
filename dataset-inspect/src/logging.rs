//! Invocation-scoped structured logging.
//!
//! Pipelines only emit `tracing` events. The subscriber that receives them is
//! built here as a [Dispatch] and handed to [scoped], so it lives exactly as
//! long as one pipeline run and no global subscriber is ever installed.

use std::env;
use tracing::Dispatch;
use tracing_subscriber::{filter::LevelFilter, fmt::MakeWriter, prelude::*, EnvFilter};

/// Logger options.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// The level used when `RUST_LOG` is not set.
    pub default_level: LevelFilter,
    pub with_target: bool,
    pub ansi: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            default_level: LevelFilter::INFO,
            with_target: true,
            ansi: true,
        }
    }
}

impl LoggerConfig {
    /// Build a logger writing to stderr.
    pub fn build(&self) -> Dispatch {
        self.build_with_writer(std::io::stderr)
    }

    pub fn build_with_writer<W>(&self, make_writer: W) -> Dispatch
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(self.with_target)
            .with_ansi(self.ansi)
            .with_writer(make_writer)
            .compact();
        let filter_layer = {
            let filter = EnvFilter::from_default_env();
            if env::var("RUST_LOG").is_err() {
                filter.add_directive(self.default_level.into())
            } else {
                filter
            }
        };

        let subscriber = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer);
        Dispatch::new(subscriber)
    }
}

/// Run `f` with `dispatch` receiving every event it emits.
pub fn scoped<T>(dispatch: &Dispatch, f: impl FnOnce() -> T) -> T {
    tracing::dispatcher::with_default(dispatch, f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn events_reach_only_the_scoped_logger() {
        let buf = SharedBuf::default();
        let config = LoggerConfig {
            ansi: false,
            ..Default::default()
        };
        let dispatch = {
            let buf = buf.clone();
            config.build_with_writer(move || buf.clone())
        };

        tracing::error!("before the scope");
        scoped(&dispatch, || tracing::error!("image a.jpg has no annotations"));
        tracing::error!("after the scope");

        let text = buf.contents();
        assert!(text.contains("image a.jpg has no annotations"));
        assert!(!text.contains("before the scope"));
        assert!(!text.contains("after the scope"));
    }
}
