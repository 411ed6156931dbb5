use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::MakeWriter, prelude::*, registry::LookupSpan,
};

use crate::{
    config::{AppConfig, LogFormat, TracingConfig},
    error::AppResult,
};

/// Tracer configuration and initialization.
///
/// Handles setting up logging for the catalog service.
pub struct Tracer;

impl Tracer {
    /// Installs the global subscriber described by the configuration.
    ///
    /// Log events go to stderr, leaving stdout to responses.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter directives do not parse or a global
    /// subscriber is already installed.
    pub fn install(config: &AppConfig) -> AppResult<()> {
        Self::subscriber(&config.tracing, std::io::stderr)?.try_init()?;
        Ok(())
    }

    /// Builds a subscriber that writes log events to `make_writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured filter directives do not parse.
    pub fn subscriber<W>(
        config: &TracingConfig,
        make_writer: W,
    ) -> AppResult<impl Subscriber + Send + Sync + 'static>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let filter = match &config.filter {
            Some(directives) => EnvFilter::try_new(directives)?,
            None => EnvFilter::from_default_env(),
        };
        let layer = fmt_layer(config.format, make_writer).with_filter(filter);

        Ok(tracing_subscriber::registry().with(layer))
    }
}

fn fmt_layer<S, W>(format: LogFormat, make_writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer().with_writer(make_writer);
    match format {
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use serde_json::Value;

    use super::*;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Buffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Buffer {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture(format: LogFormat) -> String {
        let buffer = Buffer::default();
        let config = TracingConfig {
            format,
            filter: Some("info".into()),
        };
        let subscriber = Tracer::subscriber(&config, buffer.clone()).unwrap();
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("hidden");
            tracing::info!(book_count = 2, "Catalog ready");
        });
        buffer.contents()
    }

    #[test]
    fn json_format() {
        let output = capture(LogFormat::Json);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 1);

        let event: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(event["level"], "INFO");
        assert_eq!(event["fields"]["message"], "Catalog ready");
        assert_eq!(event["fields"]["book_count"], 2);
    }

    #[test]
    fn pretty_format() {
        let output = capture(LogFormat::Pretty);
        assert!(output.contains("Catalog ready"));
        assert!(!output.contains("hidden"));
        assert!(!output.trim_start().starts_with('{'));
        assert!(serde_json::from_str::<Value>(&output).is_err());
    }
}
