use std::env;
use std::io::Write;

use tracing_subscriber::EnvFilter;

/// Quiet unless asked: stdout carries the answer and stderr is for the user.
const DEFAULT_LOG_FILTER: &str = "warn";
const DEFAULT_LOG_FORMAT: &str = "pretty";

type InitResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormat {
    Pretty,
    Json,
}

fn parse_log_format(raw: Option<&str>) -> LogFormat {
    match raw
        .unwrap_or(DEFAULT_LOG_FORMAT)
        .trim()
        .to_ascii_lowercase()
        .as_str()
    {
        "json" => LogFormat::Json,
        _ => LogFormat::Pretty,
    }
}

fn env_filter_from_env() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global subscriber, writing to stderr. `RUST_LOG` sets the
/// filter and `LOG_FORMAT=json` switches to JSON lines. A failure is reported
/// on `err` and otherwise ignored; `llm` runs fine without logs.
pub fn init(err: &mut impl Write) {
    let format = parse_log_format(env::var("LOG_FORMAT").ok().as_deref());
    let init_result = match format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(env_filter_from_env())
            .with_writer(std::io::stderr)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter_from_env())
            .with_writer(std::io::stderr)
            .try_init(),
    };

    report_init_failure(init_result, err);
}

fn report_init_failure(init_result: InitResult, err: &mut impl Write) {
    if let Err(e) = init_result {
        let _ = writeln!(err, "llm: failed to initialize logging: {e}; continuing without logs");
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_log_format, report_init_failure, LogFormat};

    #[test]
    fn parse_log_format_defaults_to_pretty() {
        assert_eq!(parse_log_format(None), LogFormat::Pretty);
    }

    #[test]
    fn parse_log_format_accepts_json() {
        assert_eq!(parse_log_format(Some("json")), LogFormat::Json);
        assert_eq!(parse_log_format(Some(" JSON ")), LogFormat::Json);
    }

    #[test]
    fn parse_log_format_falls_back_for_unknown_values() {
        assert_eq!(parse_log_format(Some("xml")), LogFormat::Pretty);
    }

    #[test]
    fn init_failure_is_reported() {
        let mut err = Vec::new();
        report_init_failure(Err("a global default trace dispatcher has already been set".into()), &mut err);
        let msg = String::from_utf8(err).unwrap();
        assert!(msg.starts_with("llm: failed to initialize logging"), "{msg}");
        assert!(msg.contains("already been set"), "{msg}");
    }

    #[test]
    fn successful_init_is_silent() {
        let mut err = Vec::new();
        report_init_failure(Ok(()), &mut err);
        assert!(err.is_empty());
    }
}
