use tracing_subscriber::{fmt, EnvFilter};

/// Output level selected by the `-v` flags and `-q`. Quiet suppresses
/// everything below errors, each `-v` steps one level up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, 2) => Self::Debug,
            (false, _) => Self::Trace,
        }
    }

    /// Filter directive for this crate only; other crates stay silent
    /// unless `RUST_LOG` overrides the whole filter.
    fn directive(self) -> &'static str {
        match self {
            Self::Quiet => "importfix=error",
            Self::Normal => "importfix=warn",
            Self::Verbose => "importfix=info",
            Self::Debug => "importfix=debug",
            Self::Trace => "importfix=trace",
        }
    }
}

/// Installs the global subscriber. Diagnostics go to stderr so piped
/// stdout stays clean for the emitted import lines.
pub fn init(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let show_origin = verbosity >= Verbosity::Debug;
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(show_origin)
        .with_line_number(show_origin)
        .compact();

    if verbosity >= Verbosity::Verbose {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_beats_any_verbose_count() {
        assert_eq!(Verbosity::from_flags(3, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(0, true), Verbosity::Quiet);
    }

    #[test]
    fn test_flag_count_maps_to_levels() {
        assert_eq!(Verbosity::from_flags(0, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(1, false), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(2, false), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(3, false), Verbosity::Trace);
        assert_eq!(Verbosity::from_flags(200, false), Verbosity::Trace);
    }

    #[test]
    fn test_directive_names_this_crate() {
        assert_eq!(Verbosity::Normal.directive(), "importfix=warn");
        assert_eq!(Verbosity::Trace.directive(), "importfix=trace");
    }

    #[test]
    fn test_verbosity_ordering() {
        assert!(Verbosity::Quiet < Verbosity::Normal);
        assert!(Verbosity::Debug < Verbosity::Trace);
    }
}
