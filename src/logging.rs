//! stderr diagnostics. stdout carries scenario output only.
use tracing::Subscriber;
use tracing_subscriber::{fmt, fmt::MakeWriter, EnvFilter};

/// Installs the global subscriber writing to stderr.
pub fn init(verbose: bool) {
    if tracing::subscriber::set_global_default(subscriber(verbose, std::io::stderr)).is_err() {
        tracing::trace!("subscriber already installed");
    }
}

pub fn subscriber<W>(verbose: bool, make_writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt()
        .with_env_filter(filter(verbose))
        .with_writer(make_writer)
        .with_target(false)
        .finish()
}

fn filter(verbose: bool) -> EnvFilter {
    filter_from(verbose, std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())
}

/// `verbose` forces `debug`; otherwise the `RUST_LOG` directives apply,
/// defaulting to `warn` when unset or unparsable.
fn filter_from(verbose: bool, env: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    env.and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}
