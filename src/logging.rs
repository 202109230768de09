use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset. HTML parsing and HTTP internals stay quiet.
const DEFAULT_DIRECTIVES: &str = "info,html5ever=warn,selectors=warn,reqwest=warn";

pub fn init() -> anyhow::Result<()> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(raw) if !raw.trim().is_empty() => {
            EnvFilter::try_new(&raw).with_context(|| format!("parse RUST_LOG={raw:?}"))?
        }
        _ => EnvFilter::try_new(DEFAULT_DIRECTIVES).context("build default log filter")?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("initialize tracing subscriber: {err}"))?;

    Ok(())
}
