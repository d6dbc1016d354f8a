/// Configure tracing once at application startup.
///
/// Filtering comes from `RUST_LOG` and defaults to `info`. Output goes to stderr
/// so it never mixes with the catalog printed on stdout.
///
/// ```bash
/// RUST_LOG=debug product_catalog list
/// RUST_LOG=product_catalog::actor_framework=debug product_catalog add ...
/// ```
pub fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
