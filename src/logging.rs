use tracing_subscriber::EnvFilter;

/// `RUST_LOG` 기반 로그 출력을 설정한다. 기본 레벨은 info, 출력은 stderr.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
