mod normalizer_tests;

static ONCE: std::sync::Once = std::sync::Once::new();

/// Installs the test logger once per process so strategy traces show up
/// under `--nocapture`.
pub(crate) fn init_test_logging() {
    ONCE.call_once(|| {
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::Trace)
            .try_init();
    });
}
