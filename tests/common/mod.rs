use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Routes the processor's tracing output to the test harness at warn level
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("fightrank_processor=warn"))
            .with_test_writer()
            .try_init();
    });
}
