use std::sync::OnceLock;

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// Extra per-stage statistics are computed only when `CV_PRIMER_DEBUG` is set
pub(crate) fn debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(|| std::env::var("CV_PRIMER_DEBUG").is_ok())
}
