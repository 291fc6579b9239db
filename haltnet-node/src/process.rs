//! Process termination seam.

/// Terminates the hosting process. Injected wherever the shutdown
/// mechanism needs to exit, so harnesses can intercept termination and
/// observe what would otherwise be unobservable.
pub trait ProcessExit: Send + Sync {
    fn exit(&self, code: i32);
}

/// The real thing.
#[derive(Debug, Default)]
pub struct OsExit;

impl ProcessExit for OsExit {
    fn exit(&self, code: i32) {
        std::process::exit(code);
    }
}
