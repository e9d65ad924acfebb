// Debug log buffer shown on the Debug screen
use once_cell::sync::Lazy;
use std::sync::Mutex;

pub const MAX_DEBUG_LOGS: usize = 1000;

static DEBUG_LOGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(Vec::new()));

// stderr would tear the alternate screen, so mirroring is opt-in
static MIRROR_TO_STDERR: Lazy<bool> = Lazy::new(|| {
    std::env::var("INCLUSIVO_LOG_STDERR")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
});

pub fn debug_log<S: Into<String>>(msg: S) {
    let msg = msg.into();
    let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
    let formatted_msg = format!("[{}] {}", timestamp, msg);

    if *MIRROR_TO_STDERR {
        eprintln!("{}", formatted_msg);
    }
    if let Ok(mut logs) = DEBUG_LOGS.lock() {
        logs.push(formatted_msg);
        if logs.len() > MAX_DEBUG_LOGS {
            logs.remove(0);
        }
    }
}

/// Snapshot of the current log buffer.
pub fn debug_logs() -> Vec<String> {
    DEBUG_LOGS.lock().map(|logs| logs.clone()).unwrap_or_default()
}

#[macro_export]
macro_rules! debug_trace {
    ($($arg:tt)*) => {
        $crate::logging::debug_log(format!("TRACE: {}", format!($($arg)*)))
    };
}

#[macro_export]
macro_rules! debug_warn {
    ($($arg:tt)*) => {
        $crate::logging::debug_log(format!("WARN: {}", format!($($arg)*)))
    };
}

#[macro_export]
macro_rules! debug_error {
    ($($arg:tt)*) => {
        $crate::logging::debug_log(format!("ERROR: {}", format!($($arg)*)))
    };
}

#[macro_export]
macro_rules! debug_timing {
    ($name:expr, $start:expr) => {
        $crate::logging::debug_log(format!("TIMING: {} took {:?}", $name, $start.elapsed()))
    };
}
