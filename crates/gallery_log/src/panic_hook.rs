//! Panic hook for crash reporting

use backtrace::Backtrace;
use chrono::Local;
use std::any::Any;
use std::panic::PanicHookInfo;

/// Initialize the panic hook for crash reporting
pub fn init_panic_hook() {
    std::panic::set_hook(Box::new(panic_handler));
    tracing::debug!("Panic hook initialized");
}

fn panic_handler(info: &PanicHookInfo) {
    let thread = std::thread::current();
    let location = info
        .location()
        .map_or_else(|| "<unknown>".to_string(), |l| l.to_string());
    let report = crash_report(
        &Local::now().to_rfc3339(),
        thread.name().unwrap_or("<unnamed>"),
        &location,
        payload_message(info.payload()),
        &format!("{:?}", Backtrace::new()),
    );

    eprintln!("{}", report);
    tracing::error!("{}", report);

    let dump_path = std::env::temp_dir().join(format!(
        "galleria_crash_{}.txt",
        Local::now().format("%Y%m%d_%H%M%S")
    ));
    if let Err(e) = std::fs::write(&dump_path, &report) {
        eprintln!("Failed to write crash dump: {}", e);
    } else {
        eprintln!("Crash dump written to {}", dump_path.display());
    }
}

fn crash_report(
    timestamp: &str,
    thread: &str,
    location: &str,
    payload: &str,
    backtrace: &str,
) -> String {
    format!(
        "=== GALLERIA PANIC ===\n\
         Timestamp: {}\n\
         Thread: {}\n\
         Location: {}\n\
         Payload: {}\n\n\
         Stack Trace:\n{}",
        timestamp, thread, location, payload, backtrace
    )
}

/// Panic payloads are `&str` for literal messages and `String` for formatted ones
fn payload_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<unknown>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_message() {
        let literal: Box<dyn Any + Send> = Box::new("index out of range");
        assert_eq!(payload_message(literal.as_ref()), "index out of range");

        let formatted: Box<dyn Any + Send> = Box::new(format!("page {} missing", 3));
        assert_eq!(payload_message(formatted.as_ref()), "page 3 missing");

        let opaque: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(payload_message(opaque.as_ref()), "<unknown>");
    }

    #[test]
    fn test_payload_from_caught_panic() {
        let payload = std::panic::catch_unwind(|| {
            std::panic::resume_unwind(Box::new(String::from("feed worker died")))
        })
        .unwrap_err();
        assert_eq!(payload_message(payload.as_ref()), "feed worker died");
    }

    #[test]
    fn test_crash_report_layout() {
        let report = crash_report(
            "2024-01-01T00:00:00+00:00",
            "main",
            "src/store.rs:10:5",
            "boom",
            "<frames>",
        );
        assert!(report.starts_with("=== GALLERIA PANIC ===\n"));
        assert!(report.contains("Thread: main\n"));
        assert!(report.contains("Location: src/store.rs:10:5\n"));
        assert!(report.contains("Payload: boom\n\nStack Trace:\n<frames>"));
    }
}
