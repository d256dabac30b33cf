//! Audit log helpers.
//!
//! Every line carries the numeric `event_id` plus its decoded `event_area`
//! and `event_operation`, so logs can be filtered by area or by
//! success/failure without parsing messages.

use courier_events::EventId;

fn describe(event: EventId) -> (&'static str, &'static str) {
    event
        .decode()
        .map(|c| (c.area().as_str(), c.operation.name()))
        .unwrap_or(("unknown", "unknown"))
}

/// An operation was attempted or completed.
pub fn info(event: EventId, message: &str) {
    let (area, operation) = describe(event);
    ::tracing::info!(
        event_id = event.get(),
        event_area = area,
        event_operation = operation,
        "{message}"
    );
}

/// An access check refused the request.
pub fn denied(event: EventId, message: &str) {
    let (area, operation) = describe(event);
    ::tracing::warn!(
        event_id = event.get(),
        event_area = area,
        event_operation = operation,
        outcome = "forbidden",
        "{message}"
    );
}

/// An operation failed without an underlying error value.
pub fn error(event: EventId, message: &str) {
    let (area, operation) = describe(event);
    ::tracing::error!(
        event_id = event.get(),
        event_area = area,
        event_operation = operation,
        "{message}"
    );
}

/// An operation failed with `err`; the full source chain is recorded.
pub fn failure(event: EventId, message: &str, err: &(dyn std::error::Error + 'static)) {
    let (area, operation) = describe(event);
    let mut chain = Vec::new();
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }
    ::tracing::error!(
        event_id = event.get(),
        event_area = area,
        event_operation = operation,
        error = %err,
        error_chain = ?chain,
        "{message}"
    );
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use courier_events::{MessageOperation, TokenOperation};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_writer(move || writer.clone())
            .finish();
        ::tracing::subscriber::with_default(subscriber, f);
        let bytes = out.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[derive(Debug)]
    struct StoreDown;

    impl std::fmt::Display for StoreDown {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("store down")
        }
    }

    impl std::error::Error for StoreDown {}

    #[test]
    fn info_lines_carry_decoded_event_fields() {
        let out = capture(|| info(MessageOperation::GetById.info(), "get message 4"));
        assert!(out.contains("\"event_id\":201"), "{out}");
        assert!(out.contains("\"event_area\":\"message\""), "{out}");
        assert!(out.contains("\"event_operation\":\"GETBYID\""), "{out}");
        assert!(out.contains("get message 4"), "{out}");
    }

    #[test]
    fn failures_use_the_error_band() {
        let out = capture(|| failure(MessageOperation::CreateMessage.error(), "send failed", &StoreDown));
        assert!(out.contains("\"event_id\":1203"), "{out}");
        assert!(out.contains("\"level\":\"ERROR\""), "{out}");
        assert!(out.contains("store down"), "{out}");
    }

    #[test]
    fn denials_are_warnings() {
        let out = capture(|| denied(TokenOperation::GetIdentity.error(), "nope"));
        assert!(out.contains("\"level\":\"WARN\""), "{out}");
        assert!(out.contains("\"outcome\":\"forbidden\""), "{out}");
    }
}
