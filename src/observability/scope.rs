//! Start/complete logging for long-lived phases such as boot.

use std::time::Instant;

use super::logger::Logger;

/// Logs `{name}_BEGIN` on creation and `{name}_COMPLETE` / `{name}_FAILED`
/// when closed. Dropping it unclosed logs `{name}_INCOMPLETE`.
pub struct ObservationScope {
    name: String,
    timer: Timer,
    closed: bool,
}

impl ObservationScope {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Logger::info(&format!("{}_BEGIN", name), &[]);

        Self {
            name,
            timer: Timer::new(),
            closed: false,
        }
    }

    pub fn complete_with_fields(mut self, fields: &[(&str, &str)]) {
        self.closed = true;
        let duration = self.timer.elapsed_ms();
        let mut all_fields = vec![("duration_ms", duration.as_str())];
        all_fields.extend(fields.iter().copied());
        Logger::info(&format!("{}_COMPLETE", self.name), &all_fields);
    }

    pub fn fail(mut self, reason: &str) {
        self.closed = true;
        Logger::fatal(&format!("{}_FAILED", self.name), &[("reason", reason)]);
    }
}

impl Drop for ObservationScope {
    fn drop(&mut self) {
        if !self.closed {
            Logger::warn(
                &format!("{}_INCOMPLETE", self.name),
                &[("reason", "scope dropped without completion")],
            );
        }
    }
}

/// Elapsed-time measurement for log fields
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed milliseconds as a string
    pub fn elapsed_ms(&self) -> String {
        self.start.elapsed().as_millis().to_string()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_lifecycle() {
        let scope = ObservationScope::new("TEST");
        scope.complete_with_fields(&[("addr", "127.0.0.1:8080")]);

        let scope = ObservationScope::new("TEST");
        scope.fail("bind refused");

        // logs INCOMPLETE, must not panic
        drop(ObservationScope::new("TEST"));
    }

    #[test]
    fn test_timer() {
        let timer = Timer::new();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let ms: u64 = timer.elapsed_ms().parse().unwrap();
        assert!(ms >= 10);
    }
}
