//! Observability for the gallery service
//!
//! - Structured JSON-line logging ([`Logger`])
//! - Boot phase scopes ([`ObservationScope`])
//! - Request timing ([`Timer`])
//!
//! ```ignore
//! use gallery_api::observability::{Logger, Timer};
//!
//! let timer = Timer::new();
//! // ... handle request ...
//! Logger::info("REQUEST_COMPLETE", &[("duration_ms", &timer.elapsed_ms())]);
//! ```

mod logger;
mod scope;

pub use logger::{Logger, Severity};
pub use scope::{ObservationScope, Timer};
