//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Model context
pub const FIELD_CONFIGURATION: &str = "configuration";
pub const FIELD_DOCUMENT_DIGEST: &str = "document_digest";

// Collection sizes
pub const FIELD_CLASS_COUNT: &str = "class_count";
pub const FIELD_METHOD_COUNT: &str = "method_count";
pub const FIELD_HIT_COUNT: &str = "hit_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
