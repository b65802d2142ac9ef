//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Validation code for a missing or empty field
pub const RULE_REQUIRED: &str = "required";

/// Validation code for a malformed email address
pub const RULE_EMAIL: &str = "email";

/// Validation code for a value below its minimum length
pub const RULE_MIN: &str = "min";

/// Separator used when joining field messages into one error
pub const MESSAGE_SEPARATOR: &str = ", ";

// =============================================================================
// Authentication
// =============================================================================

/// Plain text hashed once to produce the dummy hash used for unknown emails
pub const DUMMY_PASSWORD: &str = "dummy-password-for-timing-only";
