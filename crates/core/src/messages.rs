//! User-facing wording for backend failures.

/// Shown when the backend could not be reached or answered garbage.
pub const BACKEND_UNAVAILABLE: &str = "Backend not responding";

/// Shown when the backend rejected a value that must be unique.
pub const DUPLICATE_VALUE: &str = "This value already exists";

/// Substrings that identify unique-key violations in backend messages.
const DUPLICATE_MARKERS: &[&str] = &["already exists", "duplicate key", "duplicate entry"];

/// Translate a raw backend rejection message into alert text.
///
/// Duplicate-key failures are reworded; blank messages fall back to
/// [`BACKEND_UNAVAILABLE`]; everything else passes through trimmed.
pub fn friendly_message(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return BACKEND_UNAVAILABLE.to_string();
    }
    let lowered = trimmed.to_lowercase();
    if DUPLICATE_MARKERS.iter().any(|m| lowered.contains(m)) {
        return DUPLICATE_VALUE.to_string();
    }
    trimmed.to_string()
}
