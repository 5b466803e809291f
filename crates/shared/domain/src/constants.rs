//! API-wide constants shared between the kernel and feature slices.

/// OpenAPI tag for system endpoints (health, diagnostics).
pub const SYSTEM_TAG: &str = "System";

/// OpenAPI tag for feature-model conversion endpoints.
pub const CONVERT_TAG: &str = "Convert";

/// Non-standard HTTP status signaling "transformation applied".
///
/// The web editor frontend expects this exact code on successful
/// conversions; changing it breaks compatibility.
pub const TRANSFORMATION_APPLIED: u16 = 214;
