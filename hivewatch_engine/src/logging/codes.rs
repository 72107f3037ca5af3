//! Event codes and their metadata
//!
//! Single source of truth for the codes attached to engine log events.

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for error, warning and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

/// System codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("HW001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("HW002");
    pub const CONFIGURATION_INVALID: Code = Code::new("HW003");
}

/// Snapshot input codes
pub mod input {
    use super::Code;

    pub const SNAPSHOT_READ_FAILED: Code = Code::new("HW101");
    pub const SNAPSHOT_PARSE_FAILED: Code = Code::new("HW102");
    pub const UNKNOWN_ENVIRONMENT: Code = Code::new("HW103");
}

/// Resource fetch codes
pub mod fetch {
    use super::Code;

    pub const FETCH_FAILED: Code = Code::new("HW201");
    pub const FETCH_CANCELLED: Code = Code::new("HW202");
    pub const STALE_RESPONSE_DISCARDED: Code = Code::new("HW203");
}

/// Expected-set codes
pub mod expected {
    use super::Code;

    pub const SPEC_REJECTED: Code = Code::new("HW301");
    pub const TEMPLATE_UNRESOLVED: Code = Code::new("HW302");
    pub const PERMISSION_DENIED: Code = Code::new("HW303");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("HW900");
    pub const DASHBOARD_EVALUATED: Code = Code::new("HW901");
    pub const STATUS_EVALUATED: Code = Code::new("HW902");
    pub const SPECS_SAVED: Code = Code::new("HW903");
    pub const RESOURCES_LOADED: Code = Code::new("HW904");
}

// ============================================================================
// METADATA LOOKUP
// ============================================================================

/// Category for a code, derived from its numeric block
pub fn get_category(code: &str) -> &'static str {
    match code.get(2..3) {
        Some("0") => "System",
        Some("1") => "Input",
        Some("2") => "Fetch",
        Some("3") => "ExpectedSet",
        Some("9") => "Success",
        _ => "Unknown",
    }
}

/// Human-readable description of a code
pub fn get_description(code: &str) -> &'static str {
    match code {
        "HW001" => "Internal engine failure",
        "HW002" => "Engine initialization failed",
        "HW003" => "Configuration rejected during validation",
        "HW101" => "Snapshot file could not be read",
        "HW102" => "Snapshot file is not valid JSON for the expected shape",
        "HW103" => "Requested environment is not part of the snapshot",
        "HW201" => "Resource fetch failed",
        "HW202" => "Resource fetch was cancelled",
        "HW203" => "Response from a superseded request was discarded",
        "HW301" => "Expected-set spec rejected by validation",
        "HW302" => "Referenced expected-set template could not be resolved",
        "HW303" => "Caller is not allowed to change expected sets",
        "HW900" => "Logging initialized",
        "HW901" => "Dashboard evaluated",
        "HW902" => "Environment status evaluated",
        "HW903" => "Expected-set specs saved",
        "HW904" => "Environment resources loaded",
        _ => "Unknown code",
    }
}

/// Whether processing can continue after an event with this code
pub fn is_recoverable(code: &str) -> bool {
    !matches!(code, "HW001" | "HW002" | "HW003")
}
