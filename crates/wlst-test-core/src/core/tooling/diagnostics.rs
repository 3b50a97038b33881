pub mod codes {
    pub const PROJECT_ROOT_MISSING: &str = "WLSTTEST-001";
    pub const BUILD_OUTPUT_UNSET: &str = "WLSTTEST-002";
    pub const STAGING_UNSET: &str = "WLSTTEST-003";
    pub const PARAMETER_NOT_SET: &str = "WLSTTEST-004";
    pub const NOT_A_DIRECTORY: &str = "WLSTTEST-005";
    pub const DOES_NOT_EXIST: &str = "WLSTTEST-006";
    pub const ENTRY_POINT_MISSING: &str = "WLSTTEST-007";
    pub const ENTRY_POINT_NOT_EXECUTABLE: &str = "WLSTTEST-008";
    pub const RESOLVER_VERSION_EMPTY: &str = "WLSTTEST-009";
    pub const COPIER_VERSION_EMPTY: &str = "WLSTTEST-010";
    pub const RUNNER_VERSION_EMPTY: &str = "WLSTTEST-011";
    pub const NO_TESTS_FOUND: &str = "WLSTTEST-012";
    pub const CREATE_DIRECTORY: &str = "WLSTTEST-013";
    pub const DRIVER_MISSING: &str = "WLSTTEST-014";
    pub const DRIVER_WRITE: &str = "WLSTTEST-015";
    pub const STAGING_INSIDE_ROOT: &str = "WLSTTEST-016";
    pub const RESERVED_VARIABLE: &str = "WLSTTEST-017";
    pub const TESTS_SKIPPED: &str = "WLSTTEST-018";
    pub const INVALID_VERBOSITY: &str = "WLSTTEST-019";
    pub const COPY_TREE: &str = "WLSTTEST-020";
    pub const RESOLVE_PROPERTY: &str = "WLSTTEST-021";
    pub const LAUNCH: &str = "WLSTTEST-022";
    pub const TESTS_FAILED: &str = "WLSTTEST-023";
    pub const CONFIG_FILE: &str = "WLSTTEST-024";
}
