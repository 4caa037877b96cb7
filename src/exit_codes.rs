//! Exit code constants for the stepwise CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, config, missing files, template errors)
//! - 2: Dataset error (malformed JSON, unknown problem)
//! - 3: Step ordering violation (prerequisite step not generated)
//! - 4: Extraction failure (no code or function definition found)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid config, IO failure or template error.
pub const USER_ERROR: i32 = 1;

/// Dataset error: the problem file could not be parsed or lacks a problem.
pub const DATASET_ERROR: i32 = 2;

/// A step was requested before one of its prerequisite steps existed on disk.
pub const STEP_ORDER_VIOLATION: i32 = 3;

/// No function name or definition could be extracted.
pub const EXTRACTION_FAILURE: i32 = 4;
