//! Exit code constants for the quill CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable files)
//! - 2: Configuration error (missing credential, invalid config)
//! - 3: Validation failure (empty task description)
//! - 4: Output failure (artifact or run log could not be written)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or unreadable input files.
pub const USER_ERROR: i32 = 1;

/// Configuration error: missing API credential, invalid config or template.
pub const CONFIG_ERROR: i32 = 2;

/// Validation failure: a stage's task description is empty.
pub const VALIDATION_FAILURE: i32 = 3;

/// Output failure: the artifact or run log could not be written.
pub const OUTPUT_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            SUCCESS,
            USER_ERROR,
            CONFIG_ERROR,
            VALIDATION_FAILURE,
            OUTPUT_FAILURE,
        ];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
