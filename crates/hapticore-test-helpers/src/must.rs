//! Unwrap helpers for tests.
//!
//! Workspace lints deny `unwrap()` and `expect()`; these helpers panic with
//! the error value and point at the caller through `#[track_caller]`.

use std::fmt::Debug;

/// Unwrap a `Result`, panicking with the error value.
///
/// ```rust
/// use hapticore_test_helpers::must;
///
/// let level: Result<u8, &str> = Ok(128);
/// assert_eq!(must(level), 128);
/// ```
///
/// # Panics
///
/// Panics if the result is `Err`.
#[track_caller]
pub fn must<T, E: Debug>(result: Result<T, E>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must: unexpected Err: {e:?}"),
    }
}

/// Unwrap an `Option`, panicking with `msg` if `None`.
///
/// ```rust
/// use hapticore_test_helpers::must_some;
///
/// let session = Some(3u64);
/// assert_eq!(must_some(session, "expected an active session"), 3);
/// ```
///
/// # Panics
///
/// Panics if the option is `None`.
#[track_caller]
pub fn must_some<T>(option: Option<T>, msg: &str) -> T {
    match option {
        Some(v) => v,
        None => panic!("must_some: {msg}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_must_ok() {
        assert_eq!(must(Ok::<_, String>(5)), 5);
    }

    #[test]
    #[should_panic(expected = "must: unexpected Err")]
    fn test_must_err_panics() {
        must(Err::<(), _>("driver fault"));
    }

    #[test]
    #[should_panic(expected = "must_some: no session")]
    fn test_must_some_none_panics() {
        must_some(None::<u64>, "no session");
    }
}
