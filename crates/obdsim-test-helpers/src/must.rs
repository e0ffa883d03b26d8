//! Unwrap helpers for tests.
//!
//! Workspace lints forbid `unwrap()` and `expect()` everywhere, tests
//! included. These helpers panic with the error value and report the caller's
//! location.

use std::fmt::Debug;
use std::str::FromStr;

/// Unwrap a `Result`, panicking with the error on `Err`.
///
/// ```rust
/// use obdsim_test_helpers::must;
///
/// let speed: Result<u16, &str> = Ok(45);
/// assert_eq!(must(speed), 45);
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

/// Unwrap an `Option`, panicking with `msg` on `None`.
///
/// ```rust
/// use obdsim_test_helpers::must_some;
///
/// let first = [700, 710].first().copied();
/// assert_eq!(must_some(first, "empty log"), 700);
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

/// Parse a string, panicking on failure.
///
/// ```rust
/// use obdsim_test_helpers::must_parse;
///
/// let rpm: i32 = must_parse("700");
/// assert_eq!(rpm, 700);
/// ```
///
/// # Panics
///
/// Panics if parsing fails.
#[track_caller]
pub fn must_parse<T: FromStr>(s: &str) -> T
where
    T::Err: Debug,
{
    match s.parse() {
        Ok(v) => v,
        Err(e) => panic!("must_parse: failed to parse {s:?}: {e:?}"),
    }
}

/// Unwrap a `Result`, panicking with `context` and the error on `Err`.
///
/// # Panics
///
/// Panics if the result is `Err`.
#[track_caller]
pub fn must_with<T, E: Debug>(result: Result<T, E>, context: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must_with: {context}: {e:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_must_ok() {
        let r: Result<i32, String> = Ok(3);
        assert_eq!(must(r), 3);
    }

    #[test]
    #[should_panic(expected = "must: unexpected Err")]
    fn test_must_err_panics() {
        let r: Result<i32, &str> = Err("boom");
        let _ = must(r);
    }

    #[test]
    #[should_panic(expected = "must_some: nothing here")]
    fn test_must_some_none_panics() {
        let _ = must_some(None::<u8>, "nothing here");
    }

    #[test]
    fn test_must_parse() {
        let v: f64 = must_parse("0.45");
        assert!((v - 0.45).abs() < f64::EPSILON);
    }
}
