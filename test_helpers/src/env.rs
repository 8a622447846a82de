//! Helpers for mutating environment variables in tests.
//!
//! Each mutation holds a global re-entrant mutex and returns an RAII guard
//! that restores the previous value (or removes the variable) on drop.
//!
//! # Examples
//!
//! ```
//! use balau_test_helpers::env;
//!
//! let _g = env::set_var("BALAU_EXAMPLE", "1");
//! assert_eq!(std::env::var("BALAU_EXAMPLE").as_deref(), Ok("1"));
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

/// RAII guard that serialises environment access for its lifetime.
#[must_use = "dropping releases the environment lock"]
pub struct EnvLock {
    _guard: ReentrantMutexGuard<'static, ()>,
}

fn mutate<F>(key: String, mutator: F) -> EnvVarGuard
where
    F: FnOnce(&str),
{
    let _guard = ENV_MUTEX.lock();
    let original = env::var_os(&key);
    mutator(&key);
    EnvVarGuard { key, original }
}

/// Sets an environment variable and returns a guard restoring its prior value.
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    // SAFETY: `mutate` holds `ENV_MUTEX` while the closure runs.
    mutate(key.into(), |k| unsafe { env::set_var(k, value.as_ref()) })
}

/// Removes an environment variable and returns a guard restoring its prior value.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    // SAFETY: `mutate` holds `ENV_MUTEX` while the closure runs.
    mutate(key.into(), |k| unsafe { env::remove_var(k) })
}

/// Acquires the global environment lock until the returned guard is dropped.
///
/// Use this when a test reads several variables that other tests mutate.
pub fn lock() -> EnvLock {
    EnvLock {
        _guard: ENV_MUTEX.lock(),
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        if let Some(val) = self.original.take() {
            // SAFETY: We hold `ENV_MUTEX` during restoration.
            unsafe { env::set_var(&self.key, val) };
        } else {
            // SAFETY: We hold `ENV_MUTEX` during restoration.
            unsafe { env::remove_var(&self.key) };
        }
    }
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_restores_previous_value() {
        let _outer = set_var("BALAU_HELPERS_RESTORE", "outer");
        {
            let _inner = set_var("BALAU_HELPERS_RESTORE", "inner");
            assert_eq!(env::var("BALAU_HELPERS_RESTORE").as_deref(), Ok("inner"));
        }
        assert_eq!(env::var("BALAU_HELPERS_RESTORE").as_deref(), Ok("outer"));
    }

    #[test]
    fn guard_removes_previously_absent_variable() {
        let _cleared = remove_var("BALAU_HELPERS_ABSENT");
        {
            let _set = set_var("BALAU_HELPERS_ABSENT", "value");
        }
        assert!(env::var_os("BALAU_HELPERS_ABSENT").is_none());
    }
}
