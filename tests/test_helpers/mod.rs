//! Scoped process-environment overrides for integration tests.

use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Every variable the board configuration reads.
pub const BOARD_VARS: [&str; 5] = [
    "TASKBOARD_BACKEND",
    "TASKBOARD_API_URL",
    "TASKBOARD_HTTP_TIMEOUT_SECS",
    "TASKBOARD_DATA_DIR",
    "TASKBOARD_STORAGE_KEY",
];

/// Holds the environment lock and restores overridden variables on drop.
pub struct EnvVarGuard {
    previous: Vec<(&'static str, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Clears every board variable, then applies `overrides`.
    pub fn board(overrides: &[(&'static str, &str)]) -> Self {
        let lock = ENV_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let previous = BOARD_VARS
            .iter()
            .map(|name| (*name, env::var_os(name)))
            .collect();

        for name in BOARD_VARS {
            let value = overrides
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| *value);
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(new_value) => env::set_var(name, new_value),
                    None => env::remove_var(name),
                }
            }
        }

        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (name, value) in self.previous.drain(..) {
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(previous) => env::set_var(name, previous),
                    None => env::remove_var(name),
                }
            }
        }
    }
}
