// evoctl - CLI for the Evolution WhatsApp messaging API
// Copyright (C) 2025 the evoctl authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::env;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

pub const BASE_URL_VAR: &str = "EVOLUTION_BASE_URL";
pub const APIKEY_VAR: &str = "EVOLUTION_APIKEY";

/// Effective configuration for one invocation, resolved once at startup and
/// handed to the transport client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    /// Sent as the `apikey` header. `None` means the header is omitted.
    pub api_key: Option<String>,
}

/// CLI overrides win over the environment; the environment wins over the
/// built-in default. An empty or blank API key counts as "no key".
pub fn resolve(base_url_override: Option<String>, api_key_override: Option<String>) -> Config {
    let base_url = base_url_override
        .or_else(|| env_non_blank(BASE_URL_VAR))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let api_key = api_key_override
        .filter(|k| !k.trim().is_empty())
        .or_else(|| env_non_blank(APIKEY_VAR));

    Config { base_url, api_key }
}

fn env_non_blank(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn lock() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let _guard = lock();
        unsafe {
            env::remove_var(BASE_URL_VAR);
            env::remove_var(APIKEY_VAR);
        }

        let config = resolve(None, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn environment_fills_in_both_values() {
        let _guard = lock();
        unsafe {
            env::set_var(BASE_URL_VAR, "https://evo.example.test");
            env::set_var(APIKEY_VAR, "top-secret");
        }

        let config = resolve(None, None);
        assert_eq!(config.base_url, "https://evo.example.test");
        assert_eq!(config.api_key.as_deref(), Some("top-secret"));
    }

    #[test]
    fn blank_api_key_means_no_header() {
        let _guard = lock();
        unsafe {
            env::remove_var(BASE_URL_VAR);
            env::set_var(APIKEY_VAR, "   ");
        }

        let config = resolve(None, None);
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn cli_overrides_win_over_environment() {
        let _guard = lock();
        unsafe {
            env::set_var(BASE_URL_VAR, "https://from-env.test");
            env::set_var(APIKEY_VAR, "env-key");
        }

        let config = resolve(
            Some("https://from-flag.test".into()),
            Some("flag-key".into()),
        );
        assert_eq!(config.base_url, "https://from-flag.test");
        assert_eq!(config.api_key.as_deref(), Some("flag-key"));
    }
}
