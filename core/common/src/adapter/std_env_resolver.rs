//! 標準環境変数解決実装（std::env を委譲）

use crate::domain::Dirs;
use crate::error::Error;
use crate::ports::outbound::EnvResolver;
use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "journal";

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

impl EnvResolver for StdEnvResolver {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok().filter(|s| !s.is_empty())
    }

    fn resolve_dirs(&self) -> Result<Dirs, Error> {
        resolve_dirs_with(|name| self.var(name))
    }

    fn current_dir(&self) -> Result<PathBuf, Error> {
        env::current_dir().map_err(|e| Error::env(format!("Failed to get current directory: {}", e)))
    }
}

/// 環境変数の参照関数から Dirs を解決する（テストから直接呼べるよう分離）
pub fn resolve_dirs_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Dirs, Error> {
    if let Some(home) = lookup("JOURNAL_HOME") {
        return Ok(Dirs::under(home));
    }

    let home = lookup("HOME").map(PathBuf::from);
    let xdg = |var: &str, fallback: &[&str]| -> Result<PathBuf, Error> {
        let base = match lookup(var) {
            Some(v) => PathBuf::from(v),
            None => {
                let mut p = home
                    .clone()
                    .ok_or_else(|| Error::env("HOME is not set"))?;
                for part in fallback {
                    p.push(part);
                }
                p
            }
        };
        Ok(base.join(APP_DIR))
    };

    Ok(Dirs {
        config_dir: xdg("XDG_CONFIG_HOME", &[".config"])?,
        data_dir: xdg("XDG_DATA_HOME", &[".local", "share"])?,
        state_dir: xdg("XDG_STATE_HOME", &[".local", "state"])?,
        cache_dir: xdg("XDG_CACHE_HOME", &[".cache"])?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_journal_home_wins() {
        let dirs = resolve_dirs_with(lookup(&[("JOURNAL_HOME", "/j"), ("HOME", "/home/u")])).unwrap();
        assert_eq!(dirs, Dirs::under("/j"));
    }

    #[test]
    fn test_xdg_and_home_fallbacks() {
        let dirs = resolve_dirs_with(lookup(&[
            ("HOME", "/home/u"),
            ("XDG_CONFIG_HOME", "/cfg"),
        ]))
        .unwrap();
        assert_eq!(dirs.config_dir, PathBuf::from("/cfg/journal"));
        assert_eq!(dirs.data_dir, PathBuf::from("/home/u/.local/share/journal"));
        assert_eq!(dirs.state_dir, PathBuf::from("/home/u/.local/state/journal"));
        assert_eq!(dirs.cache_dir, PathBuf::from("/home/u/.cache/journal"));
    }

    #[test]
    fn test_missing_home_is_env_error() {
        let err = resolve_dirs_with(lookup(&[])).unwrap_err();
        assert!(matches!(err, Error::Env(_)));
    }
}
