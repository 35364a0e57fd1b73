use std::path::PathBuf;

pub const DEFAULT_OUTPUT_CAP_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port the dashboard listens on
    pub port: u16,
    /// Workspace path override for command execution (`FDE_WORKSPACE_PATH`).
    /// Consulted when a request does not carry its own `cwd`.
    pub workspace_dir: Option<String>,
    /// Last-resort working directory, resolved once at process start.
    pub fallback_dir: String,
    /// Shell used to interpret command strings (pipes, `&&`, redirects).
    pub shell: String,
    /// Combined stdout/stderr budget per execution; exceeding it is fatal
    /// for that execution.
    pub output_cap_bytes: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            port: env_parse("FDE_PORT", 8080)?,
            workspace_dir: std::env::var("FDE_WORKSPACE_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            fallback_dir: match std::env::var("FDE_FALLBACK_DIR") {
                Ok(v) if !v.trim().is_empty() => v,
                _ => default_fallback_dir(),
            },
            shell: env_str("FDE_SHELL", &default_shell()),
            output_cap_bytes: env_parse("FDE_OUTPUT_CAP_BYTES", DEFAULT_OUTPUT_CAP_BYTES)?,
        })
    }
}

fn default_shell() -> String {
    std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
}

fn default_fallback_dir() -> String {
    std::env::current_dir()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|_| "/".to_string())
}

/// Effective working directory for one execution request:
/// explicit request `cwd`, else the configured workspace, else the fallback.
pub fn resolve_workdir(request_cwd: Option<&str>, config: &Config) -> PathBuf {
    let dir = request_cwd
        .filter(|v| !v.trim().is_empty())
        .map(ToString::to_string)
        .or_else(|| config.workspace_dir.clone())
        .unwrap_or_else(|| config.fallback_dir.clone());
    PathBuf::from(dir)
}

fn env_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse env var {key}={val}: {e}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            port: 0,
            workspace_dir: Some("/b".to_string()),
            fallback_dir: "/c".to_string(),
            shell: "/bin/sh".to_string(),
            output_cap_bytes: DEFAULT_OUTPUT_CAP_BYTES,
        }
    }

    #[test]
    fn request_cwd_wins_over_workspace_and_fallback() {
        let config = test_config();
        assert_eq!(resolve_workdir(Some("/a"), &config), PathBuf::from("/a"));
    }

    #[test]
    fn workspace_dir_wins_when_request_cwd_absent() {
        let config = test_config();
        assert_eq!(resolve_workdir(None, &config), PathBuf::from("/b"));
    }

    #[test]
    fn fallback_dir_used_when_nothing_else_is_set() {
        let config = Config {
            workspace_dir: None,
            ..test_config()
        };
        assert_eq!(resolve_workdir(None, &config), PathBuf::from("/c"));
    }

    #[test]
    fn blank_request_cwd_is_treated_as_absent() {
        let config = test_config();
        assert_eq!(resolve_workdir(Some("   "), &config), PathBuf::from("/b"));
    }
}
