// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level configuration as read from `Crbuild.toml`.
///
/// ```toml
/// [project]
/// root = "/src/chromium/src"
///
/// [targets]
/// linux = ["chrome", "content_shell"]
/// android = ["chrome_public_apk"]
///
/// [shell]
/// program = "/bin/bash"
/// ```
///
/// All sections are optional and have reasonable defaults; a missing config
/// file behaves like an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Checkout locations from `[project]`.
    #[serde(default)]
    pub project: ProjectSection,

    /// Per-platform-token build target overrides from `[targets]`.
    ///
    /// Keys are platform tokens (e.g. `"linux"`, `"android"`, or a Chrome OS
    /// board name). Tokens without an entry use built-in defaults.
    #[serde(default)]
    pub targets: BTreeMap<String, Vec<String>>,

    /// Shell session settings from `[shell]`.
    #[serde(default)]
    pub shell: ShellSection,
}

/// `[project]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectSection {
    /// Checkout root containing the `out_*` directories.
    ///
    /// If `None`, the CLI `--project-root` (default `.`) is used.
    #[serde(default)]
    pub root: Option<String>,

    /// Directory holding the per-platform scratch gn files (`<token>.gn`).
    ///
    /// If `None`, falls back to the project root.
    #[serde(default)]
    pub source_root: Option<String>,
}

/// `[shell]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ShellSection {
    /// Program spawned as the persistent command shell.
    #[serde(default = "default_shell_program")]
    pub program: String,
}

fn default_shell_program() -> String {
    "/bin/bash".to_string()
}

impl Default for ShellSection {
    fn default() -> Self {
        Self {
            program: default_shell_program(),
        }
    }
}
