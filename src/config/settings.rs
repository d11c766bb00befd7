// src/config/settings.rs

use std::path::{Path, PathBuf};

use crate::config::flags::FLAGS_FILE_NAME;
use crate::config::model::ConfigFile;
use crate::engine::Platform;

/// Name of the generated gn args file inside the build directory.
pub const GN_ARGS_FILE_NAME: &str = "args.gn";

/// Name of the build log file inside the build directory.
pub const BUILD_LOG_FILE_NAME: &str = "build_output.txt";

/// Name of the run log file inside the build directory.
pub const RUN_LOG_FILE_NAME: &str = "chrome_output.txt";

/// Resolved settings for one orchestrator invocation.
///
/// Derived deterministically from the (platform, device) selection and the
/// optional config file; immutable once constructed.
///
/// Equality intentionally ignores `targets`: two settings describe the same
/// build if they agree on the checkout, the platform token, and the build
/// directory, regardless of which targets happen to be requested.
#[derive(Debug, Clone, Eq)]
pub struct BuildSettings {
    /// Directory holding the per-platform scratch gn files.
    pub source_root: PathBuf,
    /// Checkout root containing the `out_*` directories.
    pub project_root: PathBuf,
    /// Token used in directory names; see [`Platform::token`].
    pub platform_token: String,
    /// `<project_root>/out_<platform_token>/Default`.
    pub build_dir: PathBuf,
    /// Build targets, in the order they are passed to the build tool.
    pub targets: Vec<String>,
}

impl PartialEq for BuildSettings {
    fn eq(&self, other: &Self) -> bool {
        self.source_root == other.source_root
            && self.platform_token == other.platform_token
            && self.build_dir == other.build_dir
    }
}

impl BuildSettings {
    /// Derive settings from a platform selection.
    ///
    /// - `project_root`: `[project].root` from the config, else the CLI value.
    /// - `source_root`: `[project].source_root`, else the project root.
    /// - `build_dir`: `<project_root>/out_<token>/Default`.
    /// - `targets`: `[targets].<token>` override, else built-in defaults.
    pub fn derive(
        platform: Platform,
        device: &str,
        cli_project_root: impl AsRef<Path>,
        cfg: &ConfigFile,
    ) -> Self {
        let project_root = cfg
            .project
            .root
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| cli_project_root.as_ref().to_path_buf());

        let source_root = cfg
            .project
            .source_root
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| project_root.clone());

        let platform_token = platform.token(device);
        let build_dir = project_root
            .join(format!("out_{platform_token}"))
            .join("Default");

        let targets = cfg
            .targets
            .get(&platform_token)
            .cloned()
            .unwrap_or_else(|| platform.default_targets());

        Self {
            source_root,
            project_root,
            platform_token,
            build_dir,
            targets,
        }
    }

    /// Scratch gn file edited by the user: `<source_root>/<token>.gn`.
    pub fn scratch_gn_path(&self) -> PathBuf {
        self.source_root.join(format!("{}.gn", self.platform_token))
    }

    /// Generated gn args file: `<build_dir>/args.gn`.
    pub fn gn_args_path(&self) -> PathBuf {
        self.build_dir.join(GN_ARGS_FILE_NAME)
    }

    /// Build log file: `<build_dir>/build_output.txt`.
    pub fn build_log_path(&self) -> PathBuf {
        self.build_dir.join(BUILD_LOG_FILE_NAME)
    }

    /// Run log file: `<build_dir>/chrome_output.txt`.
    pub fn run_log_path(&self) -> PathBuf {
        self.build_dir.join(RUN_LOG_FILE_NAME)
    }

    /// Flags file consulted by the run operation.
    pub fn flags_file_path(&self) -> PathBuf {
        self.project_root.join(FLAGS_FILE_NAME)
    }

    /// Binary launched by the run operation, relative to the build directory.
    ///
    /// The first configured target names the binary.
    pub fn run_binary(&self) -> String {
        self.targets
            .first()
            .cloned()
            .unwrap_or_else(|| "chrome".to_string())
    }
}
