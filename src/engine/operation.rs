// src/engine/operation.rs

use clap::ValueEnum;

/// Target platform for a build selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Platform {
    Android,
    ChromeOs,
    /// Chrome OS building against a physical device (simple chrome flow);
    /// the device board name becomes the platform token.
    ChromeOsDevice,
    Linux,
}

impl Platform {
    /// Platform token used in directory names (`out_<token>/Default`) and
    /// scratch gn file names (`<token>.gn`).
    ///
    /// For [`Platform::ChromeOsDevice`] the token is the device board itself,
    /// so two different boards get independent build directories.
    pub fn token(&self, device: &str) -> String {
        match self {
            Platform::Android => "android".to_string(),
            Platform::ChromeOs => "cros".to_string(),
            Platform::ChromeOsDevice => device.to_string(),
            Platform::Linux => "linux".to_string(),
        }
    }

    /// Default build targets for this platform, used when the config file
    /// does not override them.
    pub fn default_targets(&self) -> Vec<String> {
        match self {
            Platform::Android => vec!["chrome_public_apk".to_string()],
            Platform::ChromeOs | Platform::ChromeOsDevice | Platform::Linux => {
                vec!["chrome".to_string()]
            }
        }
    }
}

/// High-level operation requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Operation {
    /// Generate gn args for the selected platform.
    GenerateArgs,
    /// Build the configured targets.
    Build,
    /// Run the most recently built binary.
    Run,
    /// Deploy the most recently built binary onto a device.
    Deploy,
    /// Build, then run the fresh binary.
    BuildAndRun,
    /// Build, then deploy the fresh binary onto a device.
    BuildAndDeploy,
    /// Make the output panel visible; no processes are touched.
    ShowOutput,
    /// Re-dispatch the most recent non-repeat operation verbatim.
    RepeatPrevious,
}

impl Operation {
    /// One-line human description, used in logs and the sink.
    pub fn describe(&self) -> &'static str {
        match self {
            Operation::GenerateArgs => "generate gn args for the selected platform",
            Operation::Build => "build the configured targets",
            Operation::Run => "run the most recently built binary",
            Operation::Deploy => "deploy the most recently built binary",
            Operation::BuildAndRun => "build and run the new binary",
            Operation::BuildAndDeploy => "build and deploy the new binary",
            Operation::ShowOutput => "show the build output panel",
            Operation::RepeatPrevious => "repeat the previous operation",
        }
    }
}

/// Whether the given operation makes sense on the given platform.
///
/// Running locally is not possible for Android or a Chrome OS device build;
/// deploying is not possible for desktop Chrome OS or Linux builds.
pub fn operation_supported(platform: Platform, operation: Operation) -> bool {
    match operation {
        Operation::Run | Operation::BuildAndRun => !matches!(
            platform,
            Platform::Android | Platform::ChromeOsDevice
        ),
        Operation::Deploy | Operation::BuildAndDeploy => !matches!(
            platform,
            Platform::ChromeOs | Platform::Linux
        ),
        Operation::GenerateArgs
        | Operation::Build
        | Operation::ShowOutput
        | Operation::RepeatPrevious => true,
    }
}
