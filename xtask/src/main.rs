use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const LAMBDA_PACKAGE: &str = "upload_alerts_lambda";
const LAMBDA_BINARIES: [&str; 2] = ["notifier", "subscription_manager"];
const DIST_DIR: &str = "infra/dist";

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the upload alerts workspace",
    long_about = "A unified CLI for CI checks and Lambda packaging in the\n\
                  upload alerts workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run CI checks (fmt, clippy, tests)
    Ci,
    /// Build and package both Lambda binaries as bootstrap zip artifacts
    ServerlessPackage {
        /// Compilation target triple for Lambda binaries
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        /// Build profile used for binaries
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    fn as_cargo_flag(self) -> Option<&'static str> {
        match self {
            Self::Debug => None,
            Self::Release => Some("--release"),
        }
    }
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn package_serverless_lambdas(target: &str, profile: BuildProfile) {
    require_installed_target(target);

    step("Build lambda binaries");
    run_cargo(&build_args(target, profile));

    step("Package lambda zip artifacts");
    let binary_dir = Path::new("target").join(target).join(profile.dir_name());
    let dist_dir = Path::new(DIST_DIR);
    fs::create_dir_all(dist_dir).expect("failed to create lambda dist directory");

    for bin in LAMBDA_BINARIES {
        let zip_path = artifact_path(dist_dir, bin);
        write_bootstrap_zip(&binary_dir.join(bin), &zip_path);
        eprintln!("packaged {}", zip_path.display());
    }
}

fn build_args(target: &str, profile: BuildProfile) -> Vec<&str> {
    let mut args = vec!["build", "-p", LAMBDA_PACKAGE, "--target", target];
    for bin in LAMBDA_BINARIES {
        args.extend(["--bin", bin]);
    }
    args.extend(profile.as_cargo_flag());
    args
}

fn artifact_path(dist_dir: &Path, bin: &str) -> PathBuf {
    dist_dir.join(format!("{bin}.zip"))
}

/// Fails early with an install hint instead of a long cargo error.
fn require_installed_target(target: &str) {
    let Ok(output) = Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
    else {
        eprintln!("warning: rustup not found, skipping target check");
        return;
    };

    let installed = String::from_utf8_lossy(&output.stdout);
    if !installed.lines().any(|line| line.trim() == target) {
        eprintln!("missing rust target `{target}`; run `rustup target add {target}`");
        exit(1);
    }
}

/// Lambda's provided runtimes execute a file named `bootstrap`.
fn write_bootstrap_zip(binary_path: &Path, zip_path: &Path) {
    let binary = fs::read(binary_path)
        .unwrap_or_else(|error| panic!("cannot read {}: {error}", binary_path.display()));
    let file = fs::File::create(zip_path).expect("failed to create lambda zip");
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file("bootstrap", options)
        .expect("failed to start bootstrap entry");
    zip.write_all(&binary).expect("failed to write bootstrap entry");
    zip.finish().expect("failed to finish lambda zip");
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test upload_alerts_core");
    run_cargo(&["test", "-p", "upload_alerts_core"]);

    step("Test upload_alerts_lambda");
    run_cargo(&["test", "-p", LAMBDA_PACKAGE]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci => {
            ci_check();
            eprintln!("\nCI job passed.");
        }
        Commands::ServerlessPackage { target, profile } => {
            package_serverless_lambdas(&target, profile);
        }
    }
}
