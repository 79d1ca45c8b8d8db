//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

static COMPRESSED_SEQ: AtomicUsize = AtomicUsize::new(0);
static WRAPREG_BIN: OnceLock<PathBuf> = OnceLock::new();

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Fixture path rendered as a command-line argument.
pub fn fixture_arg(name: &str) -> String {
	fixture_path(name).to_string_lossy().into_owned()
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Load a fixture as a primitive tree.
pub fn fixture_json(name: &str) -> serde_json::Value {
	let path = fixture_path(name);
	let bytes = std::fs::read(&path).unwrap_or_else(|err| panic!("fixture {} unreadable: {err}", path.display()));
	serde_json::from_slice(&bytes).unwrap_or_else(|err| panic!("fixture {} is not json: {err}", path.display()))
}

/// Write a zstd-compressed copy of a fixture under the target directory and return its path.
pub fn compressed_fixture(name: &str) -> PathBuf {
	let source = fixture_path(name);
	let bytes = std::fs::read(&source).unwrap_or_else(|err| panic!("fixture {} unreadable: {err}", source.display()));
	let packed = zstd::encode_all(bytes.as_slice(), 3).unwrap_or_else(|err| panic!("zstd encode failed: {err}"));

	let dir = target_dir().join("wrapreg-fixtures");
	std::fs::create_dir_all(&dir).unwrap_or_else(|err| panic!("cannot create {}: {err}", dir.display()));
	let seq = COMPRESSED_SEQ.fetch_add(1, Ordering::Relaxed);
	let out = dir.join(format!("{}-{seq}-{name}.zst", std::process::id()));
	std::fs::write(&out, packed).unwrap_or_else(|err| panic!("cannot write {}: {err}", out.display()));
	out
}

/// Run the `wrapreg` binary with `args`.
pub fn run_wrapreg(args: &[&str]) -> Output {
	Command::new(wrapreg_bin()).args(args).output().expect("wrapreg command executes")
}

/// Run the `wrapreg` binary, require success, and parse stdout as JSON.
pub fn run_wrapreg_json(args: &[&str]) -> serde_json::Value {
	let output = run_wrapreg(args);
	assert!(
		output.status.success(),
		"wrapreg command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

/// Path of the `wrapreg` binary, building it when cargo did not provide one.
pub fn wrapreg_bin() -> &'static PathBuf {
	WRAPREG_BIN.get_or_init(resolve_wrapreg_bin)
}

fn resolve_wrapreg_bin() -> PathBuf {
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_wrapreg") {
		return PathBuf::from(path);
	}

	let mut bin = target_dir().join("debug");
	bin.push(if cfg!(windows) { "wrapreg.exe" } else { "wrapreg" });

	let status = Command::new("cargo")
		.current_dir(workspace_root())
		.args(["build", "--quiet", "--bin", "wrapreg"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build wrapreg binary at {}", bin.display());

	bin
}
