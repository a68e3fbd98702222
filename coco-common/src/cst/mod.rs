pub const LOGO: &str = r"
 ____ ___  ____ ___     __    ___    _    ____  __  __
/ ___/ _ \/ ___/ _ \   / /   / _ \  / \  / ___||  \/  |
| |  | | | |  | | | | / /   / /_\ \/ _ \ \___ \| |\/| |
| |__| |_| |__| |_| |/ /___ / _  _  ___ \ ___) | |  | |
\____\___/\____\___/\____/ /_/ \_\/_/ \_\____/|_|  |_|
";

/// The publicly visible name of the toolkit
#[allow(dead_code)]
pub const PKG_NAME: &str = "casm";

/// The publicly visible user-agent of the command-line tools
#[allow(dead_code)]
pub const USER_AGENT: &str = concat!("casm ", env!("CARGO_PKG_VERSION"));

/// Thread stack size for the worker runtime that backs the file-listing CLI (defaults to 10MiB)
pub static RUNTIME_STACK_SIZE: std::sync::LazyLock<usize> = std::sync::LazyLock::new(|| {
	// Stack frames are generally larger in debug mode.
	let default = if cfg!(debug_assertions) {
		20 * 1024 * 1024 // 20MiB in debug mode
	} else {
		10 * 1024 * 1024 // 10MiB in release mode
	};
	option_env!("CASM_RUNTIME_STACK_SIZE").and_then(|s| s.parse::<usize>().ok()).unwrap_or(default)
});

/// How many threads can be started for blocking operations (defaults to 4)
pub static RUNTIME_MAX_BLOCKING_THREADS: std::sync::LazyLock<usize> =
	std::sync::LazyLock::new(|| {
		option_env!("CASM_RUNTIME_MAX_BLOCKING_THREADS")
			.and_then(|s| s.parse::<usize>().ok())
			.unwrap_or(4)
	});

/// The version identifier of this build
pub static PKG_VERSION: std::sync::LazyLock<String> =
	std::sync::LazyLock::new(|| match option_env!("CASM_BUILD_METADATA") {
		Some(metadata) if !metadata.trim().is_empty() => {
			let version = env!("CARGO_PKG_VERSION");
			format!("{version}+{metadata}")
		}
		_ => env!("CARGO_PKG_VERSION").to_owned(),
	});
