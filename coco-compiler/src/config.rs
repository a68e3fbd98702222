//! Configuration for the 6809 assembler.
//!
//! Covers the options that are meaningful across runs (as opposed to
//! one-shot CLI flags like the input path): default direct page, pass
//! limits, fill bytes, and truncation policy. Loadable from TOML via serde.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_FILL_VALUE, DEFAULT_PASSES, MAX_PASSES};

/// Top-level assembler configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	pub assembly: AssemblyConfig,
	pub output: OutputConfig,
	pub debug: DebugConfig,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			assembly: AssemblyConfig::default(),
			output: OutputConfig::default(),
			debug: DebugConfig::default(),
		}
	}
}

/// Options that affect the two-pass assembly semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
	/// Initial direct-page register value, before any `SETDP`.
	pub default_direct_page: u8,
	/// Defensive cap on the pass-manager's retry loop (the assembler itself
	/// is always exactly two semantic passes; this bounds internal
	/// diagnostics/retries, not address re-flow).
	pub max_passes: usize,
	/// Byte written by `RMB` in pass 2.
	pub fill_value: u8,
	/// Whether a value that doesn't fit its operand width is a warning (the
	/// value is truncated/sign-extended) or a hard `ValueOutOfRange` error.
	pub truncate_on_overflow: bool,
	/// Maximum number of parse/pass-1 errors to accumulate before aborting
	/// (`None` means collect them all).
	pub max_errors: Option<usize>,
}

impl Default for AssemblyConfig {
	fn default() -> Self {
		Self {
			default_direct_page: 0,
			max_passes: DEFAULT_PASSES,
			fill_value: DEFAULT_FILL_VALUE,
			truncate_on_overflow: true,
			max_errors: None,
		}
	}
}

/// Options that affect where and how output is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
	/// Default program name stamped into cassette/disk metadata when `--name`
	/// is not given.
	pub default_name: String,
	/// Whether `--to_cas`/`--to_dsk` append to an existing container by
	/// default (mirrors `--append`, overridable per-invocation).
	pub append_by_default: bool,
	/// Leader length (in bytes) written before each cassette block's sync byte.
	pub cassette_leader_len: usize,
}

impl Default for OutputConfig {
	fn default() -> Self {
		Self {
			default_name: "PROGRAM".to_string(),
			append_by_default: false,
			cassette_leader_len: coco_rom::cassette::DEFAULT_LEADER_LEN,
		}
	}
}

/// Options for diagnostics unrelated to assembly correctness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
	/// Print a listing record per statement (mirrors `--print`).
	pub print_listing: bool,
	/// Print the symbol table after assembly (mirrors `--symbols`).
	pub print_symbols: bool,
}

impl Default for DebugConfig {
	fn default() -> Self {
		Self { print_listing: false, print_symbols: false }
	}
}

impl Config {
	/// Load a configuration from a TOML file.
	pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
		let text = std::fs::read_to_string(path)?;
		let config: Self = toml::from_str(&text)?;
		config.validate()?;
		Ok(config)
	}

	/// Serialize this configuration to a TOML file.
	pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
		let text = toml::to_string_pretty(self)?;
		std::fs::write(path, text)?;
		Ok(())
	}

	/// Reject contradictory settings.
	pub fn validate(&self) -> anyhow::Result<()> {
		if self.assembly.max_passes == 0 {
			anyhow::bail!("max_passes must be at least 1");
		}
		if self.assembly.max_passes > MAX_PASSES {
			anyhow::bail!("max_passes must not exceed {MAX_PASSES}");
		}
		if self.output.default_name.len() > 8 {
			anyhow::bail!("default_name must fit an 8-character program name");
		}
		Ok(())
	}

	#[must_use]
	pub fn with_direct_page(mut self, dp: u8) -> Self {
		self.assembly.default_direct_page = dp;
		self
	}

	#[must_use]
	pub fn with_max_passes(mut self, max_passes: usize) -> Self {
		self.assembly.max_passes = max_passes;
		self
	}

	#[must_use]
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.output.default_name = name.into();
		self
	}

	#[must_use]
	pub fn with_print_listing(mut self, enabled: bool) -> Self {
		self.debug.print_listing = enabled;
		self
	}

	#[must_use]
	pub fn with_print_symbols(mut self, enabled: bool) -> Self {
		self.debug.print_symbols = enabled;
		self
	}
}

/// A fluent alternative to `Config`'s `with_*` methods, for callers that
/// prefer to build a config before using it rather than mutate a default.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
	config: Config,
}

impl ConfigBuilder {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn direct_page(mut self, dp: u8) -> Self {
		self.config.assembly.default_direct_page = dp;
		self
	}

	#[must_use]
	pub fn max_passes(mut self, max_passes: usize) -> Self {
		self.config.assembly.max_passes = max_passes;
		self
	}

	#[must_use]
	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.config.output.default_name = name.into();
		self
	}

	#[must_use]
	pub fn append_by_default(mut self, append: bool) -> Self {
		self.config.output.append_by_default = append;
		self
	}

	pub fn build(self) -> anyhow::Result<Config> {
		self.config.validate()?;
		Ok(self.config)
	}
}
