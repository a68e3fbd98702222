//! Shared fixtures for the 6809 assembler's integration tests.

use std::io::Write;
use std::path::Path;

use coco_compiler::Config;
use tempfile::{NamedTempFile, TempDir};

/// A temporary directory holding one input assembly file, ready to be
/// assembled and, optionally, written out as a container.
pub struct TestFixture {
	pub temp_dir: TempDir,
	pub input_file: NamedTempFile,
}

impl TestFixture {
	/// Write `asm_content` to a fresh temp file inside a fresh temp directory.
	pub fn new(asm_content: &str) -> Self {
		let temp_dir = TempDir::new().expect("failed to create temp directory");
		let mut input_file = NamedTempFile::new_in(&temp_dir).expect("failed to create temp file");
		input_file.write_all(asm_content.as_bytes()).expect("failed to write assembly content");
		Self { temp_dir, input_file }
	}

	pub fn input_path(&self) -> &Path {
		self.input_file.path()
	}

	pub fn output_path(&self, name: &str) -> std::path::PathBuf {
		self.temp_dir.path().join(name)
	}
}

/// Standard test configurations for different scenarios.
pub struct TestConfigs;

impl TestConfigs {
	pub fn basic() -> Config {
		Config::default()
	}

	pub fn with_direct_page(dp: u8) -> Config {
		Config::default().with_direct_page(dp)
	}

	pub fn strict() -> Config {
		let mut config = Config::default();
		config.assembly.truncate_on_overflow = false;
		config
	}
}

/// Common assembly source snippets, in EDTASM+ column-oriented syntax.
pub struct TestSnippets;

impl TestSnippets {
	pub fn minimal_program() -> &'static str {
		"START  LDX  #$0000\n       NOP\n       END  START\n"
	}

	pub fn basic_instructions() -> &'static str {
		"START  LDA  #$42\n\
		        STA  $0200\n\
		        LDX  $0000,X\n\
		        LDA  [TARGET]\n\
		TARGET FDB  $0200\n\
		        END  START\n"
	}

	pub fn with_labels() -> &'static str {
		"START  LDA  #$00\n\
		        CMPA #$42\n\
		        BEQ  DONE\n\
		        BRA  START\n\
		DONE   RTS\n\
		        END  START\n"
	}

	pub fn with_data() -> &'static str {
		"START  FCB  1,2,3,4\n\
		        FDB  $1000,$2000\n\
		MSG    FCC  \"HELLO\"\n\
		BUFFER RMB  16\n\
		        END  START\n"
	}

	pub fn invalid_program() -> &'static str {
		"START  LDA  UNDEFINED_SYMBOL\n       END  START\n"
	}
}
