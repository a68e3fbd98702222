//! Error types for the 6809 assembler.
//!
//! Every diagnostic carries a [`SourcePos`] so the CLI can print
//! `line N: message` regardless of which component raised it.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A location in a source file (or an included file).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourcePos {
	pub file: PathBuf,
	pub line: usize,
	pub column: usize,
}

impl SourcePos {
	#[must_use]
	pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
		Self { file, line, column }
	}

	/// A position with no known file, for errors raised before a file is
	/// associated with the statement being processed (container I/O, etc.).
	#[must_use]
	pub fn unknown() -> Self {
		Self { file: PathBuf::new(), line: 0, column: 0 }
	}
}

impl fmt::Display for SourcePos {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.line == 0 {
			write!(f, "<unknown>")
		} else {
			write!(f, "line {}", self.line)
		}
	}
}

/// The result type used throughout the assembler.
pub type AssemblyResult<T> = Result<T, AssemblyError>;

/// All diagnostic kinds the assembler can raise.
#[derive(Error, Debug)]
pub enum AssemblyError {
	#[error("{pos}: {message}")]
	LexError { pos: SourcePos, message: String },

	#[error("{pos}: {message}")]
	SyntaxError { pos: SourcePos, message: String },

	#[error("{pos}: unresolved symbol '{name}'")]
	UnresolvedSymbol { pos: SourcePos, name: String },

	#[error("{pos}: symbol '{name}' already defined at {first_defined}")]
	DuplicateSymbol { pos: SourcePos, name: String, first_defined: SourcePos },

	#[error("{pos}: {message}")]
	ValueOutOfRange { pos: SourcePos, message: String },

	#[error("{pos}: addressing mode '{mode}' is not legal for {mnemonic}")]
	IllegalAddressingMode { pos: SourcePos, mnemonic: String, mode: String },

	#[error("{pos}: {message}")]
	IllegalIndexedCombination { pos: SourcePos, message: String },

	#[error("{pos}: direct-page mismatch: value's high byte is {actual:#04X}, direct page is {expected:#04X}")]
	DirectPageMismatch { pos: SourcePos, expected: u8, actual: u8 },

	#[error("{pos}: include cycle detected for '{}'", path.display())]
	IncludeCycle { pos: SourcePos, path: PathBuf },

	#[error("{pos}: I/O error: {source}")]
	Io {
		pos: SourcePos,
		#[source]
		source: std::io::Error,
	},

	#[error("container is full: {message}")]
	ContainerFull { message: String },

	#[error("{} error(s) occurred", .0.len())]
	Multiple(Vec<AssemblyError>),
}

impl Clone for AssemblyError {
	fn clone(&self) -> Self {
		match self {
			Self::LexError { pos, message } => Self::LexError { pos: pos.clone(), message: message.clone() },
			Self::SyntaxError { pos, message } => {
				Self::SyntaxError { pos: pos.clone(), message: message.clone() }
			}
			Self::UnresolvedSymbol { pos, name } => {
				Self::UnresolvedSymbol { pos: pos.clone(), name: name.clone() }
			}
			Self::DuplicateSymbol { pos, name, first_defined } => Self::DuplicateSymbol {
				pos: pos.clone(),
				name: name.clone(),
				first_defined: first_defined.clone(),
			},
			Self::ValueOutOfRange { pos, message } => {
				Self::ValueOutOfRange { pos: pos.clone(), message: message.clone() }
			}
			Self::IllegalAddressingMode { pos, mnemonic, mode } => Self::IllegalAddressingMode {
				pos: pos.clone(),
				mnemonic: mnemonic.clone(),
				mode: mode.clone(),
			},
			Self::IllegalIndexedCombination { pos, message } => {
				Self::IllegalIndexedCombination { pos: pos.clone(), message: message.clone() }
			}
			Self::DirectPageMismatch { pos, expected, actual } => {
				Self::DirectPageMismatch { pos: pos.clone(), expected: *expected, actual: *actual }
			}
			Self::IncludeCycle { pos, path } => Self::IncludeCycle { pos: pos.clone(), path: path.clone() },
			Self::Io { pos, source } => Self::Io {
				pos: pos.clone(),
				source: std::io::Error::new(source.kind(), source.to_string()),
			},
			Self::ContainerFull { message } => Self::ContainerFull { message: message.clone() },
			Self::Multiple(errors) => Self::Multiple(errors.clone()),
		}
	}
}

impl AssemblyError {
	#[must_use]
	pub fn lex(pos: SourcePos, message: impl Into<String>) -> Self {
		Self::LexError { pos, message: message.into() }
	}

	#[must_use]
	pub fn syntax(pos: SourcePos, message: impl Into<String>) -> Self {
		Self::SyntaxError { pos, message: message.into() }
	}

	#[must_use]
	pub fn unresolved_symbol(pos: SourcePos, name: impl Into<String>) -> Self {
		Self::UnresolvedSymbol { pos, name: name.into() }
	}

	#[must_use]
	pub fn duplicate_symbol(pos: SourcePos, name: impl Into<String>, first_defined: SourcePos) -> Self {
		Self::DuplicateSymbol { pos, name: name.into(), first_defined }
	}

	#[must_use]
	pub fn value_out_of_range(pos: SourcePos, message: impl Into<String>) -> Self {
		Self::ValueOutOfRange { pos, message: message.into() }
	}

	#[must_use]
	pub fn illegal_addressing_mode(
		pos: SourcePos,
		mnemonic: impl Into<String>,
		mode: impl Into<String>,
	) -> Self {
		Self::IllegalAddressingMode { pos, mnemonic: mnemonic.into(), mode: mode.into() }
	}

	#[must_use]
	pub fn illegal_indexed_combination(pos: SourcePos, message: impl Into<String>) -> Self {
		Self::IllegalIndexedCombination { pos, message: message.into() }
	}

	#[must_use]
	pub fn direct_page_mismatch(pos: SourcePos, expected: u8, actual: u8) -> Self {
		Self::DirectPageMismatch { pos, expected, actual }
	}

	#[must_use]
	pub fn include_cycle(pos: SourcePos, path: PathBuf) -> Self {
		Self::IncludeCycle { pos, path }
	}

	#[must_use]
	pub fn io(pos: SourcePos, source: std::io::Error) -> Self {
		Self::Io { pos, source }
	}

	#[must_use]
	pub fn container_full(message: impl Into<String>) -> Self {
		Self::ContainerFull { message: message.into() }
	}

	#[must_use]
	pub fn multiple(errors: Vec<AssemblyError>) -> Self {
		Self::Multiple(errors)
	}

	/// The position this error is anchored to, if any (`Multiple` has none of its own).
	#[must_use]
	pub fn pos(&self) -> Option<&SourcePos> {
		match self {
			Self::LexError { pos, .. }
			| Self::SyntaxError { pos, .. }
			| Self::UnresolvedSymbol { pos, .. }
			| Self::DuplicateSymbol { pos, .. }
			| Self::ValueOutOfRange { pos, .. }
			| Self::IllegalAddressingMode { pos, .. }
			| Self::IllegalIndexedCombination { pos, .. }
			| Self::DirectPageMismatch { pos, .. }
			| Self::IncludeCycle { pos, .. }
			| Self::Io { pos, .. } => Some(pos),
			Self::ContainerFull { .. } | Self::Multiple(_) => None,
		}
	}

	/// Whether this error kind should stop assembly immediately (pass 2
	/// errors are always fatal; the parser/pass 1 instead accumulate via
	/// [`ErrorCollector`] before surfacing a `Multiple`).
	#[must_use]
	pub fn is_fatal(&self) -> bool {
		!matches!(self, Self::Multiple(_))
	}
}

/// Accumulates diagnostics raised while parsing or during pass 1, so a user
/// sees every parse-level problem from one run instead of stopping at the
/// first. Pass 2 does not use this: it is fail-fast by design (§7).
#[derive(Debug, Default)]
pub struct ErrorCollector {
	errors: Vec<AssemblyError>,
	max_errors: Option<usize>,
}

impl ErrorCollector {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with_max_errors(max_errors: usize) -> Self {
		Self { errors: Vec::new(), max_errors: Some(max_errors) }
	}

	/// Record an error. Returns `false` once the configured cap is reached,
	/// signalling the caller to stop collecting and bail out.
	pub fn push(&mut self, error: AssemblyError) -> bool {
		self.errors.push(error);
		match self.max_errors {
			Some(max) => self.errors.len() < max,
			None => true,
		}
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.errors.is_empty()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.errors.len()
	}

	#[must_use]
	pub fn errors(&self) -> &[AssemblyError] {
		&self.errors
	}

	/// Convert the collected errors into a single `Result`, `Ok(())` if none
	/// were recorded.
	pub fn into_result(self) -> AssemblyResult<()> {
		if self.errors.is_empty() {
			Ok(())
		} else if self.errors.len() == 1 {
			Err(self.errors.into_iter().next().unwrap())
		} else {
			Err(AssemblyError::multiple(self.errors))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn pos(line: usize) -> SourcePos {
		SourcePos::new(PathBuf::from("test.asm"), line, 1)
	}

	#[test]
	fn display_includes_line_number() {
		let err = AssemblyError::syntax(pos(4), "unknown mnemonic FOO");
		assert_eq!(err.to_string(), "line 4: unknown mnemonic FOO");
	}

	#[test]
	fn clone_preserves_io_error_message() {
		let io_err = std::io::Error::other("disk full");
		let err = AssemblyError::io(pos(1), io_err);
		let cloned = err.clone();
		assert_eq!(err.to_string(), cloned.to_string());
	}

	#[test]
	fn collector_bundles_multiple_errors() {
		let mut collector = ErrorCollector::new();
		collector.push(AssemblyError::syntax(pos(1), "bad"));
		collector.push(AssemblyError::syntax(pos(2), "also bad"));
		let result = collector.into_result();
		match result {
			Err(AssemblyError::Multiple(errors)) => assert_eq!(errors.len(), 2),
			_ => panic!("expected Multiple"),
		}
	}

	#[test]
	fn collector_cap_signals_stop() {
		let mut collector = ErrorCollector::with_max_errors(2);
		assert!(collector.push(AssemblyError::syntax(pos(1), "a")));
		assert!(!collector.push(AssemblyError::syntax(pos(2), "b")));
	}
}
