//! The symbol table: a flat, case-folded mapping from identifier to value.
//!
//! There is no scoping: every label, `EQU`, and `SETDP` constant lives in one
//! namespace for the whole assembly (including anything pulled in via
//! `INCLUDE`). A symbol is defined exactly once, during pass 1, and never
//! changes afterwards -- pass 2 only reads it.

use crate::error::{AssemblyError, AssemblyResult, SourcePos};

/// The backing map. Plain `HashMap` by default; with `advanced-symbols`,
/// `IndexMap` is used instead so [`SymbolTable::in_definition_order`] can
/// return symbols in the order pass 1 defined them, without an extra sort
/// pass over the whole table.
#[cfg(not(feature = "advanced-symbols"))]
type Entries = std::collections::HashMap<String, Symbol>;
#[cfg(feature = "advanced-symbols")]
type Entries = indexmap::IndexMap<String, Symbol>;

/// What a symbol was created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
	/// A label: the program-counter value at the point it was defined.
	Address,
	/// An `EQU` (or `SETDP`-adjacent) constant.
	Equate,
}

/// A single defined symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
	/// The name as written in source, case preserved for display.
	pub display_name: String,
	pub value: u16,
	pub kind: SymbolKind,
	pub defined_at: SourcePos,
}

/// The flat, case-insensitive symbol table built during pass 1 and consulted
/// (read-only) during pass 2.
#[derive(Debug, Default)]
pub struct SymbolTable {
	entries: Entries,
}

impl SymbolTable {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	fn fold(name: &str) -> String {
		name.to_ascii_uppercase()
	}

	/// Define a symbol, failing if one with the same (case-folded) name
	/// already exists.
	pub fn define(
		&mut self,
		name: &str,
		value: u16,
		kind: SymbolKind,
		pos: SourcePos,
	) -> AssemblyResult<()> {
		let key = Self::fold(name);
		if let Some(existing) = self.entries.get(&key) {
			return Err(AssemblyError::duplicate_symbol(pos, name, existing.defined_at.clone()));
		}
		self.entries.insert(
			key,
			Symbol { display_name: name.to_string(), value, kind, defined_at: pos },
		);
		Ok(())
	}

	#[must_use]
	pub fn get(&self, name: &str) -> Option<&Symbol> {
		self.entries.get(&Self::fold(name))
	}

	#[must_use]
	pub fn value(&self, name: &str) -> Option<u16> {
		self.get(name).map(|s| s.value)
	}

	#[must_use]
	pub fn contains(&self, name: &str) -> bool {
		self.entries.contains_key(&Self::fold(name))
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Every symbol, sorted by display name, for `--symbols` output.
	#[must_use]
	pub fn sorted(&self) -> Vec<&Symbol> {
		let mut symbols: Vec<&Symbol> = self.entries.values().collect();
		symbols.sort_by(|a, b| a.display_name.cmp(&b.display_name));
		symbols
	}

	/// Every symbol in the order it was defined during pass 1. Only
	/// meaningful with `advanced-symbols` enabled; a plain `HashMap` has no
	/// stable definition order to report.
	#[cfg(feature = "advanced-symbols")]
	#[must_use]
	pub fn in_definition_order(&self) -> Vec<&Symbol> {
		self.entries.values().collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	fn pos(line: usize) -> SourcePos {
		SourcePos::new(PathBuf::from("test.asm"), line, 1)
	}

	#[test]
	fn lookup_is_case_insensitive() {
		let mut table = SymbolTable::new();
		table.define("Start", 0x0E00, SymbolKind::Address, pos(1)).unwrap();
		assert_eq!(table.value("START"), Some(0x0E00));
		assert_eq!(table.value("start"), Some(0x0E00));
	}

	#[test]
	fn display_name_preserves_original_case() {
		let mut table = SymbolTable::new();
		table.define("Start", 0x0E00, SymbolKind::Address, pos(1)).unwrap();
		assert_eq!(table.get("START").unwrap().display_name, "Start");
	}

	#[test]
	fn redefinition_is_rejected() {
		let mut table = SymbolTable::new();
		table.define("LOOP", 10, SymbolKind::Address, pos(1)).unwrap();
		let err = table.define("loop", 20, SymbolKind::Address, pos(5));
		assert!(matches!(err, Err(AssemblyError::DuplicateSymbol { .. })));
	}

	#[test]
	fn sorted_is_ordered_by_display_name() {
		let mut table = SymbolTable::new();
		table.define("ZEBRA", 1, SymbolKind::Equate, pos(1)).unwrap();
		table.define("APPLE", 2, SymbolKind::Equate, pos(2)).unwrap();
		let names: Vec<&str> = table.sorted().iter().map(|s| s.display_name.as_str()).collect();
		assert_eq!(names, vec!["APPLE", "ZEBRA"]);
	}
}
