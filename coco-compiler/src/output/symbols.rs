//! Symbol table dump for `--symbols` (§6).
//!
//! There is no emulator-specific export format here -- one program name, one
//! flat namespace, one plain text dump of every defined symbol sorted by
//! name: `NAME = $VALUE  (address|equate)`.

use std::fmt::Write as _;

use crate::symbols::{SymbolKind, SymbolTable};
use crate::utils::word_to_hex;

fn kind_label(kind: SymbolKind) -> &'static str {
	match kind {
		SymbolKind::Address => "address",
		SymbolKind::Equate => "equate",
	}
}

/// Render every symbol in `table`, one line each, sorted by display name.
#[must_use]
pub fn render(table: &SymbolTable) -> String {
	let mut out = String::new();
	for symbol in table.sorted() {
		let _ = writeln!(
			out,
			"{:<16} = ${}  ({})",
			symbol.display_name,
			word_to_hex(symbol.value),
			kind_label(symbol.kind)
		);
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::SourcePos;
	use std::path::PathBuf;

	fn pos() -> SourcePos {
		SourcePos::new(PathBuf::from("t.asm"), 1, 1)
	}

	#[test]
	fn render_lists_symbols_sorted_with_kind_and_hex_value() {
		let mut table = SymbolTable::new();
		table.define("START", 0x0E00, SymbolKind::Address, pos()).unwrap();
		table.define("BUFSIZE", 0x0100, SymbolKind::Equate, pos()).unwrap();
		let rendered = render(&table);
		let lines: Vec<&str> = rendered.lines().collect();
		assert_eq!(lines.len(), 2);
		assert!(lines[0].starts_with("BUFSIZE"));
		assert!(lines[0].contains("$0100"));
		assert!(lines[0].contains("equate"));
		assert!(lines[1].starts_with("START"));
		assert!(lines[1].contains("$0E00"));
		assert!(lines[1].contains("address"));
	}

	#[test]
	fn render_of_empty_table_is_empty_string() {
		assert_eq!(render(&SymbolTable::new()), "");
	}
}
