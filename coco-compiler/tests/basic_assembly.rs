//! End-to-end assembly integration tests for the 6809 assembler.
//!
//! Unlike the unit tests alongside each module, these exercise the full
//! pipeline -- source file on disk, through `assemble`, into a listing, a
//! symbol dump, and each of the three container formats.

mod common;

use coco_compiler::{assemble, AssemblyError};
use common::{TestConfigs, TestFixture, TestSnippets};

#[test]
fn minimal_program_assembles_and_names_a_program() {
	let fixture = TestFixture::new(TestSnippets::minimal_program());
	let program = assemble(fixture.input_path(), &TestConfigs::basic()).unwrap();
	assert_eq!(program.symbols.value("START"), Some(0x0000));
	assert_eq!(program.image.execution_address, 0x0000);
}

#[test]
fn basic_instructions_resolve_a_forward_reference() {
	let fixture = TestFixture::new(TestSnippets::basic_instructions());
	let program = assemble(fixture.input_path(), &TestConfigs::basic()).unwrap();
	assert!(program.symbols.contains("TARGET"));
	assert!(!program.image.flatten().is_empty());
}

#[test]
fn labels_and_branches_assemble_to_a_fixed_point() {
	let fixture = TestFixture::new(TestSnippets::with_labels());
	let program = assemble(fixture.input_path(), &TestConfigs::basic()).unwrap();
	assert_eq!(
		program.image.flatten(),
		vec![0x86, 0x00, 0x81, 0x42, 0x27, 0x02, 0x20, 0xF8, 0x39]
	);
}

#[test]
fn data_directives_emit_exact_bytes() {
	let fixture = TestFixture::new(TestSnippets::with_data());
	let program = assemble(fixture.input_path(), &TestConfigs::basic()).unwrap();
	let flat = program.image.flatten();
	assert_eq!(&flat[0..4], &[1, 2, 3, 4]);
	assert_eq!(&flat[4..8], &[0x10, 0x00, 0x20, 0x00]);
	assert_eq!(&flat[8..13], b"HELLO");
	assert_eq!(flat.len(), 4 + 4 + 5 + 16);
}

#[test]
fn undefined_symbol_is_an_unresolved_symbol_error() {
	let fixture = TestFixture::new(TestSnippets::invalid_program());
	let err = assemble(fixture.input_path(), &TestConfigs::basic()).unwrap_err();
	assert!(matches!(err, AssemblyError::UnresolvedSymbol { .. }));
}

#[test]
fn listing_has_one_record_per_statement() {
	let fixture = TestFixture::new(TestSnippets::with_data());
	let program = assemble(fixture.input_path(), &TestConfigs::basic()).unwrap();
	let rendered = coco_compiler::output::listing::render(&program.statements);
	assert_eq!(rendered.lines().count(), program.statements.len());
}

#[test]
fn symbols_dump_lists_every_defined_symbol() {
	let fixture = TestFixture::new(TestSnippets::with_data());
	let program = assemble(fixture.input_path(), &TestConfigs::basic()).unwrap();
	let rendered = coco_compiler::output::symbols::render(&program.symbols);
	assert!(rendered.contains("START"));
	assert!(rendered.contains("MSG"));
	assert!(rendered.contains("BUFFER"));
}

#[test]
fn to_bin_round_trips_the_flattened_image() {
	use coco_compiler::output::containers;
	let fixture = TestFixture::new(TestSnippets::with_data());
	let program = assemble(fixture.input_path(), &TestConfigs::basic()).unwrap();
	let out = fixture.output_path("out.bin");
	containers::write_bin(&program, &out, false).unwrap();
	assert_eq!(std::fs::read(&out).unwrap(), program.image.flatten());
}

#[test]
fn to_cas_and_to_dsk_both_produce_readable_containers() {
	use coco_compiler::output::containers;
	let fixture = TestFixture::new(TestSnippets::minimal_program());
	let program = assemble(fixture.input_path(), &TestConfigs::basic()).unwrap();

	let cas_path = fixture.output_path("out.cas");
	containers::write_cas(&program, &cas_path, "TEST", false, 4).unwrap();
	let cas_bytes = std::fs::read(&cas_path).unwrap();
	let programs = coco_rom::cassette::list_programs(&cas_bytes).unwrap();
	assert_eq!(programs.len(), 1);
	assert_eq!(programs[0].header.name_str(), "TEST");

	let dsk_path = fixture.output_path("out.dsk");
	containers::write_dsk(&program, &dsk_path, "TEST", false).unwrap();
	let dsk_bytes = std::fs::read(&dsk_path).unwrap();
	let disk = coco_rom::disk::DiskImage::from_bytes(dsk_bytes).unwrap();
	assert_eq!(disk.list_files().len(), 1);
}

#[test]
fn direct_page_config_changes_direct_vs_extended_choice() {
	let fixture = TestFixture::new("\tSETDP $10\n\tLDA $1042\n\tEND\n");
	let program = assemble(fixture.input_path(), &TestConfigs::with_direct_page(0)).unwrap();
	// high byte of $1042 matches the SETDP'd direct page, so LDA goes Direct ($96).
	assert_eq!(program.image.flatten(), vec![0x96, 0x42]);
}
