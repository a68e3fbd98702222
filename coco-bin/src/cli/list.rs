use std::path::Path;

use crate::err::Error;

pub(crate) fn list_cassette(path: &Path) -> Result<(), Error> {
	let bytes = std::fs::read(path)?;
	let programs = coco_rom::cassette::list_programs(&bytes)
		.map_err(|e| Error::Validate(e.to_string()))?;

	if programs.is_empty() {
		println!("(no programs found)");
		return Ok(());
	}

	for program in &programs {
		println!(
			"{:<8}  type={}  load={:#06X}  exec={:#06X}  {} bytes",
			program.header.name_str(),
			program.header.file_type,
			program.header.load_addr,
			program.header.exec_addr,
			program.data.len(),
		);
	}
	Ok(())
}

pub(crate) fn list_disk(path: &Path) -> Result<(), Error> {
	let bytes = std::fs::read(path)?;
	let image = coco_rom::disk::DiskImage::from_bytes(bytes).map_err(|e| Error::Validate(e.to_string()))?;

	let files = image.list_files();
	if files.is_empty() {
		println!("(no files found)");
		return Ok(());
	}

	for entry in &files {
		println!(
			"{:<8}.{:<3}  granule={:<3}  last_sector_bytes={}",
			entry.name_str(),
			entry.ext_str(),
			entry.first_granule,
			entry.last_sector_bytes,
		);
	}
	Ok(())
}
