//! The emitted program image: an ordered sequence of bytes built up from
//! per-statement writes during pass 2, plus the execution address recorded
//! by `END`.
//!
//! `ORG` lets a program jump the program counter around, so the image is
//! not always one contiguous span. It's kept here as a list of contiguous
//! runs, in the order pass 2 first wrote to each -- adjacent writes within
//! a run are merged, a write at a new address starts another.

/// One contiguous run of emitted bytes, starting at `origin`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
	pub origin: u16,
	pub bytes: Vec<u8>,
}

impl Run {
	/// The address one past the last byte of this run.
	#[must_use]
	pub fn end(&self) -> u32 {
		u32::from(self.origin) + self.bytes.len() as u32
	}
}

/// The emitted program: zero or more contiguous runs plus an execution
/// address.
#[derive(Debug, Clone, Default)]
pub struct Image {
	runs: Vec<Run>,
	pub execution_address: u16,
}

impl Image {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Write `bytes` at `address`. Extends the most recently started run
	/// when `address` picks up exactly where it left off; otherwise starts a
	/// new run (an `ORG` jump, typically).
	pub fn write(&mut self, address: u16, bytes: &[u8]) {
		if bytes.is_empty() {
			return;
		}
		if let Some(run) = self.runs.last_mut() {
			if run.end() == u32::from(address) {
				run.bytes.extend_from_slice(bytes);
				return;
			}
		}
		self.runs.push(Run { origin: address, bytes: bytes.to_vec() });
	}

	#[must_use]
	pub fn runs(&self) -> &[Run] {
		&self.runs
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.runs.iter().all(|r| r.bytes.is_empty())
	}

	/// The concatenation of every run's bytes in address order, with no
	/// gap-filling across `ORG` jumps -- the `--to_bin` contract (§6).
	#[must_use]
	pub fn flatten(&self) -> Vec<u8> {
		let mut ordered: Vec<&Run> = self.runs.iter().collect();
		ordered.sort_by_key(|r| r.origin);
		ordered.into_iter().flat_map(|r| r.bytes.iter().copied()).collect()
	}

	/// The run a container writer should package as the program's payload:
	/// the one containing the execution address, or the first-written run
	/// if the execution address doesn't fall inside any of them.
	#[must_use]
	pub fn primary_run(&self) -> Option<&Run> {
		self.runs
			.iter()
			.find(|r| {
				let exec = u32::from(self.execution_address);
				exec >= u32::from(r.origin) && exec < r.end()
			})
			.or_else(|| self.runs.first())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn contiguous_writes_merge_into_one_run() {
		let mut image = Image::new();
		image.write(0x0E00, &[0x8E, 0x12, 0x34]);
		image.write(0x0E03, &[0x7E, 0x0E, 0x00]);
		assert_eq!(image.runs().len(), 1);
		assert_eq!(image.runs()[0].origin, 0x0E00);
		assert_eq!(image.runs()[0].bytes, vec![0x8E, 0x12, 0x34, 0x7E, 0x0E, 0x00]);
	}

	#[test]
	fn org_jump_starts_a_new_run() {
		let mut image = Image::new();
		image.write(0x0000, &[0x01, 0x02]);
		image.write(0x1000, &[0x03]);
		assert_eq!(image.runs().len(), 2);
	}

	#[test]
	fn flatten_concatenates_runs_without_gap_filling() {
		let mut image = Image::new();
		image.write(0x1000, &[0xAA]);
		image.write(0x0000, &[0x11, 0x22]);
		assert_eq!(image.flatten(), vec![0x11, 0x22, 0xAA]);
	}

	#[test]
	fn primary_run_is_the_one_holding_the_execution_address() {
		let mut image = Image::new();
		image.write(0x0000, &[0x01]);
		image.write(0x1000, &[0x02, 0x03]);
		image.execution_address = 0x1001;
		assert_eq!(image.primary_run().unwrap().origin, 0x1000);
	}

	#[test]
	fn primary_run_falls_back_to_first_when_no_run_holds_it() {
		let mut image = Image::new();
		image.write(0x2000, &[0x42]);
		image.execution_address = 0x9000;
		assert_eq!(image.primary_run().unwrap().origin, 0x2000);
	}
}
