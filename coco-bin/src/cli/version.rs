use coco_common::env;

pub(crate) fn init() {
	println!("{}", env::release());
}
