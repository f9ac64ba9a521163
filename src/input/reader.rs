use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::input::{InputError, InputFormat, detect_format};

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path)?;
    match detect_format(path)? {
        InputFormat::JsonlGz => Ok(Box::new(BufReader::new(MultiGzDecoder::new(file)))),
        InputFormat::Jsonl => Ok(Box::new(BufReader::new(file))),
    }
}
