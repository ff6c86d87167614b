use std::fs::File;
use std::io::Read;
use std::path::Path;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};
use crate::error::SimulationError;
use crate::frames::Page;

lazy_static! {
    static ref SEPARATOR: Regex = Regex::new(r"[\s,]+").unwrap();
}

/// Tokenises a reference string into page identifiers
///
/// Tokens are separated by any run of whitespace and commas. Empty tokens are discarded, as are
/// tokens which aren't integers, so the simulator always receives a clean sequence
///
/// # Arguments
///
/// * `input`: The reference string
///
/// returns: Vec<Page>
///
/// # Examples
///
/// ```
/// use pagelib::io::parse_references;
/// assert_eq!(parse_references("7, 0 1,,2  x 0"), vec![7, 0, 1, 2, 0]);
/// ```
pub fn parse_references(input: &str) -> Vec<Page> {
    SEPARATOR
        .split(input.trim())
        .filter(|token| !token.is_empty())
        .filter_map(|token| match token.parse::<Page>() {
            Ok(page) => Some(page),
            Err(e) => {
                warn!(token, "Discarding malformed reference: {e}");
                None
            }
        })
        .collect()
}

/// Parses a frame count, falling back to a single frame when the input is unparsable or not
/// positive
///
/// # Examples
///
/// ```
/// use pagelib::io::parse_frame_count;
/// assert_eq!(parse_frame_count("4"), 4);
/// assert_eq!(parse_frame_count("zero"), 1);
/// assert_eq!(parse_frame_count("0"), 1);
/// ```
pub fn parse_frame_count(input: &str) -> usize {
    input.trim().parse::<usize>().unwrap_or(1).max(1)
}

pub fn get_reader(file: File) -> Result<impl Read, SimulationError> {
    // Compatibility on other systems
    #[cfg(not(unix))]
    {
        use std::io::BufReader;
        Ok(BufReader::new(file))
    }
    // Reference files are read once, front to back
    #[cfg(unix)]
    {
        use std::io::Cursor;
        use memmap2::{Advice, Mmap};
        // Mapping a zero length file fails on some platforms
        if file.metadata()?.len() == 0 {
            return Ok(Cursor::new(ReferenceBytes::Empty));
        }
        let m = unsafe { Mmap::map(&file)? };
        m.advise(Advice::Sequential)?;
        Ok(Cursor::new(ReferenceBytes::Mapped(m)))
    }
}

#[cfg(unix)]
enum ReferenceBytes {
    Empty,
    Mapped(memmap2::Mmap),
}

#[cfg(unix)]
impl AsRef<[u8]> for ReferenceBytes {
    fn as_ref(&self) -> &[u8] {
        match self {
            ReferenceBytes::Empty => &[],
            ReferenceBytes::Mapped(m) => &m[..],
        }
    }
}

/// Reads and tokenises a reference string stored in a file
pub fn read_references<P: AsRef<Path>>(path: P) -> Result<Vec<Page>, SimulationError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut text = String::new();
    get_reader(file)?.read_to_string(&mut text)?;
    let references = parse_references(&text);
    debug!(path = %path.display(), count = references.len(), "Read reference file");
    Ok(references)
}
