use ghgscan_core::error::GhgError;
use std::path::Path;

use super::{read_lines, ProfileArgs};

pub fn run(input_file: &Path, profile: &ProfileArgs, layout: bool) -> Result<(), GhgError> {
    let catalog = profile.catalog()?;
    let lines = read_lines(input_file, layout)?;
    if lines.is_empty() {
        return Err(GhgError::EmptyDocument);
    }

    let tags = catalog.tracker.tag_lines(&lines);
    for (i, (line, tag)) in lines.iter().zip(&tags).enumerate() {
        println!("{:>5}  {:<24} {}", i, tag.to_string(), line);
    }

    Ok(())
}
