//! Text codec
//!
//! Conversion between raw file bytes and record strings.

use std::str::Utf8Error;

/// Decode file contents into records
///
/// Empty input is zero records, not one empty record.
pub fn decode(bytes: &[u8], separator: char) -> Result<Vec<String>, Utf8Error> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }

    let text = std::str::from_utf8(bytes)?;

    Ok(text.split(separator).map(str::to_owned).collect())
}

/// Encode records into file contents
///
/// Accepts any sequence of borrowed records so callers can encode a
/// prospective state without materializing it.
pub fn encode<'a, I>(records: I, separator: char) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut contents = String::new();

    for (i, record) in records.into_iter().enumerate() {
        if i > 0 {
            contents.push(separator);
        }
        contents.push_str(record);
    }

    contents
}
