use std::str::from_utf8;

use crate::Result;

fn accept(line: &[u8], key_len: usize) -> Result<Option<String>> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    let line = from_utf8(line)?;

    let end = match line.char_indices().nth(key_len) {
        Some((end, _)) => end,
        None if line.chars().count() == key_len => line.len(),
        None => return Ok(None),
    };

    Ok(Some(line[..end].to_string()))
}

/// Extracts up to `limit` keys from a chunk of newline separated lines.
///
/// Lines shorter than `key_len` characters are skipped, longer ones are cut
/// down to their first `key_len` characters. A trailing line without a
/// newline is treated like any other line.
pub fn parse_keys(chunk: &[u8], key_len: usize, limit: usize) -> Result<Vec<String>> {
    let mut keys = Vec::new();

    let mut start = 0;
    let ends = memchr::memchr_iter(b'\n', chunk).chain(std::iter::once(chunk.len()));
    for mid in ends {
        if keys.len() >= limit {
            break;
        }
        if let Some(key) = accept(&chunk[start..mid], key_len)? {
            keys.push(key);
        }
        start = mid + 1;
    }

    Ok(keys)
}
