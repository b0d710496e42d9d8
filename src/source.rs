use std::path::Path;

use bytes::{Bytes, BytesMut};
use tokio::{
    fs::File,
    io::{stdin, AsyncRead},
};
use tokio_stream::StreamExt;
use tokio_util::codec::{Decoder, FramedRead};

use crate::{parser::parse_keys, Error, Result};

static BUFFER_SIZE: usize = 64 * 1024;

/// Frames a byte stream into chunks that end on a line boundary
struct ChunkDecoder;

impl Decoder for ChunkDecoder {
    type Item = Bytes;
    type Error = Error;

    #[inline]
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        match memchr::memrchr(b'\n', src) {
            Some(index) => Ok(Some(src.split_to(index + 1).freeze())),
            None => Ok(None),
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        if let Some(chunk) = self.decode(src)? {
            return Ok(Some(chunk));
        }
        if src.is_empty() {
            Ok(None)
        } else {
            Ok(Some(src.split().freeze()))
        }
    }
}

async fn collect_keys<R>(reader: R, key_len: usize, limit: usize) -> Result<Vec<String>>
where
    R: AsyncRead + Unpin,
{
    let mut framed = FramedRead::with_capacity(reader, ChunkDecoder, BUFFER_SIZE);
    let mut keys = Vec::new();

    while keys.len() < limit {
        let Some(chunk) = framed.next().await else {
            break;
        };
        keys.extend(parse_keys(&chunk?, key_len, limit - keys.len())?);
    }

    log::debug!("Read {} keys of length {key_len}", keys.len());
    Ok(keys)
}

/// Reads up to `limit` keys of `key_len` characters from a word list, one
/// candidate per line. `-` reads standard input.
///
/// # Errors
///
/// Returns an error if the source cannot be read or is not valid UTF-8.
#[tokio::main(flavor = "current_thread")]
pub async fn read_keys(path: &Path, key_len: usize, limit: usize) -> Result<Vec<String>> {
    if path == Path::new("-") {
        collect_keys(stdin(), key_len, limit).await
    } else {
        let file = File::open(path).await?;
        collect_keys(file, key_len, limit).await
    }
}
