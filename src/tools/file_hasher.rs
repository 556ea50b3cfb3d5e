use crate::error::{PipelineError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const BUFFER_SIZE: usize = 4 * 1024 * 1024; // 4MB buffer

/// 短雜湊長度（十六進位字元數），用於輸出檔名
pub const SHORT_DIGEST_LEN: usize = 8;

/// 來源檔案的內容雜湊，只用來判斷檔案是否變更
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDigest {
    pub digest: String,
    pub short_digest: String,
}

impl ContentDigest {
    fn from_hex(digest: String) -> Self {
        let short_digest = digest[..SHORT_DIGEST_LEN].to_string();
        Self {
            digest,
            short_digest,
        }
    }
}

/// 以 BLAKE3 計算整個檔案內容的雜湊
pub fn hash_file(path: &Path) -> Result<ContentDigest> {
    let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| PipelineError::io(path, e))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(ContentDigest::from_hex(hasher.finalize().to_hex().to_string()))
}
