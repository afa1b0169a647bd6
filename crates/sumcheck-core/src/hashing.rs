use std::{
    fs::File,
    io::{self, BufReader, ErrorKind, Read},
    path::Path,
};

use tracing::debug;

use crate::algorithm::Algorithm;
use crate::error::CheckError;

const READ_BUF_LEN: usize = 1024 * 64;

/// Result of pushing one stream through a hasher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    pub hex: String,
    pub bytes_read: u64,
}

/// Reads `reader` to the end and returns its lowercase hex digest.
pub fn digest_reader<R: Read>(algorithm: Algorithm, mut reader: R) -> io::Result<Digest> {
    let mut hasher = algorithm.hasher();
    let mut buf = [0u8; READ_BUF_LEN];
    let mut bytes_read = 0u64;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
        bytes_read += n as u64;
    }

    Ok(Digest {
        hex: hex::encode(hasher.finalize()),
        bytes_read,
    })
}

pub fn digest_file(algorithm: Algorithm, path: &Path) -> Result<Digest, CheckError> {
    let file = File::open(path).map_err(|e| CheckError::io(path, e))?;
    let digest = digest_reader(algorithm, BufReader::new(file))
        .map_err(|e| CheckError::io(path, e))?;

    debug!(
        path = %path.display(),
        algorithm = %algorithm,
        bytes = digest.bytes_read,
        "hashed file"
    );
    Ok(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const ABC: &[(Algorithm, &str)] = &[
        (
            Algorithm::Sha224,
            "23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7",
        ),
        (
            Algorithm::Sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        ),
        (
            Algorithm::Sha384,
            "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed8086072ba1e7cc2358baeca134c825a7",
        ),
        (
            Algorithm::Sha512,
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f",
        ),
    ];

    /// Hands out at most `chunk` bytes per read and fails once with `Interrupted`.
    struct Choppy<'a> {
        data: &'a [u8],
        chunk: usize,
        interrupted: bool,
    }

    impl Read for Choppy<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::new(ErrorKind::Interrupted, "try again"));
            }
            let n = self.chunk.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn known_vectors_for_abc() {
        for (algo, want) in ABC {
            let got = digest_reader(*algo, Cursor::new(b"abc")).unwrap();
            assert_eq!(got.hex, *want, "{algo}");
            assert_eq!(got.bytes_read, 3);
            assert_eq!(got.hex.len(), algo.output_len() * 2);
        }
    }

    #[test]
    fn empty_input() {
        let got = digest_reader(Algorithm::Sha256, io::empty()).unwrap();
        assert_eq!(
            got.hex,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(got.bytes_read, 0);
    }

    #[test]
    fn short_and_interrupted_reads_give_same_digest() {
        let data: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
        for algo in Algorithm::ALL {
            let whole = digest_reader(algo, Cursor::new(&data)).unwrap();
            let chopped = digest_reader(
                algo,
                Choppy {
                    data: &data,
                    chunk: 7919,
                    interrupted: false,
                },
            )
            .unwrap();
            assert_eq!(whole, chopped);
            assert_eq!(whole.bytes_read, data.len() as u64);
        }
    }

    #[test]
    fn read_failure_is_reported() {
        let err = digest_reader(Algorithm::Sha512, Broken).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
    }

    #[test]
    fn file_digest_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.bin");
        std::fs::write(&path, b"the quick brown fox").unwrap();

        for algo in Algorithm::ALL {
            let first = digest_file(algo, &path).unwrap();
            let second = digest_file(algo, &path).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.bin");
        match digest_file(Algorithm::Sha256, &path) {
            Err(CheckError::Io { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), ErrorKind::NotFound);
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
