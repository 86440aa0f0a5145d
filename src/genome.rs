//! Genome loading.
//!
//! A [`Genome`] is an immutable byte sequence loaded once per run. K-mers
//! counted from it are zero-copy [`Bytes`] slices of the shared buffer.
//!
//! Gzip input is recognised by a `.gz` extension or the gzip magic bytes. It
//! is decompressed with the `gzip` feature and rejected without it.

use std::{fmt::Debug, fs, path::Path};

use bio::io::fasta;
use bytes::{Bytes, BytesMut};

use crate::{error::OriError, format::GenomeFormat};

#[cfg(feature = "tracing")]
use tracing::{debug, info};

/// An immutable genome sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Genome {
    seq: Bytes,
}

impl Genome {
    /// Loads a genome from a file.
    ///
    /// Raw text is trimmed of surrounding whitespace and otherwise used as-is.
    /// FASTA records are concatenated in file order. With the `gzip` feature,
    /// paths ending in `.gz` are decompressed first.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use orifinder::format::GenomeFormat;
    /// use orifinder::genome::Genome;
    ///
    /// let genome = Genome::from_path("E_coli.txt", GenomeFormat::Auto)?;
    /// println!("{} bp", genome.len());
    /// # Ok::<(), orifinder::error::OriError>(())
    /// ```
    pub fn from_path<P>(path: P, format: GenomeFormat) -> Result<Self, OriError>
    where
        P: AsRef<Path> + Debug,
    {
        let path_ref = path.as_ref();
        let content = read_file(path_ref)?;
        let resolved = format.resolve(Some(path_ref), &content);

        #[cfg(feature = "tracing")]
        debug!(path = ?path_ref, format = %resolved, bytes = content.len(), "Read genome file");

        let genome = match resolved {
            GenomeFormat::Fasta => Self::parse_fasta(&content, path_ref)?,
            GenomeFormat::Raw | GenomeFormat::Auto => Self::from_bytes(Bytes::from(content)),
        };

        #[cfg(feature = "tracing")]
        info!(length = genome.len(), "Loaded genome");

        Ok(genome)
    }

    /// Builds a genome from raw text, trimming surrounding whitespace.
    ///
    /// ```
    /// use orifinder::genome::Genome;
    ///
    /// let genome = Genome::from_text("ATATAT\n");
    /// assert_eq!(genome.as_bytes(), b"ATATAT");
    /// ```
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            seq: Bytes::copy_from_slice(text.trim().as_bytes()),
        }
    }

    /// Builds a genome from raw bytes, trimming surrounding ASCII whitespace.
    #[must_use]
    pub fn from_bytes(bytes: Bytes) -> Self {
        let start = bytes
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(bytes.len());
        let end = bytes
            .iter()
            .rposition(|b| !b.is_ascii_whitespace())
            .map_or(start, |i| i + 1);
        Self {
            seq: bytes.slice(start..end),
        }
    }

    fn parse_fasta(content: &[u8], path: &Path) -> Result<Self, OriError> {
        let mut seq = BytesMut::new();
        for record in fasta::Reader::new(content).records() {
            let record = record.map_err(|e| OriError::GenomeParse {
                details: e.to_string(),
                path: path.to_path_buf(),
            })?;
            seq.extend_from_slice(record.seq());
        }
        Ok(Self { seq: seq.freeze() })
    }

    /// Number of bases.
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.seq
    }

    /// The underlying shared buffer.
    pub const fn bytes(&self) -> &Bytes {
        &self.seq
    }
}

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

fn is_gzip(path: &Path, content: &[u8]) -> bool {
    content.starts_with(&GZIP_MAGIC)
        || path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

fn read_file(path: &Path) -> Result<Vec<u8>, OriError> {
    let content = fs::read(path).map_err(|source| OriError::GenomeRead {
        source,
        path: path.to_path_buf(),
    })?;

    if is_gzip(path, &content) {
        decompress(path, &content)
    } else {
        Ok(content)
    }
}

#[cfg(not(feature = "gzip"))]
fn decompress(path: &Path, _content: &[u8]) -> Result<Vec<u8>, OriError> {
    Err(OriError::GzipUnsupported {
        path: path.to_path_buf(),
    })
}

#[cfg(feature = "gzip")]
fn decompress(path: &Path, content: &[u8]) -> Result<Vec<u8>, OriError> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoded = Vec::new();
    GzDecoder::new(content)
        .read_to_end(&mut decoded)
        .map_err(|source| OriError::GenomeRead {
            source,
            path: path.to_path_buf(),
        })?;

    #[cfg(feature = "tracing")]
    debug!(compressed = content.len(), decoded = decoded.len(), "Decompressed gzip genome");

    Ok(decoded)
}
