//! Genome file format detection and selection.
//!
//! A genome can be supplied as a single unbroken line of bases (raw text) or
//! as FASTA. When the format is `Auto`, the extension decides and the file
//! content is sniffed as a fallback.

use clap::ValueEnum;
use std::ffi::OsStr;
use std::path::Path;

/// Genome file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GenomeFormat {
    /// Detect from the file extension, then from the content.
    ///
    /// Detection rules:
    /// - `.fa`, `.fasta`, `.fna` (optionally `.gz`) -> FASTA
    /// - `.txt`, `.seq` (optionally `.gz`) -> raw
    /// - anything else -> FASTA if the first non-whitespace byte is `>`, raw otherwise
    #[default]
    Auto,
    /// A single unbroken sequence of bases, surrounding whitespace trimmed.
    Raw,
    /// FASTA; all records are concatenated in file order.
    Fasta,
}

impl GenomeFormat {
    /// Detects the genome format from a file path's extension.
    ///
    /// Handles gzip-compressed files by stripping the `.gz` extension first.
    /// Returns `Auto` when the extension does not decide.
    ///
    /// # Examples
    ///
    /// ```
    /// use orifinder::format::GenomeFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(GenomeFormat::from_extension(Path::new("ecoli.fa")), GenomeFormat::Fasta);
    /// assert_eq!(GenomeFormat::from_extension(Path::new("ecoli.txt.gz")), GenomeFormat::Raw);
    /// assert_eq!(GenomeFormat::from_extension(Path::new("ecoli")), GenomeFormat::Auto);
    /// ```
    #[must_use]
    pub fn from_extension(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase);

        let effective_ext = match ext.as_deref() {
            Some("gz") => path
                .file_stem()
                .and_then(|stem| Path::new(stem).extension())
                .and_then(OsStr::to_str)
                .map(str::to_lowercase),
            other => other.map(String::from),
        };

        match effective_ext.as_deref() {
            Some("fa" | "fasta" | "fna") => Self::Fasta,
            Some("txt" | "seq") => Self::Raw,
            _ => Self::Auto,
        }
    }

    /// Detects the genome format from file content.
    ///
    /// ```
    /// use orifinder::format::GenomeFormat;
    ///
    /// assert_eq!(GenomeFormat::sniff(b"\n>chr\nACGT"), GenomeFormat::Fasta);
    /// assert_eq!(GenomeFormat::sniff(b"ACGT\n"), GenomeFormat::Raw);
    /// ```
    #[must_use]
    pub fn sniff(content: &[u8]) -> Self {
        match content.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'>') => Self::Fasta,
            _ => Self::Raw,
        }
    }

    /// Resolves `Auto` to a concrete format.
    ///
    /// Explicit formats are returned unchanged. `Auto` is resolved from the
    /// path when one is given, then from the content.
    #[must_use]
    pub fn resolve(self, path: Option<&Path>, content: &[u8]) -> Self {
        match self {
            Self::Auto => match path.map_or(Self::Auto, Self::from_extension) {
                Self::Auto => Self::sniff(content),
                detected => detected,
            },
            other => other,
        }
    }
}

impl std::fmt::Display for GenomeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Raw => write!(f, "raw"),
            Self::Fasta => write!(f, "fasta"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_extension_fasta() {
        for name in ["g.fa", "g.fasta", "g.fna", "g.FA", "g.fasta.gz"] {
            assert_eq!(
                GenomeFormat::from_extension(Path::new(name)),
                GenomeFormat::Fasta,
                "{name}"
            );
        }
    }

    #[test]
    fn from_extension_raw() {
        assert_eq!(
            GenomeFormat::from_extension(Path::new("E_coli.txt")),
            GenomeFormat::Raw
        );
        assert_eq!(
            GenomeFormat::from_extension(Path::new("E_coli.seq.gz")),
            GenomeFormat::Raw
        );
    }

    #[test]
    fn from_extension_unknown_is_auto() {
        assert_eq!(
            GenomeFormat::from_extension(Path::new("genome")),
            GenomeFormat::Auto
        );
        assert_eq!(
            GenomeFormat::from_extension(Path::new("genome.dat")),
            GenomeFormat::Auto
        );
    }

    #[test]
    fn sniff_skips_leading_whitespace() {
        assert_eq!(GenomeFormat::sniff(b"  \n>seq\nAC"), GenomeFormat::Fasta);
        assert_eq!(GenomeFormat::sniff(b""), GenomeFormat::Raw);
    }

    #[test]
    fn resolve_prefers_extension_over_content() {
        let format = GenomeFormat::Auto.resolve(Some(Path::new("g.txt")), b">looks like fasta");
        assert_eq!(format, GenomeFormat::Raw);
    }

    #[test]
    fn resolve_falls_back_to_content() {
        let format = GenomeFormat::Auto.resolve(Some(Path::new("genome")), b">seq\nACGT");
        assert_eq!(format, GenomeFormat::Fasta);
        assert_eq!(GenomeFormat::Auto.resolve(None, b"ACGT"), GenomeFormat::Raw);
    }

    #[test]
    fn resolve_explicit_format_unchanged() {
        assert_eq!(
            GenomeFormat::Raw.resolve(Some(Path::new("g.fa")), b">seq"),
            GenomeFormat::Raw
        );
    }

    #[test]
    fn display() {
        assert_eq!(GenomeFormat::Auto.to_string(), "auto");
        assert_eq!(GenomeFormat::Raw.to_string(), "raw");
        assert_eq!(GenomeFormat::Fasta.to_string(), "fasta");
    }
}
