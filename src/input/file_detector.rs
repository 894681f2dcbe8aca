//! File type detection

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    /// Guess the format from the leading bytes. Only PDF has a reliable signature.
    pub fn sniff(bytes: &[u8]) -> Self {
        let start = bytes
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(bytes.len());

        if bytes[start..].starts_with(PDF_MAGIC) {
            FileType::Pdf
        } else {
            FileType::Unknown
        }
    }

    /// Detect from a file name, falling back to the content signature.
    pub fn detect(file_name: Option<&str>, bytes: &[u8]) -> Self {
        let by_name = file_name
            .and_then(|name| std::path::Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown);

        match by_name {
            FileType::Unknown => Self::sniff(bytes),
            known => known,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(FileType::from_extension("PDF"), FileType::Pdf);
        assert_eq!(FileType::from_extension("txt"), FileType::Text);
        assert_eq!(FileType::from_extension("markdown"), FileType::Markdown);
        assert_eq!(FileType::from_extension("docx"), FileType::Unknown);
    }

    #[test]
    fn test_sniff_pdf_header() {
        assert_eq!(FileType::sniff(b"%PDF-1.7\n..."), FileType::Pdf);
        assert_eq!(FileType::sniff(b"\r\n%PDF-1.4"), FileType::Pdf);
        assert_eq!(FileType::sniff(b"plain words"), FileType::Unknown);
        assert_eq!(FileType::sniff(b""), FileType::Unknown);
    }

    #[test]
    fn test_detect_prefers_extension() {
        assert_eq!(FileType::detect(Some("resume.md"), b"%PDF-1.4"), FileType::Markdown);
        assert_eq!(FileType::detect(Some("upload"), b"%PDF-1.4"), FileType::Pdf);
        assert_eq!(FileType::detect(None, b"hello"), FileType::Unknown);
    }
}
