use thiserror::Error;

/// Errors caused by invalid caller input.
///
/// The display text is returned to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("File size must not exceed {}", format_limit(.max))]
    FileTooLarge { size: u64, max: u64 },

    #[error("Only image files can be uploaded")]
    UnsupportedContentType(Option<String>),
}

/// Largest whole unit that states the ceiling exactly: `20MB`, `1536KB`, `1000 bytes`
fn format_limit(max: &u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;

    match *max {
        0 => "0 bytes".to_string(),
        m if m % MB == 0 => format!("{}MB", m / MB),
        m if m % KB == 0 => format!("{}KB", m / KB),
        m => format!("{} bytes", m),
    }
}
