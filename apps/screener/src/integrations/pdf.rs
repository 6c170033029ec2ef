use anyhow::{anyhow, bail, Context, Result};
use bytes::Bytes;

/// File extensions the document source knows how to read.
pub fn is_supported(file_name: &str) -> bool {
    matches!(extension(file_name).as_deref(), Some("pdf" | "txt" | "md"))
}

fn extension(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// Extracts text from a stored document. PDF parsing runs on the blocking pool.
pub async fn extract_text(file_name: &str, bytes: Bytes) -> Result<String> {
    let raw = match extension(file_name).as_deref() {
        Some("pdf") => tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .context("PDF extraction task panicked")?
            .map_err(|e| anyhow!("PDF extraction failed for {file_name}: {e}"))?,
        Some("txt" | "md") => String::from_utf8(bytes.to_vec())
            .with_context(|| format!("{file_name} is not valid UTF-8"))?,
        _ => bail!("Unsupported document type: {file_name}"),
    };
    Ok(normalize_whitespace(&raw))
}

/// Collapses runs of spaces inside lines and keeps at most one blank line in a row.
pub fn normalize_whitespace(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in text.lines() {
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        let previous_blank = lines.last().map(|l| l.is_empty()).unwrap_or(true);
        if line.is_empty() && previous_blank {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}
