use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub mod html;
pub mod json;
pub mod svg;
pub mod text;

pub fn format_f64_4(v: f64) -> String {
    format!("{:.4}", v)
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// A fully written and synced temporary sibling of `path`, renamed into place
/// by `commit` so readers never observe a partially written report. Dropping
/// it without committing removes the temporary file.
#[derive(Debug)]
pub struct StagedFile {
    tmp: PathBuf,
    path: PathBuf,
}

impl StagedFile {
    pub fn stage(path: &Path, contents: &str) -> std::io::Result<Self> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;
        let file_name = path.file_name().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} has no file name", path.display()),
            )
        })?;
        let staged = StagedFile {
            tmp: parent.join(format!(
                ".{}.{}.tmp",
                file_name.to_string_lossy(),
                std::process::id()
            )),
            path: path.to_path_buf(),
        };
        write_synced(&staged.tmp, contents)?;
        Ok(staged)
    }

    pub fn commit(self) -> std::io::Result<()> {
        fs::rename(&self.tmp, &self.path)
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        // Already renamed after a successful commit.
        let _ = fs::remove_file(&self.tmp);
    }
}

fn write_synced(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()?;
    w.get_ref().sync_all()
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
