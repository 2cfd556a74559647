use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::input::InputError;

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path).map_err(|e| InputError::io(path, e))?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Ground truth: one header row, then one 0/1 value per line.
pub fn read_labels(path: &Path) -> Result<Vec<u8>, InputError> {
    let values = read_single_column(path, 1)?;
    let mut labels = Vec::with_capacity(values.len());
    for (line, value) in values {
        let label = if value == 0.0 {
            0
        } else if value == 1.0 {
            1
        } else {
            return Err(InputError::InvalidLabel {
                path: path.to_path_buf(),
                line,
                value,
            });
        };
        labels.push(label);
    }
    Ok(labels)
}

/// Submitted membership scores: no header, one value in [0, 1] per line.
pub fn read_predictions(path: &Path) -> Result<Vec<f64>, InputError> {
    let values = read_single_column(path, 0)?;
    if let Some(&(line, value)) = values.iter().find(|(_, v)| !(0.0..=1.0).contains(v)) {
        return Err(InputError::RangeViolation {
            context: path.display().to_string(),
            line,
            value,
        });
    }
    Ok(values.into_iter().map(|(_, value)| value).collect())
}

/// Parses a one-column numeric table. Fields may be separated by commas or
/// whitespace, blank lines and `#` comments are skipped. Returns
/// `(line_number, value)` pairs with 1-based line numbers.
pub fn read_single_column(path: &Path, skip_rows: usize) -> Result<Vec<(usize, f64)>, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();
    let mut out = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let read = reader
            .read_line(&mut buf)
            .map_err(|e| InputError::io(path, e))?;
        if read == 0 {
            break;
        }
        line_no += 1;
        if line_no <= skip_rows {
            continue;
        }
        let line = buf.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty());
        let field = fields.next().ok_or_else(|| InputError::Parse {
            path: path.to_path_buf(),
            msg: format!("line {} has no value", line_no),
        })?;
        if fields.next().is_some() {
            return Err(InputError::Parse {
                path: path.to_path_buf(),
                msg: format!("line {} has more than one column", line_no),
            });
        }
        let value = field.parse::<f64>().map_err(|_| InputError::Parse {
            path: path.to_path_buf(),
            msg: format!("line {}: {:?} is not a number", line_no, field),
        })?;
        out.push((line_no, value));
    }

    Ok(out)
}
