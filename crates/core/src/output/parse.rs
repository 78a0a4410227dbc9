use crate::error::{Error, Result};

/// One `name`/`value` pair from a workflow output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    pub name: String,
    pub value: String,
}

/// Parse the contents of a workflow output file into records, in file order.
///
/// A line is a heredoc header when its first `<<` comes before any `=`, so
/// `a=b<<c` stays a single-line record. Lines end at `\n` only; a `\r`
/// belongs to the value it was written with.
pub fn parse_records(text: &str) -> Result<Vec<OutputRecord>> {
    let mut records = Vec::new();
    let body = text.strip_suffix('\n').unwrap_or(text);
    if body.is_empty() {
        return Ok(records);
    }
    let mut lines = body.split('\n').enumerate();

    while let Some((index, line)) = lines.next() {
        if line.is_empty() {
            continue;
        }

        if let Some((name, delimiter)) = split_heredoc_header(line) {
            let mut value_lines = Vec::new();
            let mut terminated = false;
            for (_, value_line) in lines.by_ref() {
                if value_line == delimiter {
                    terminated = true;
                    break;
                }
                value_lines.push(value_line);
            }
            if !terminated {
                return Err(Error::Parse(format!(
                    "line {}: '{name}' is missing its closing delimiter '{delimiter}'",
                    index + 1
                )));
            }
            records.push(OutputRecord {
                name: name.to_string(),
                value: value_lines.join("\n"),
            });
        } else if let Some((name, value)) = line.split_once('=') {
            records.push(OutputRecord {
                name: name.to_string(),
                value: value.to_string(),
            });
        } else {
            return Err(Error::Parse(format!(
                "line {}: expected 'name=value' or 'name<<DELIMITER', got '{line}'",
                index + 1
            )));
        }
    }

    Ok(records)
}

fn split_heredoc_header(line: &str) -> Option<(&str, &str)> {
    let marker = line.find("<<")?;
    match line.find('=') {
        Some(equals) if equals < marker => None,
        _ => Some((&line[..marker], &line[marker + 2..])),
    }
}
