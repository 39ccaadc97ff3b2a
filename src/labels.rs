//! YOLO label file handling
//!
//! A label file holds one object per line: `<class> <x_center> <y_center> <width> <height>`
//! (or a polygon after the class id). Only the class token is ever touched here.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Outcome of rewriting one label file
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LabelRewrite {
    pub lines: usize,
    pub relabeled: usize,
}

/// Replace the class token of a label line.
///
/// Lines without any token, or any line when `target_class` is `None`, are returned
/// untouched together with their original line terminator. Relabeled lines are
/// re-joined with single spaces and always end with `\n`.
pub fn relabel_line(line: &str, target_class: Option<u32>) -> Cow<'_, str> {
    let Some(target_class) = target_class else {
        return Cow::Borrowed(line);
    };

    let mut tokens = line.split_whitespace();
    if tokens.next().is_none() {
        return Cow::Borrowed(line);
    }

    let mut relabeled = target_class.to_string();
    for token in tokens {
        relabeled.push(' ');
        relabeled.push_str(token);
    }
    relabeled.push('\n');
    Cow::Owned(relabeled)
}

/// Copy a label file from `src` to `dst`, overriding the class of every object
/// with `target_class` when one is given.
///
/// Without a target class the file is copied byte for byte. With one, `\n`, `\r\n`
/// and a bare `\r` all end a line and every output line ends with `\n`.
pub fn rewrite_label_file(
    src: &Path,
    dst: &Path,
    target_class: Option<u32>,
) -> std::io::Result<LabelRewrite> {
    let content = fs::read_to_string(src)?;
    let mut writer = BufWriter::new(File::create(dst)?);
    let mut outcome = LabelRewrite::default();

    if target_class.is_none() {
        writer.write_all(content.as_bytes())?;
        outcome.lines = split_lines(&content).count();
    } else {
        for (line, terminated) in split_lines(&content) {
            match relabel_line(line, target_class) {
                Cow::Owned(relabeled) => {
                    writer.write_all(relabeled.as_bytes())?;
                    outcome.relabeled += 1;
                }
                Cow::Borrowed(blank) => {
                    writer.write_all(blank.as_bytes())?;
                    if terminated {
                        writer.write_all(b"\n")?;
                    }
                }
            }
            outcome.lines += 1;
        }
    }

    writer.flush()?;
    Ok(outcome)
}

/// Split on `\n`, `\r\n` and `\r`, yielding each line without its terminator and
/// whether it had one
fn split_lines(content: &str) -> impl Iterator<Item = (&str, bool)> {
    let mut rest = content;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(['\r', '\n']) {
            Some(end) => {
                let line = &rest[..end];
                let skip = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + skip..];
                Some((line, true))
            }
            None => {
                let line = rest;
                rest = "";
                Some((line, false))
            }
        }
    })
}

/// Class token of every non-empty line of a label file
pub fn class_ids(content: &str) -> impl Iterator<Item = &str> {
    split_lines(content).filter_map(|(line, _)| line.split_whitespace().next())
}
