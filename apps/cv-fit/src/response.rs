//! Line-oriented parsing of `Label: value` model output.
//!
//! Models decorate labels in small ways (`**Name:**`, `- Name:`, `1. Name:`), so matching is
//! case-insensitive and ignores list markers and markdown emphasis. A value may continue on the
//! following lines until the next recognised label.

use std::collections::HashMap;

/// Collects the value of every label in `labels` found in `text`.
/// The first occurrence of a label wins; absent labels are missing from the map.
pub fn parse_labeled(text: &str, labels: &[&'static str]) -> HashMap<&'static str, String> {
    let mut fields: HashMap<&'static str, String> = HashMap::new();
    let mut current: Option<&'static str> = None;

    for line in text.lines() {
        let line = clean_line(line);
        if line.is_empty() {
            continue;
        }

        if let Some((label, value)) = split_label(line, labels) {
            if fields.contains_key(label) {
                current = None;
                continue;
            }
            fields.insert(label, value.to_string());
            current = Some(label);
        } else if let Some(label) = current {
            if let Some(existing) = fields.get_mut(label) {
                if !existing.is_empty() {
                    existing.push(' ');
                }
                existing.push_str(line);
            }
        }
    }

    fields
}

/// Strips surrounding whitespace and a leading list marker.
fn clean_line(line: &str) -> &str {
    let line = line.trim().trim_start_matches(['-', '•', '*']).trim_start();
    let digits = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if digits.len() < line.len() {
        let marker = digits.strip_prefix('.').or_else(|| digits.strip_prefix(')'));
        if let Some(rest) = marker.filter(|r| r.is_empty() || r.starts_with(char::is_whitespace)) {
            return rest.trim();
        }
    }
    line.trim_end()
}

fn split_label<'a>(line: &'a str, labels: &[&'static str]) -> Option<(&'static str, &'a str)> {
    let (head, tail) = line.split_once(':')?;
    let head = head.trim().trim_matches('*').trim();
    labels
        .iter()
        .find(|label| label.eq_ignore_ascii_case(head))
        .map(|label| (*label, tail.trim().trim_matches('*').trim()))
}
