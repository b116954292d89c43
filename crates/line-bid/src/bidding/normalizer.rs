/// Strips invisible characters that survive copy/paste out of the crew portal.
/// Tabs are kept: a trailing tab still marks an empty column.
pub(crate) fn clean_line(value: &str) -> String {
    value
        .replace(['\u{feff}', '\u{200b}'], "")
        .replace('\u{a0}', " ")
        .trim_matches(|c: char| c.is_whitespace() && c != '\t')
        .to_string()
}

/// Lowercase, single-spaced form used for header and field-key matching.
pub(crate) fn normalize_key(value: &str) -> String {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

pub(crate) fn split_preferences(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Seniority numbers may be written `7`, `#7` or `7.`.
pub(crate) fn parse_seniority(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    trimmed.parse::<u32>().ok().filter(|position| *position > 0)
}

/// True for anything written like a seniority number, valid or not:
/// an optional sign or `#`, digits, an optional trailing `.`.
pub(crate) fn is_seniority_shaped(value: &str) -> bool {
    let trimmed = value.trim();
    let trimmed = trimmed
        .strip_prefix(['#', '+', '-'])
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
    !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit())
}

/// Removes a leading rank marker (`1.`, `2)`, `3:`, `#4`) from a preference entry.
pub(crate) fn strip_rank_prefix(entry: &str) -> &str {
    let entry = entry.trim();

    if let Some(rest) = entry.strip_prefix('#') {
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits > 0 {
            let remainder = rest[digits..].trim_start();
            if !remainder.is_empty() && rest[digits..].starts_with(char::is_whitespace) {
                return remainder;
            }
        }
        return entry;
    }

    let digits = entry.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return entry;
    }

    let rest = &entry[digits..];
    match rest.chars().next() {
        Some('.' | ')' | ':') => {
            let after = &rest[1..];
            if after.starts_with(char::is_whitespace) && !after.trim().is_empty() {
                after.trim_start()
            } else {
                entry
            }
        }
        _ => entry,
    }
}
