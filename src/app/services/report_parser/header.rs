//! Header cell normalization
//!
//! Raw header cells are spelled many ways across exporters ("Öğrenci No",
//! "OGRENCI_NO", "öğr. no"). Each cell is folded into a lowercase ASCII token
//! before it is matched against the header vocabulary.

/// Fold a character to its lowercase ASCII base letter
///
/// Turkish letters lose their diacritics; both the dotted and dotless I
/// forms fold to plain `i`. Returns `None` for marks that should vanish
/// entirely (the combining dot produced by lowercasing `İ` generically).
fn fold_char(c: char) -> Option<char> {
    let folded = match c {
        'Ç' | 'ç' => 'c',
        'Ğ' | 'ğ' => 'g',
        'I' | 'ı' | 'İ' | 'i' | 'Î' | 'î' => 'i',
        'Ö' | 'ö' => 'o',
        'Ş' | 'ş' => 's',
        'Ü' | 'ü' | 'Û' | 'û' => 'u',
        'Â' | 'â' => 'a',
        '\u{0307}' => return None,
        other => other.to_lowercase().next().unwrap_or(other),
    };
    Some(folded)
}

/// Normalize a raw header cell into a vocabulary token
///
/// Letters are lowercased and folded, any run of characters that are not
/// ASCII letters or digits collapses to a single underscore, and leading or
/// trailing underscores are trimmed.
pub fn normalize_header(raw: &str) -> String {
    let mut token = String::with_capacity(raw.len());
    let mut pending_separator = false;

    for c in raw.chars().filter_map(fold_char) {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !token.is_empty() {
                token.push('_');
            }
            pending_separator = false;
            token.push(c);
        } else {
            pending_separator = true;
        }
    }

    token
}

/// Normalize every cell of a header row, preserving column order
pub fn normalize_headers(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| normalize_header(cell)).collect()
}
