//! Spreadsheet-style column names and cell references.
//!
//! Columns use bijective base-26 letters: 0 is `A`, 25 is `Z`, 26 is `AA`,
//! 701 is `ZZ` and 702 is `AAA`.

/// Convert a 0-based column index to its letter name.
pub fn excel_column_name(col: usize) -> String {
    let mut letters = Vec::new();
    let mut n = Some(col);
    while let Some(value) = n {
        // value % 26 < 26, the narrowing is lossless
        #[allow(clippy::cast_possible_truncation)]
        let offset = (value % 26) as u8;
        letters.push(char::from(b'A' + offset));
        n = (value / 26).checked_sub(1);
    }
    letters.iter().rev().collect()
}

/// Parse a column name like `"AB"` back into its 0-based index.
///
/// Accepts lowercase letters. Returns `None` for empty input, non-letters, or
/// names that overflow `usize`.
pub fn column_index(name: &str) -> Option<usize> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let mut col: usize = 0;
    for ch in name.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = u32::from(ch.to_ascii_uppercase()) - u32::from('A') + 1;
        col = col
            .checked_mul(26)?
            .checked_add(usize::try_from(digit).ok()?)?;
    }
    Some(col - 1)
}

/// Format a 0-based `(row, col)` pair as a cell reference like `"B3"`.
pub fn cell_ref(row: usize, col: usize) -> String {
    format!("{}{}", excel_column_name(col), row + 1)
}

/// Parse a cell reference like `"B3"` into a 0-based `(row, col)` pair.
pub fn parse_cell_ref(cell_ref: &str) -> Option<(usize, usize)> {
    let trimmed = cell_ref.trim();
    let split = trimmed.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = trimmed.split_at(split);
    let col = column_index(letters)?;
    let row: usize = digits.parse().ok()?;
    Some((row.checked_sub(1)?, col))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, "A")]
    #[test_case(1, "B")]
    #[test_case(25, "Z")]
    #[test_case(26, "AA")]
    #[test_case(27, "AB")]
    #[test_case(51, "AZ")]
    #[test_case(52, "BA")]
    #[test_case(701, "ZZ")]
    #[test_case(702, "AAA")]
    #[test_case(16383, "XFD")]
    fn column_names(index: usize, expected: &str) {
        assert_eq!(excel_column_name(index), expected);
        assert_eq!(column_index(expected), Some(index));
    }

    #[test]
    fn column_index_rejects_garbage() {
        assert_eq!(column_index(""), None);
        assert_eq!(column_index("A1"), None);
        assert_eq!(column_index("ab"), Some(27));
    }

    #[test]
    fn cell_refs() {
        assert_eq!(cell_ref(0, 0), "A1");
        assert_eq!(cell_ref(9, 27), "AB10");
        assert_eq!(parse_cell_ref("AB10"), Some((9, 27)));
        assert_eq!(parse_cell_ref("A0"), None);
        assert_eq!(parse_cell_ref("12"), None);
    }
}
