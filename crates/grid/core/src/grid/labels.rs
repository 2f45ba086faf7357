/// Spreadsheet-style label for a row or column index: `0 → A`, `25 → Z`,
/// `26 → AA`. Negative indices mirror the positive ones, so `-1 → -A`.
pub fn alpha_label(index: i32) -> String {
    let negative = index < 0;
    // shift so -1 maps onto A rather than B
    let mut value = if negative {
        index.unsigned_abs() - 1
    } else {
        index.unsigned_abs()
    };

    let mut letters = Vec::new();
    while value >= 26 {
        letters.push(b'A' + (value % 26) as u8);
        value = value / 26 - 1;
    }
    letters.push(b'A' + value as u8);

    let mut label = String::with_capacity(letters.len() + 1);
    if negative {
        label.push('-');
    }
    label.extend(letters.iter().rev().map(|&b| b as char));
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(alpha_label(0), "A");
        assert_eq!(alpha_label(25), "Z");
        assert_eq!(alpha_label(26), "AA");
        assert_eq!(alpha_label(27), "AB");
        assert_eq!(alpha_label(701), "ZZ");
        assert_eq!(alpha_label(702), "AAA");
        assert_eq!(alpha_label(-1), "-A");
        assert_eq!(alpha_label(-27), "-AA");
    }
}
