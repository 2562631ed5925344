/// Spreadsheet-style label for the `index`-th part: A..Z, AA..AZ, BA, ...
#[must_use]
pub fn part_label(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'A' + u8::try_from(n % 26).unwrap_or_default()));
        n /= 26;
    }
    letters.iter().rev().collect()
}
