/// Strip invisible characters and collapse runs of whitespace. Case is kept
/// because record keys compare case-sensitively.
pub(crate) fn clean_cell(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}', '\u{a0}'], " ");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
