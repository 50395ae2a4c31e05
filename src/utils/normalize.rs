/// Strips everything that is not an ASCII digit. Used for both CPF and
/// CEP normalization ("01310-100" -> "01310100").
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Title-cases each word of a person name ("maria DAS dores" -> "Maria Das Dores").
pub fn title_case_name(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits a full name into (first, last) the way account records store it,
/// title-casing both parts.
pub fn split_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split_whitespace();
    let first = parts
        .next()
        .map(title_case_name)
        .unwrap_or_default();
    let last = title_case_name(&parts.collect::<Vec<_>>().join(" "));
    (first, last)
}
