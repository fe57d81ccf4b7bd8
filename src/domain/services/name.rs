/// Uppercases a full name without regard to locale.
///
/// Character by character: a character whose uppercase form is more than
/// one character (`ß`, `ŉ`) is left as it is, so the name never grows.
pub fn normalize_name(name: &str) -> String {
    name.chars().map(upper_one).collect()
}

fn upper_one(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}
