//! Three-letter team abbreviations shown on compact scoreboard themes.

/// Character used to pad abbreviations of names with fewer than three letters.
pub const FILLER: char = '-';
/// Exact length of every abbreviation.
pub const SHORT_CODE_LEN: usize = 3;

/// Derive an abbreviation from a team name.
///
/// The name is uppercased, common Latin diacritics are folded to ASCII, and
/// the first three `A-Z` letters are kept. Shorter results are padded with
/// [`FILLER`].
pub fn derive(name: &str) -> String {
    let mut code: String = name
        .trim()
        .chars()
        .flat_map(char::to_uppercase)
        .map(fold_diacritic)
        .filter(char::is_ascii_uppercase)
        .take(SHORT_CODE_LEN)
        .collect();

    while code.len() < SHORT_CODE_LEN {
        code.push(FILLER);
    }
    code
}

/// Normalize a user-supplied abbreviation, returning `None` when it is unusable.
///
/// Input is trimmed and uppercased; the result must be exactly three
/// characters drawn from `A-Z` or [`FILLER`].
pub fn sanitize(candidate: &str) -> Option<String> {
    let code = candidate.trim().to_uppercase();
    let valid = code.chars().count() == SHORT_CODE_LEN
        && code.chars().all(|c| c.is_ascii_uppercase() || c == FILLER);
    valid.then_some(code)
}

/// Keep `candidate` when valid, otherwise fall back to [`derive`] on `name`.
pub fn resolve(candidate: &str, name: &str) -> String {
    sanitize(candidate).unwrap_or_else(|| derive(name))
}

fn fold_diacritic(c: char) -> char {
    match c {
        'Á' | 'Ä' | 'Å' | 'Â' | 'À' | 'Ã' | 'Ą' => 'A',
        'Č' | 'Ć' | 'Ç' => 'C',
        'Ď' => 'D',
        'É' | 'Ě' | 'È' | 'Ë' | 'Ê' | 'Ę' => 'E',
        'Í' | 'Ì' | 'Ï' | 'Î' => 'I',
        'Ľ' | 'Ĺ' | 'Ł' => 'L',
        'Ň' | 'Ń' | 'Ñ' => 'N',
        'Ó' | 'Ö' | 'Ô' | 'Ò' | 'Õ' | 'Ő' => 'O',
        'Ř' | 'Ŕ' => 'R',
        'Š' | 'Ś' => 'S',
        'Ť' => 'T',
        'Ú' | 'Ů' | 'Ù' | 'Ü' | 'Û' | 'Ű' => 'U',
        'Ý' => 'Y',
        'Ž' | 'Ź' | 'Ż' => 'Z',
        other => other,
    }
}
