use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_PASSWORD_LEN: usize = 6;

/// ECMAScript whitespace and line terminators. Differs from regex's Unicode
/// `\s`: includes U+FEFF, excludes U+0085.
const JS_SPACE: &str = r"\t\n\x{0B}\x{0C}\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    let part = format!("[^{JS_SPACE}@]+");
    Regex::new(&format!(r"^{part}@{part}\.{part}$")).expect("valid regex")
});

/// Basic syntactic check: `local@domain.tld`, no whitespace, a single `@`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Length in UTF-16 code units, the unit browsers and JS clients count in.
pub fn password_len(password: &str) -> usize {
    password.encode_utf16().count()
}

pub fn meets_password_policy(password: &str) -> bool {
    password_len(password) >= MIN_PASSWORD_LEN
}
