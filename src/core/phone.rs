use regex::Regex;
use std::sync::LazyLock;

/// 國碼 (烏克蘭)
pub const COUNTRY_CODE: &str = "380";

/// 國碼 + 9 位國內號碼
const MAX_DIGITS: usize = 12;

/// 國碼之後的分組: +380 XX XXX XX XX
const GROUPS: [usize; 4] = [2, 3, 2, 2];

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+380[0-9]{9}$").expect("static phone pattern"));

/// 每次輸入時重新格式化電話號碼
///
/// 去掉所有非數字字元，補上國碼 (開頭的單一 `0` 會被換成 `380`)，再依
/// `+380 XX XXX XX XX` 分組。只輸出已經輸入的分組，超過 12 位的數字直接捨棄。
pub fn format_phone(raw: &str) -> String {
    let mut digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if !digits.starts_with(COUNTRY_CODE) {
        digits = match digits.strip_prefix('0') {
            Some(rest) => format!("{}{}", COUNTRY_CODE, rest),
            None => format!("{}{}", COUNTRY_CODE, digits),
        };
    }
    digits.truncate(MAX_DIGITS);

    let mut formatted = String::with_capacity(MAX_DIGITS + 1 + GROUPS.len());
    formatted.push('+');
    formatted.push_str(&digits[..COUNTRY_CODE.len()]);

    let mut start = COUNTRY_CODE.len();
    for size in GROUPS {
        if digits.len() <= start {
            break;
        }
        let end = (start + size).min(digits.len());
        formatted.push(' ');
        formatted.push_str(&digits[start..end]);
        start = end;
    }

    formatted
}

/// `+380` 加上剛好 9 位數字，空白先移除
pub fn is_valid_phone(phone: &str) -> bool {
    let clean: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_PATTERN.is_match(&clean)
}
