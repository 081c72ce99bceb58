//! Company name to ticker symbol resolution
//!
//! Covers the names users actually type: US tickers by English or Korean
//! company name, Korean listings by name or six-digit code. Unknown input
//! falls through as an uppercased ticker so direct symbol entry keeps
//! working.

/// Known company names mapped to market symbols.
/// Korean listings use the six-digit code with a `.KS` suffix.
const TICKER_MAP: &[(&str, &str)] = &[
    // US listings, English and Korean spellings
    ("amazon", "AMZN"),
    ("아마존", "AMZN"),
    ("apple", "AAPL"),
    ("애플", "AAPL"),
    ("tesla", "TSLA"),
    ("테슬라", "TSLA"),
    ("google", "GOOGL"),
    ("구글", "GOOGL"),
    ("microsoft", "MSFT"),
    ("마이크로소프트", "MSFT"),
    ("meta", "META"),
    ("메타", "META"),
    ("nvidia", "NVDA"),
    ("엔비디아", "NVDA"),
    // Korean listings
    ("삼성전자", "005930.KS"),
    ("sk하이닉스", "000660.KS"),
    ("SK하이닉스", "000660.KS"),
    ("하이닉스", "000660.KS"),
    ("네이버", "035420.KS"),
    ("카카오", "035720.KS"),
    ("현대차", "005380.KS"),
    ("현대자동차", "005380.KS"),
    ("lg전자", "066570.KS"),
    ("LG전자", "066570.KS"),
    ("포스코", "005490.KS"),
];

/// Local company names mapped to the English names news services index
const SEARCH_NAME_MAP: &[(&str, &str)] = &[
    ("삼성전자", "Samsung Electronics"),
    ("sk하이닉스", "SK Hynix"),
    ("SK하이닉스", "SK Hynix"),
    ("하이닉스", "SK Hynix"),
    ("네이버", "Naver"),
    ("카카오", "Kakao"),
    ("현대차", "Hyundai Motor"),
    ("현대자동차", "Hyundai Motor"),
    ("lg전자", "LG Electronics"),
    ("LG전자", "LG Electronics"),
    ("포스코", "POSCO"),
    ("아마존", "Amazon"),
    ("애플", "Apple"),
    ("테슬라", "Tesla"),
    ("구글", "Google"),
    ("마이크로소프트", "Microsoft"),
    ("메타", "Meta"),
    ("엔비디아", "Nvidia"),
];

/// Resolve a company name to a ticker symbol.
///
/// Whitespace is stripped before lookup ("SK 하이닉스" and "SK하이닉스"
/// resolve alike) and ASCII names are matched case-insensitively. A
/// six-digit numeric input is treated as a Korean listing code; anything
/// else passes through uppercased as a literal ticker.
pub fn resolve_ticker(company_name: &str) -> String {
    let cleaned: String = company_name.split_whitespace().collect();
    let key = if cleaned.is_ascii() {
        cleaned.to_lowercase()
    } else {
        cleaned.clone()
    };

    if let Some(&(_, ticker)) = TICKER_MAP.iter().find(|&&(name, _)| name == key) {
        return ticker.to_string();
    }

    if cleaned.len() == 6 && cleaned.chars().all(|c| c.is_ascii_digit()) {
        return format!("{cleaned}.KS");
    }

    cleaned.to_uppercase()
}

/// English search name for a company, for building news queries.
/// Unknown names pass through unchanged.
pub fn news_search_name(company_name: &str) -> String {
    let cleaned: String = company_name.split_whitespace().collect();
    SEARCH_NAME_MAP
        .iter()
        .find(|&&(name, _)| name == cleaned)
        .map_or_else(|| company_name.to_string(), |&(_, english)| english.to_string())
}
