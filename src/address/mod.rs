//! Rule-based extraction of district (구) and neighborhood (동) from free-text
//! Korean street addresses.
//!
//! Parsing never fails: anything the rules cannot place comes back as `None`.

use _model::Location;

mod overrides;

const DISTRICT: char = '구';
const CITY: char = '시';
const NEIGHBORHOOD: char = '동';
const ROAD: char = '로';
const BLOCK: char = '가';

pub fn parse(address: &str) -> Location {
    let mut address = address.to_string();
    for noise in overrides::NOISE {
        address = address.replace(noise, "");
    }

    if let Some((district, neighborhood)) = overrides::find(&address) {
        return Location::new(Some(district), Some(neighborhood));
    }

    let tokens: Vec<&str> = address.split_whitespace().collect();
    let district = tokens
        .iter()
        .find(|x| x.ends_with(DISTRICT))
        .map(|x| x.to_string());

    let neighborhood = parenthesized(&address)
        .or_else(|| tokens.iter().find_map(|x| leading_neighborhood(x)))
        .or_else(|| tokens.iter().find_map(|x| suffixed_area(x)))
        .and_then(|x| normalize(&x));

    Location {
        district,
        neighborhood,
    }
}

/// District token in the position street addresses put it, right after the
/// city.
pub fn district_hint(address: &str) -> Option<&str> {
    address
        .split_whitespace()
        .nth(1)
        .filter(|x| x.ends_with(DISTRICT))
}

/// Guess for an address the rules left unclassified.
pub fn suggest(address: &str) -> Option<&'static str> {
    overrides::HINTS
        .iter()
        .find(|(needle, _)| address.contains(needle))
        .map(|(_, hint)| *hint)
}

fn is_area(s: &str) -> bool {
    s.ends_with(NEIGHBORHOOD) || s.ends_with(ROAD) || s.ends_with(BLOCK)
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_numeric)
}

// "서울특별시" or "강동구" must never be read as a neighborhood
fn is_rejected(token: &str) -> bool {
    token.ends_with(DISTRICT) || token.ends_with(CITY) || is_numeric(token)
}

fn strip_punctuation(token: &str) -> String {
    token.chars().filter(|x| !matches!(x, '(' | ')' | ',')).collect()
}

/// "(역삼동, 강남파이낸스센터)" -> "역삼동"
fn parenthesized(address: &str) -> Option<String> {
    let mut rest = address;
    let content = loop {
        let open = rest.find('(')?;
        let after = &rest[open + 1..];
        let close = after.find(')')?;
        if close > 0 {
            break &after[..close];
        }
        rest = after;
    };

    let first = strip_punctuation(content.split(',').next().unwrap_or_default().trim());
    is_area(&first).then_some(first)
}

/// "월계동(104호)" -> "월계동"
fn leading_neighborhood(token: &str) -> Option<String> {
    let token = strip_punctuation(token);
    if is_rejected(&token) {
        return None;
    }

    let end = token.rfind(NEIGHBORHOOD)?;
    if end == 0 {
        return None;
    }
    let candidate = &token[..end + NEIGHBORHOOD.len_utf8()];
    (!is_numeric(candidate)).then(|| candidate.to_string())
}

fn suffixed_area(token: &str) -> Option<String> {
    let token = strip_punctuation(token);
    if is_rejected(&token) || token.chars().count() <= 1 || !is_area(&token) {
        return None;
    }
    Some(token)
}

/// "월계1동" -> "월계동", "충무로1가" -> "충무로"
fn normalize(raw: &str) -> Option<String> {
    let stripped: String = raw
        .chars()
        .filter(|x| !x.is_ascii_digit() && !matches!(x, '·' | '.'))
        .collect();
    let stripped = stripped.strip_suffix(BLOCK).unwrap_or(&stripped);
    (!stripped.is_empty()).then(|| stripped.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(address: &str) -> (Option<String>, Option<String>) {
        let location = parse(address);
        (location.district, location.neighborhood)
    }

    fn pair(district: &str, neighborhood: &str) -> (Option<String>, Option<String>) {
        (Some(district.to_string()), Some(neighborhood.to_string()))
    }

    #[test]
    fn manual_override() {
        assert_eq!(parsed("서울특별시 종로구 송월길 155"), pair("종로구", "교북동"));
        assert_eq!(
            parsed("서울특별시 용산구 한강대로23길 55 (한강로3가)"),
            pair("용산구", "한강로동")
        );
    }

    #[test]
    fn override_beats_heuristic() {
        // the heuristic alone would say 마포구 / 신사동
        assert_eq!(
            parsed("서울특별시 마포구 가로수길 59 (서교동)"),
            pair("강남구", "신사동")
        );
    }

    #[test]
    fn override_matches_address_substring() {
        // the needle spans two tokens
        assert_eq!(
            parsed("서울특별시 종로구 송월길 1550 (평동)"),
            pair("종로구", "교북동")
        );
        assert_eq!(
            parsed("서울특별시 종로구 송월길155 (평동)"),
            pair("종로구", "평동")
        );
    }

    #[test]
    fn numbered_neighborhood_collapses() {
        assert_eq!(parsed("서울특별시 노원구 월계1동 123-4"), pair("노원구", "월계동"));
    }

    #[test]
    fn parenthesized_neighborhood() {
        assert_eq!(
            parsed("서울특별시 강남구 테헤란로 152 (역삼동, 강남파이낸스센터)"),
            pair("강남구", "역삼동")
        );
        assert_eq!(
            parsed("서울특별시 중구 남대문로 84 (충무로1가)"),
            pair("중구", "충무로")
        );
    }

    #[test]
    fn parenthesized_extra_bracket_dropped() {
        assert_eq!(
            parsed("서울특별시 중구 을지로 30 ((소공동)"),
            pair("중구", "소공동")
        );
    }

    #[test]
    fn parenthesized_non_area_falls_back() {
        assert_eq!(
            parsed("서울특별시 마포구 월드컵북로 400 (B1층)"),
            pair("마포구", "월드컵북로")
        );
    }

    #[test]
    fn district_not_taken_as_neighborhood() {
        assert_eq!(
            parsed("서울특별시 강동구 올림픽로 664"),
            pair("강동구", "올림픽로")
        );
    }

    #[test]
    fn neighborhood_pass_runs_before_road_pass() {
        assert_eq!(
            parsed("서울특별시 중구 세종대로 100 명동빌딩"),
            pair("중구", "명동")
        );
    }

    #[test]
    fn trailing_unit_stripped() {
        assert_eq!(
            parsed("서울특별시 노원구 월계동(104호) 12"),
            pair("노원구", "월계동")
        );
    }

    #[test]
    fn phone_number_ignored() {
        assert_eq!(
            parsed("서울특별시 서초구 1522-3232 서초동 1"),
            pair("서초구", "서초동")
        );
    }

    #[test]
    fn unclassified() {
        assert_eq!(parse(""), Location::default());
        assert_eq!(parse("서울특별시 123"), Location::default());

        let location = parse("서울특별시 강남구 123 1가");
        assert_eq!(location.district.as_deref(), Some("강남구"));
        assert_eq!(location.neighborhood, None);
    }

    #[test]
    fn district_is_first_gu_token() {
        let location = parse("서울특별시 영등포구 여의대로 108 파크원 구");
        assert_eq!(location.district.as_deref(), Some("영등포구"));
    }

    #[test]
    fn idempotent() {
        for address in [
            "서울특별시 종로구 송월길 155",
            "서울특별시 노원구 월계1동 123-4",
            "서울특별시 강남구 테헤란로 152 (역삼동, 강남파이낸스센터)",
            "경기도 성남시 분당구",
        ] {
            assert_eq!(parse(address), parse(address));
        }
    }

    #[test]
    fn hint_for_district() {
        assert_eq!(district_hint("서울특별시 노원구 월계1동"), Some("노원구"));
        assert_eq!(district_hint("서울특별시 세종대로 172"), None);
        assert_eq!(district_hint("서울"), None);
    }

    #[test]
    fn suggestions() {
        assert_eq!(suggest("서울특별시 중구 명동길 14"), Some("명동"));
        assert_eq!(suggest("서울특별시 중구 세종대로 19"), Some("세종로"));
        assert_eq!(suggest("서울특별시 강남구 테헤란로 1"), None);
    }
}
