/// Grouping key for orders whose address cannot be parsed.
pub const REGION_OTHER: &str = "기타";

/// Metropolitan-level cities collapsed to their short names.
const METRO_CITIES: [&str; 9] = [
    "서울", "부산", "대구", "인천", "광주", "대전", "울산", "세종", "제주",
];

/// Provinces collapsed to their short names (경기도 -> 경기 etc.).
const PROVINCES: [&str; 8] = [
    "경기", "강원", "충북", "충남", "전북", "전남", "경북", "경남",
];

/// Collapses a free-text Korean postal address into a `city district`
/// grouping key.
///
/// The first whitespace token is the top-level administrative unit, the
/// second (when present) the sub-unit. A metro-city sub-unit lacking a
/// 구/군 suffix gets 구 appended naively; irregular second tokens can be
/// misclassified, so this is a best-effort grouping key, not a gazetteer
/// lookup.
pub fn normalize_region(address: Option<&str>) -> String {
    let Some(address) = address else {
        return REGION_OTHER.to_string();
    };
    let mut parts = address.trim().split_whitespace();
    let Some(first) = parts.next() else {
        return REGION_OTHER.to_string();
    };
    let district = parts.next().unwrap_or("");

    let matched_metro = METRO_CITIES.iter().find(|m| first.starts_with(**m));
    let matched_province = PROVINCES.iter().find(|p| first.starts_with(**p));
    let city = matched_metro.or(matched_province).copied().unwrap_or(first);

    // A 구-suffixed sub-unit is already the canonical form.
    if district.ends_with('구') {
        return format!("{} {}", city, district);
    }

    // Province sub-units keep their 시/군 suffix.
    if matched_province.is_some() && (district.ends_with('시') || district.ends_with('군')) {
        return format!("{} {}", city, district);
    }

    if matched_metro.is_some() && !district.is_empty() {
        if !district.ends_with('구') && !district.ends_with('군') {
            return format!("{} {}구", city, district);
        }
        return format!("{} {}", city, district);
    }

    if district.is_empty() {
        return city.to_string();
    }

    format!("{} {}", city, district)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metro_with_district() {
        assert_eq!(normalize_region(Some("서울 강남구 역삼로 123")), "서울 강남구");
        assert_eq!(normalize_region(Some("서울특별시 강남구 역삼동")), "서울 강남구");
        assert_eq!(normalize_region(Some("부산광역시 해운대구")), "부산 해운대구");
    }

    #[test]
    fn test_province_collapsed() {
        assert_eq!(normalize_region(Some("경기도 성남시 분당구 판교역로")), "경기 성남시");
        assert_eq!(normalize_region(Some("강원도 홍천군 홍천읍")), "강원 홍천군");
    }

    #[test]
    fn test_missing_address() {
        assert_eq!(normalize_region(None), REGION_OTHER);
        assert_eq!(normalize_region(Some("")), REGION_OTHER);
        assert_eq!(normalize_region(Some("   ")), REGION_OTHER);
    }

    #[test]
    fn test_metro_suffix_appended() {
        // Naive 구 append for metro sub-units without a suffix.
        assert_eq!(normalize_region(Some("서울 금천")), "서울 금천구");
    }

    #[test]
    fn test_city_only() {
        assert_eq!(normalize_region(Some("세종특별자치시")), "세종");
        assert_eq!(normalize_region(Some("경기")), "경기");
    }

    #[test]
    fn test_unrecognized_city_kept() {
        assert_eq!(normalize_region(Some("판교 테크노밸리")), "판교 테크노밸리");
    }

    #[test]
    fn test_deterministic() {
        let a = normalize_region(Some("인천 연수구 송도동"));
        let b = normalize_region(Some("인천 연수구 송도동"));
        assert_eq!(a, b);
    }
}
