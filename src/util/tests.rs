//! Unit tests for utility functions

use super::*;

#[cfg(test)]
mod util_tests {
    use super::*;

    #[test]
    fn test_parse_json_list_valid() {
        let seasons: Vec<String> = parse_json_list(Some(r#"["2023/24","2024/25"]"#));
        assert_eq!(seasons, vec!["2023/24", "2024/25"]);
    }

    #[test]
    fn test_parse_json_list_malformed_yields_empty() {
        let seasons: Vec<String> = parse_json_list(Some("[bad"));
        assert!(seasons.is_empty());
    }

    #[test]
    fn test_parse_json_list_wrong_shape_yields_empty() {
        let positions: Vec<String> = parse_json_list(Some(r#"{"position":"GK"}"#));
        assert!(positions.is_empty());

        let numbers: Vec<String> = parse_json_list(Some("[1, 2]"));
        assert!(numbers.is_empty());
    }

    #[test]
    fn test_parse_json_list_missing_or_blank() {
        let none: Vec<String> = parse_json_list(None);
        let blank: Vec<String> = parse_json_list(Some("   "));
        assert!(none.is_empty());
        assert!(blank.is_empty());
    }

    #[test]
    fn test_to_json_list() {
        let encoded = to_json_list(&["GK".to_string(), "CB".to_string()]);
        assert_eq!(encoded, r#"["GK","CB"]"#);
        assert_eq!(to_json_list::<String>(&[]), "[]");
    }

    #[test]
    fn test_split_csv_trims_and_drops_empties() {
        let parts = split_csv(Some(" passing, ,first touch,vision ,"));
        assert_eq!(parts, vec!["passing", "first touch", "vision"]);
    }

    #[test]
    fn test_split_csv_none() {
        assert!(split_csv(None).is_empty());
        assert!(split_csv(Some("")).is_empty());
    }

    #[test]
    fn test_join_csv() {
        let joined = join_csv(&[
            " cones".to_string(),
            "".to_string(),
            "bibs ".to_string(),
        ]);
        assert_eq!(joined, "cones,bibs");
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(66.666), 66.7);
        assert_eq!(round1(0.0), 0.0);
        assert_eq!(round1(50.04), 50.0);
    }
}
