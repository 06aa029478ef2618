//! The classifier itself.

use tracing::trace;

use trip_model::{RoleMap, SemanticRole};

use crate::lexicon::RoleLexicon;

/// Classify one header string.
///
/// Deterministic and total: case-insensitive substring matching against the
/// lexicon's keyword lists, trying roles in precedence order and taking the
/// first that matches. A header containing no recognized keyword (or an
/// empty header) carries no role.
#[must_use]
pub fn classify(header: &str, lexicon: &RoleLexicon) -> Option<SemanticRole> {
    let folded = header.trim().to_lowercase();
    if folded.is_empty() {
        return None;
    }
    for role in SemanticRole::ALL {
        let matched = lexicon
            .keywords_for(role)
            .iter()
            .any(|keyword| !keyword.is_empty() && folded.contains(&keyword.to_lowercase()));
        if matched {
            trace!(header, role = %role, "classified header");
            return Some(role);
        }
    }
    None
}

/// Build the role map for a header set. Headers carrying no role are absent
/// from the map.
#[must_use]
pub fn classify_headers(headers: &[String], lexicon: &RoleLexicon) -> RoleMap {
    headers
        .iter()
        .filter_map(|header| classify(header, lexicon).map(|role| (header.clone(), role)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_are_case_insensitive() {
        let lexicon = RoleLexicon::default();
        assert_eq!(classify("DATE", &lexicon), Some(SemanticRole::Date));
        assert_eq!(classify("Travel Zone", &lexicon), Some(SemanticRole::Transport));
        assert_eq!(classify("ZONE", &lexicon), Some(SemanticRole::Zone));
    }

    #[test]
    fn thai_headers_classify() {
        let lexicon = RoleLexicon::default();
        assert_eq!(classify("วันที่", &lexicon), Some(SemanticRole::Date));
        assert_eq!(classify("สถานที่", &lexicon), Some(SemanticRole::Place));
        assert_eq!(classify("การเดินทาง", &lexicon), Some(SemanticRole::Transport));
        assert_eq!(classify("โซน", &lexicon), Some(SemanticRole::Zone));
        assert_eq!(classify("แนะนำ", &lexicon), Some(SemanticRole::Recommend));
    }

    #[test]
    fn role_map_skips_unrecognized_headers() {
        let lexicon = RoleLexicon::default();
        let headers = vec![
            "วันที่".to_string(),
            "ราคารวม".to_string(),
            "โซน".to_string(),
        ];
        let map = classify_headers(&headers, &lexicon);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("วันที่"), Some(&SemanticRole::Date));
        assert_eq!(map.get("โซน"), Some(&SemanticRole::Zone));
        assert!(!map.contains_key("ราคารวม"));
    }
}
