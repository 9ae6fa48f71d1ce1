//! Keyword scanner - first-match substring search

use crate::domain::entities::KeywordSet;

/// Return the first keyword, in set order, that occurs in `message`.
///
/// Matching is case-sensitive plain substring search; scanning stops at the
/// first hit so a message never yields more than one keyword.
pub fn scan<'a>(message: &str, keywords: &'a KeywordSet) -> Option<&'a str> {
    keywords.iter().find(|keyword| message.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(list: &[&'static str]) -> KeywordSet {
        list.iter().copied().collect()
    }

    #[test]
    fn test_no_word_boundary() {
        assert_eq!(scan("不重要吗", &keywords(&["重要"])), Some("重要"));
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(scan("this is URGENT", &keywords(&["urgent"])), None);
    }

    #[test]
    fn test_first_in_set_order_wins() {
        let set = keywords(&["bug", "urgent"]);
        assert_eq!(scan("urgent: bug in prod", &set), Some("bug"));
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(scan("anything", &KeywordSet::new()), None);
        assert_eq!(scan("", &keywords(&["a"])), None);
    }

    #[test]
    fn test_result_is_member_and_substring() {
        let set = keywords(&["alpha", "beta", "gamma"]);
        for message in ["gamma beta", "nothing", "alphabet", "betagamma"] {
            if let Some(hit) = scan(message, &set) {
                assert!(set.contains(hit));
                assert!(message.contains(hit));
                // nothing earlier in the set matched
                let earlier: Vec<_> = set.iter().take_while(|k| *k != hit).collect();
                assert!(earlier.iter().all(|k| !message.contains(k)));
            } else {
                assert!(set.iter().all(|k| !message.contains(k)));
            }
        }
    }
}
