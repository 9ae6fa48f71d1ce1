//! Whitelist gate - decides whether a group's messages are inspected

use crate::domain::entities::WhitelistSet;

/// True iff `group_id` is listed verbatim or the whitelist holds the `all` sentinel.
/// No trimming or numeric coercion is applied.
pub fn is_allowed(whitelist: &WhitelistSet, group_id: &str) -> bool {
    let allowed = whitelist.is_allowed(group_id);
    if !allowed {
        tracing::trace!("Group {} not whitelisted, skipping", group_id);
    }
    allowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::WHITELIST_ALL;

    #[test]
    fn test_gate() {
        let list: WhitelistSet = ["100"].into_iter().collect();
        assert!(is_allowed(&list, "100"));
        assert!(!is_allowed(&list, "200"));
        assert!(!is_allowed(&list, "0100"));
        assert!(!is_allowed(&WhitelistSet::new(), "100"));

        let all: WhitelistSet = [WHITELIST_ALL].into_iter().collect();
        assert!(is_allowed(&all, "200"));
    }
}
