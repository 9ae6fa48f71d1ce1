//! Monitor state: keywords, group whitelist and the admin identity

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Whitelist entry that lets every group through
pub const WHITELIST_ALL: &str = "all";

pub const DEFAULT_KEYWORDS: [&str; 3] = ["重要", "紧急", "漏洞"];
pub const DEFAULT_WHITELIST: [&str; 2] = ["987654321", "112233445"];
pub const DEFAULT_ADMIN: &str = "123456789";

fn group_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+$").expect("static regex"))
}

fn admin_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{5,12}$").expect("static regex"))
}

/// Group ids are all-digit strings, compared as text
pub fn is_valid_group_id(id: &str) -> bool {
    group_id_pattern().is_match(id)
}

/// Ordered, duplicate-free list of trigger substrings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the keyword is empty or already present
    pub fn insert(&mut self, keyword: impl Into<String>) -> bool {
        let keyword = keyword.into();
        if keyword.is_empty() || self.contains(&keyword) {
            return false;
        }
        self.0.push(keyword);
        true
    }

    pub fn remove(&mut self, keyword: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|k| k != keyword);
        before != self.0.len()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.0.iter().any(|k| k == keyword)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for KeywordSet {
    fn from(keywords: Vec<String>) -> Self {
        let mut set = KeywordSet::new();
        for keyword in keywords {
            set.insert(keyword);
        }
        set
    }
}

impl From<KeywordSet> for Vec<String> {
    fn from(set: KeywordSet) -> Self {
        set.0
    }
}

impl<'a> FromIterator<&'a str> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect::<Vec<_>>().into()
    }
}

/// Ordered, duplicate-free list of group ids whose messages are inspected
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct WhitelistSet(Vec<String>);

impl WhitelistSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, group_id: impl Into<String>) -> bool {
        let group_id = group_id.into();
        if group_id.is_empty() || self.contains(&group_id) {
            return false;
        }
        self.0.push(group_id);
        true
    }

    pub fn remove(&mut self, group_id: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|g| g != group_id);
        before != self.0.len()
    }

    pub fn contains(&self, group_id: &str) -> bool {
        self.0.iter().any(|g| g == group_id)
    }

    /// Exact string membership, or the `all` sentinel
    pub fn is_allowed(&self, group_id: &str) -> bool {
        self.contains(WHITELIST_ALL) || self.contains(group_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for WhitelistSet {
    fn from(groups: Vec<String>) -> Self {
        let mut set = WhitelistSet::new();
        for group in groups {
            set.insert(group);
        }
        set
    }
}

impl From<WhitelistSet> for Vec<String> {
    fn from(set: WhitelistSet) -> Self {
        set.0
    }
}

impl<'a> FromIterator<&'a str> for WhitelistSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect::<Vec<_>>().into()
    }
}

/// The single administrator, also the alert recipient
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminIdentity(String);

impl AdminIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Accepts only ids matching `^\d{5,12}$`
    pub fn parse(id: &str) -> Option<Self> {
        admin_id_pattern().is_match(id).then(|| Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_set(&self) -> bool {
        !self.0.is_empty()
    }

    /// Usable as a private-message target
    pub fn is_well_formed(&self) -> bool {
        self.is_set() && self.0.chars().all(|c| c.is_ascii_digit())
    }

    pub fn matches(&self, sender_id: &str) -> bool {
        self.is_set() && self.0 == sender_id
    }
}

impl fmt::Display for AdminIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn default_keywords() -> KeywordSet {
    DEFAULT_KEYWORDS.into_iter().collect()
}

fn default_whitelist() -> WhitelistSet {
    DEFAULT_WHITELIST.into_iter().collect()
}

fn default_admin() -> AdminIdentity {
    AdminIdentity::new(DEFAULT_ADMIN)
}

/// Persisted plugin state; keys match the on-disk JSON record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorState {
    #[serde(default = "default_keywords")]
    pub keywords: KeywordSet,
    #[serde(default = "default_whitelist")]
    pub white_list: WhitelistSet,
    #[serde(default = "default_admin")]
    pub admin_qq: AdminIdentity,
}

impl Default for MonitorState {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            white_list: default_whitelist(),
            admin_qq: default_admin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_set_rejects_duplicates_and_empty() {
        let mut set = KeywordSet::new();
        assert!(set.insert("urgent"));
        assert!(!set.insert("urgent"));
        assert!(!set.insert(""));
        assert!(set.insert("Urgent"));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["urgent", "Urgent"]);
    }

    #[test]
    fn test_keyword_set_dedupes_on_deserialize() {
        let set: KeywordSet = serde_json::from_str(r#"["a", "b", "a", ""]"#).unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_whitelist_exact_membership() {
        let list: WhitelistSet = ["123"].into_iter().collect();
        assert!(list.is_allowed("123"));
        assert!(!list.is_allowed("0123"));
        assert!(!list.is_allowed("123 "));
    }

    #[test]
    fn test_whitelist_sentinel_and_empty() {
        let all: WhitelistSet = [WHITELIST_ALL].into_iter().collect();
        assert!(all.is_allowed("42"));
        assert!(!WhitelistSet::new().is_allowed("42"));
    }

    #[test]
    fn test_admin_identity_parse() {
        assert!(AdminIdentity::parse("12").is_none());
        assert!(AdminIdentity::parse("12345").is_some());
        assert!(AdminIdentity::parse("123456789012").is_some());
        assert!(AdminIdentity::parse("1234567890123").is_none());
        assert!(AdminIdentity::parse("12345a").is_none());
    }

    #[test]
    fn test_admin_identity_well_formed() {
        assert!(!AdminIdentity::default().is_well_formed());
        assert!(!AdminIdentity::new("admin").is_well_formed());
        assert!(AdminIdentity::new("123456789").is_well_formed());
        assert!(!AdminIdentity::default().matches(""));
    }

    #[test]
    fn test_group_id_validation() {
        assert!(is_valid_group_id("100"));
        assert!(!is_valid_group_id("10a"));
        assert!(!is_valid_group_id(""));
    }

    #[test]
    fn test_state_missing_keys_fall_back_per_key() {
        let state: MonitorState = serde_json::from_str(r#"{"keywords": ["x"]}"#).unwrap();
        assert_eq!(state.keywords.iter().collect::<Vec<_>>(), vec!["x"]);
        assert_eq!(state.white_list, MonitorState::default().white_list);
        assert_eq!(state.admin_qq.as_str(), DEFAULT_ADMIN);
    }
}
