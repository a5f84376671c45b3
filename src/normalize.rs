//! Column-name canonicalization.
//!
//! Two column names refer to the same concept when their normalized keys are
//! equal. The rule is deliberately narrow: lower-case, then drop underscores.
//! Spaces and other punctuation are significant, so `"User ID"` and
//! `"UserId"` stay distinct while `"user_id"` and `"UserID"` match.

pub fn normalize_key(name: &str) -> String {
    name.to_lowercase().replace('_', "")
}
