//! Uniqueness checks for keyed submissions

use std::collections::HashSet;

use crate::error::{Result, WikiError};

/// Fail on the first key that appears twice
///
/// `collection` names the list in the error message (e.g. "renderers").
pub fn ensure_unique_keys<'a, I>(collection: &str, keys: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(WikiError::Validation(format!(
                "every entry in '{}' needs a unique key, '{}' is used more than once",
                collection, key
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_keys_pass() {
        assert!(ensure_unique_keys("renderers", ["markdownCore", "htmlCore"]).is_ok());
    }

    #[test]
    fn test_empty_is_unique() {
        assert!(ensure_unique_keys("renderers", Vec::<&str>::new()).is_ok());
    }

    #[test]
    fn test_duplicate_key_fails() {
        let err = ensure_unique_keys("search_engines", ["db", "elasticsearch", "db"]).unwrap_err();
        match err {
            WikiError::Validation(msg) => {
                assert!(msg.contains("search_engines"));
                assert!(msg.contains("'db'"));
            }
            other => panic!("Expected WikiError::Validation, got {:?}", other),
        }
    }
}
