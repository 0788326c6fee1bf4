use std::collections::HashMap;

/// Column names indexed case-insensitively, first spelling wins.
#[derive(Debug, Clone)]
pub struct CaseInsensitiveNames {
    map: HashMap<String, String>,
}

impl CaseInsensitiveNames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for name in names {
            let name = name.as_ref();
            let key = name.trim().to_lowercase();
            map.entry(key).or_insert_with(|| name.to_string());
        }
        Self { map }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.map
            .get(&name.trim().to_lowercase())
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&name.trim().to_lowercase())
    }

    /// Returns the actual spelling of the first candidate present.
    pub fn find_any<S: AsRef<str>>(&self, candidates: &[S]) -> Option<&str> {
        candidates
            .iter()
            .find_map(|candidate| self.get(candidate.as_ref()))
    }
}
