use crate::value::Value;

#[derive(Debug, Clone, Default)]
/// Ordered collection of named values reported by a
/// [`BaseObject`](crate::BaseObject) at a given verbosity level
///
/// Entries keep their insertion order. Inserting a name that already exists
/// replaces the value but keeps the original position.
///
/// # Example
/// ```rust
/// use objrepr::DataSnapshot;
///
/// let mut data = DataSnapshot::new();
/// data.insert("title", "Home");
/// data.insert("code", 200);
/// data.insert("title", "Index");
///
/// let names: Vec<&str> = data.iter().map(|(name, _)| name).collect();
/// assert_eq!(names, vec!["title", "code"]);
/// ```
pub struct DataSnapshot {
    entries: Vec<(String, Value)>,
}

impl DataSnapshot {
    pub fn new() -> Self {
        DataSnapshot::default()
    }

    /// Insert a named value, returning the previous value for that name if any
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let value = value.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            return Some(std::mem::replace(existing, value));
        }
        self.entries.push((name, value));
        None
    }

    /// Builder version of [`DataSnapshot::insert`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let pos = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for DataSnapshot
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = DataSnapshot::new();
        data.extend(iter);
        data
    }
}

impl<K, V> Extend<(K, V)> for DataSnapshot
where
    K: Into<String>,
    V: Into<Value>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl IntoIterator for DataSnapshot {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_preserves_insertion_order() {
        let data: DataSnapshot = [("c", 3), ("a", 1), ("b", 2)].into_iter().collect();
        let names: Vec<&str> = data.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn it_overwrites_in_place() {
        let mut data = DataSnapshot::new().with("a", 1).with("b", 2);
        let previous = data.insert("a", "one");

        assert!(matches!(previous, Some(Value::Int(1))));
        assert!(matches!(data.get("a"), Some(Value::Str(s)) if s == "one"));
        let names: Vec<&str> = data.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn it_removes_entries() {
        let mut data = DataSnapshot::new().with("a", 1).with("b", 2);
        assert!(data.remove("a").is_some());
        assert!(data.remove("a").is_none());
        assert!(!data.contains("a"));
        assert_eq!(data.len(), 1);
    }
}
