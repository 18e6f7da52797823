use serde::{Deserialize, Serialize};
use serde_json_bytes::{ByteString, Value};
use std::fmt;

/// A JSON object.
pub type Object = serde_json_bytes::Map<ByteString, Value>;

/// One step of a [`Path`]: a response key or a list index.
///
/// Serializes as a bare string or number, so a full path renders as
/// `["nest", "test", 1]`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathElement {
    /// A list index.
    Index(usize),

    /// A response key (field name or alias).
    Key(String),
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PathElement::Index(index) => write!(f, "{}", index),
            PathElement::Key(key) => write!(f, "{}", key),
        }
    }
}

/// The location of a value within the response data, as a sequence of
/// response keys and list indices, e.g. `nest/test/1`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(pub Vec<PathElement>);

impl Path {
    pub fn empty() -> Self {
        Path(Vec::new())
    }

    /// Returns this path extended by one response key.
    pub fn key(&self, name: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.0.push(PathElement::Key(name.into()));
        path
    }

    /// Returns this path extended by one list index.
    pub fn index(&self, index: usize) -> Self {
        let mut path = self.clone();
        path.0.push(PathElement::Index(index));
        path
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathElement> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> From<T> for Path
where
    T: AsRef<str>,
{
    fn from(s: T) -> Self {
        Path(
            s.as_ref()
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(|segment| {
                    if let Ok(index) = segment.parse::<usize>() {
                        PathElement::Index(index)
                    } else {
                        PathElement::Key(segment.to_string())
                    }
                })
                .collect(),
        )
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, element) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{}", element)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_from_str_parses_indices() {
        let path = Path::from("nest/test/1");
        assert_eq!(
            path.0,
            vec![
                PathElement::Key("nest".to_string()),
                PathElement::Key("test".to_string()),
                PathElement::Index(1),
            ]
        );
        assert_eq!(path.to_string(), "nest/test/1");
    }

    #[test]
    fn path_serializes_as_mixed_array() {
        let path = Path::empty().key("nest").key("test").index(1);
        assert_eq!(
            serde_json::to_value(&path).unwrap(),
            serde_json::json!(["nest", "test", 1])
        );
        let back: Path = serde_json::from_value(serde_json::json!(["nest", "test", 1])).unwrap();
        assert_eq!(back, path);
    }

    #[test]
    fn child_paths_leave_the_parent_untouched() {
        let parent = Path::from("nest");
        let child = parent.index(0);
        assert_eq!(parent.len(), 1);
        assert_eq!(child.len(), 2);
    }
}
