//! Scene identifiers carried by `loadScene`.
//!
//! Scene names are short slugs such as `two_polygons`, chosen from a page
//! menu or recorded in a trace. They are checked once at the boundary and
//! interned, so commands that carry one stay `Copy`.

use crate::error::EditorError;
use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static SCENE_NAMES: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

const MAX_NAME_LEN: usize = 64;

/// A validated, interned scene name. The editor never interprets it; the
/// engine owns the scene catalogue.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneId(Spur);

impl SceneId {
    /// Accept a scene name from the UI.
    ///
    /// Surrounding whitespace is dropped and ASCII letters are lowercased.
    /// What remains must be 1 to 64 characters of `a-z`, `0-9`, `_` or `-`.
    pub fn parse(name: &str) -> Result<Self, EditorError> {
        let slug = name.trim().to_ascii_lowercase();
        let valid = !slug.is_empty()
            && slug.len() <= MAX_NAME_LEN
            && slug
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-');
        if !valid {
            return Err(EditorError::InvalidConfig(format!(
                "scene name `{name}` must be a slug of a-z, 0-9, `_` or `-`"
            )));
        }
        Ok(Self(SCENE_NAMES.get_or_intern(slug)))
    }

    pub fn name(&self) -> &str {
        SCENE_NAMES.resolve(&self.0)
    }
}

impl FromStr for SceneId {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene:{}", self.name())
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for SceneId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for SceneId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        SceneId::parse(&name).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn equal_names_share_an_id() {
        let a = SceneId::parse("two_polygons").unwrap();
        assert_eq!(a, SceneId::parse(" Two_Polygons ").unwrap());
        assert_eq!(a.name(), "two_polygons");
        assert_ne!(a, SceneId::parse("square-grid").unwrap());
    }

    #[test]
    fn rejects_non_slug_names() {
        let too_long = "x".repeat(65);
        for bad in ["", "   ", "two polygons", "../scenes", "ünicode", too_long.as_str()] {
            assert!(
                matches!(SceneId::parse(bad), Err(EditorError::InvalidConfig(_))),
                "{bad:?} accepted"
            );
        }
    }

    #[test]
    fn serde_uses_the_bare_name() {
        let id: SceneId = "triangle".parse().unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""triangle""#);
        let back: SceneId = serde_json::from_str(r#""TRIANGLE""#).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<SceneId>(r#""no way""#).is_err());
    }
}
