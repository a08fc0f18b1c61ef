//! Connectivity keys attached to pour pads.
//!
//! Elements without a resolvable net still need a key so the solver can
//! tell them apart from the pour net. Those keys are synthesised from the
//! element id, with a distinct prefix per source so they never collide with
//! each other or with real keys.

use std::fmt;

use serde::{Serialize, Serializer};

/// The connectivity key of a pad.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConnectivityKey {
    /// A key returned by the connectivity resolver.
    Real(String),
    /// Unconnected SMT pad: `unconnected:<id>`.
    Unconnected(String),
    /// Unconnected plated hole: `unconnected-plated-hole:<id>`.
    UnconnectedPlatedHole(String),
    /// Unconnected via: `unconnected-via:<id>`.
    UnconnectedVia(String),
    /// Bare hole, never electrically connected: `hole:<id>`.
    Hole(String),
    /// Board cutout, never electrically connected: `cutout:<id>`.
    Cutout(String),
}

impl ConnectivityKey {
    /// Returns the resolver's key, or the given fallback when there is none.
    #[must_use]
    pub fn resolved_or(resolved: Option<&str>, fallback: impl FnOnce() -> Self) -> Self {
        resolved.map_or_else(fallback, |key| Self::Real(key.to_string()))
    }

    fn parts(&self) -> (&'static str, &String) {
        match self {
            Self::Real(key) => ("", key),
            Self::Unconnected(id) => ("unconnected:", id),
            Self::UnconnectedPlatedHole(id) => ("unconnected-plated-hole:", id),
            Self::UnconnectedVia(id) => ("unconnected-via:", id),
            Self::Hole(id) => ("hole:", id),
            Self::Cutout(id) => ("cutout:", id),
        }
    }
}

impl fmt::Display for ConnectivityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (prefix, value) = self.parts();
        write!(f, "{prefix}{value}")
    }
}

impl Serialize for ConnectivityKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_key_strings() {
        let id = "pcb_x_1".to_string();
        assert_eq!(
            ConnectivityKey::Unconnected(id.clone()).to_string(),
            "unconnected:pcb_x_1"
        );
        assert_eq!(
            ConnectivityKey::UnconnectedPlatedHole(id.clone()).to_string(),
            "unconnected-plated-hole:pcb_x_1"
        );
        assert_eq!(
            ConnectivityKey::UnconnectedVia(id.clone()).to_string(),
            "unconnected-via:pcb_x_1"
        );
        assert_eq!(ConnectivityKey::Hole(id.clone()).to_string(), "hole:pcb_x_1");
        assert_eq!(ConnectivityKey::Cutout(id).to_string(), "cutout:pcb_x_1");
    }

    #[test]
    fn real_key_is_verbatim() {
        let key = ConnectivityKey::Real("connectivity_net3".to_string());
        assert_eq!(key.to_string(), "connectivity_net3");
        assert_eq!(
            serde_json::to_string(&key).unwrap(),
            "\"connectivity_net3\""
        );
    }

    #[test]
    fn resolved_or_fallback() {
        let key = ConnectivityKey::resolved_or(None, || ConnectivityKey::Hole("h".to_string()));
        assert_eq!(key, ConnectivityKey::Hole("h".to_string()));
        let key = ConnectivityKey::resolved_or(Some("net"), || unreachable!());
        assert_eq!(key, ConnectivityKey::Real("net".to_string()));
    }
}
