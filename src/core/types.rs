use std::{collections::BTreeSet, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Space-delimited set of scope names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope(BTreeSet<String>);

impl Scope {
    pub fn from_parts(parts: Vec<String>) -> Self {
        Self(parts.into_iter().filter(|p| !p.is_empty()).collect())
    }

    pub fn from_delimited_parts(parts: &str) -> Self {
        Self(
            parts
                .split(' ')
                .filter(|p| !p.is_empty())
                .map(ToString::to_string)
                .collect(),
        )
    }

    pub fn as_joined(&self) -> String {
        self.0
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(" ")
    }

    pub fn contains(&self, scope: &str) -> bool {
        self.0.contains(scope)
    }

    pub fn as_parts(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for Scope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parts = String::deserialize(deserializer)?;
        Ok(Self::from_delimited_parts(&parts))
    }
}

impl Serialize for Scope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let joined = self.as_joined();
        serializer.serialize_str(&joined)
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct ClientId(pub String);

impl FromStr for ClientId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

#[derive(Debug, serde::Deserialize)]
#[serde(transparent)]
pub struct ClientSecret(pub String);

impl AsRef<str> for ClientSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HashedClientSecret(pub String);

impl From<String> for HashedClientSecret {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for HashedClientSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Opaque handle of a persisted grant. Always supplied by the caller.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct GrantKey(pub String);

#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct UserCode(pub String);

#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct DeviceCode(pub String);

#[cfg(test)]
mod tests {
    use super::Scope;

    #[test]
    fn scope_ignores_repeated_and_empty_parts() {
        let scope = Scope::from_delimited_parts("openid  profile openid ");
        assert_eq!(scope.as_parts(), ["openid", "profile"]);
        assert_eq!(scope.as_joined(), "openid profile");
        assert!(scope.contains("profile"));
        assert!(Scope::from_delimited_parts("").is_empty());
    }

    #[test]
    fn scope_serializes_as_delimited_string() {
        let scope = Scope::from_parts(vec!["api".to_string(), "openid".to_string()]);
        let json = serde_json::to_string(&scope).expect("serialize");
        assert_eq!(json, "\"api openid\"");
        let back: Scope = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, scope);
    }
}
