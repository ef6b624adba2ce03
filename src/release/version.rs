//! Dotted numeric release versions
//!
//! A version is a non-empty sequence of non-negative integers ("1.10.0").
//! Ordering is component-wise from the left. Versions with different segment
//! counts compare as if the shorter one were padded with zeros, so "1.2" and
//! "1.2.0" are equal.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Release version parsed from the manifest or an archive name
///
/// Displays exactly as written, so "01.2.0" stays "01.2.0" in prompts and
/// archive names while still comparing equal to "1.2.0".
#[derive(Debug, Clone)]
pub struct Version {
  parts: Vec<u64>,
  raw: String,
}

/// Reason a string is not a valid version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseVersionError {
  Empty,
  InvalidComponent { component: String },
}

impl fmt::Display for ParseVersionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ParseVersionError::Empty => write!(f, "version is empty"),
      ParseVersionError::InvalidComponent { component } => {
        write!(f, "'{}' is not a non-negative integer", component)
      }
    }
  }
}

impl std::error::Error for ParseVersionError {}

impl Version {
  /// Components without trailing zeros, used for padding-aware equality
  fn significant(&self) -> &[u64] {
    let end = self.parts.iter().rposition(|&p| p != 0).map_or(0, |i| i + 1);
    &self.parts[..end]
  }
}

impl FromStr for Version {
  type Err = ParseVersionError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.is_empty() {
      return Err(ParseVersionError::Empty);
    }

    let parts = s
      .split('.')
      .map(|component| {
        // u64::from_str accepts a leading '+', which never appears in a release version
        if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
          return Err(ParseVersionError::InvalidComponent {
            component: component.to_string(),
          });
        }
        component.parse::<u64>().map_err(|_| ParseVersionError::InvalidComponent {
          component: component.to_string(),
        })
      })
      .collect::<Result<Vec<_>, _>>()?;

    Ok(Self {
      parts,
      raw: s.to_string(),
    })
  }
}

impl Ord for Version {
  fn cmp(&self, other: &Self) -> Ordering {
    let len = self.parts.len().max(other.parts.len());
    (0..len)
      .map(|i| {
        let a = self.parts.get(i).copied().unwrap_or(0);
        let b = other.parts.get(i).copied().unwrap_or(0);
        a.cmp(&b)
      })
      .find(|ord| ord.is_ne())
      .unwrap_or(Ordering::Equal)
  }
}

impl PartialOrd for Version {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl PartialEq for Version {
  fn eq(&self, other: &Self) -> bool {
    self.cmp(other) == Ordering::Equal
  }
}

impl Eq for Version {}

impl Hash for Version {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.significant().hash(state);
  }
}

impl fmt::Display for Version {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.raw)
  }
}

impl Serialize for Version {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}
