// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Node identifiers.
//!
//! A [`NodeId`] names a node in the address space: a namespace index plus a
//! numeric, string, GUID or opaque identifier. The text form follows the
//! OPC UA convention (`ns=2;i=5`, `i=84`, `ns=1;s=Pump`, `ns=1;g=<uuid>`,
//! `ns=1;b=<base64>`), which is also the serde representation.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier part of a [`NodeId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Identifier {
    Numeric(u32),
    String(String),
    Guid([u8; 16]),
    Opaque(Vec<u8>),
}

/// Address-space node identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId {
    pub namespace: u16,
    pub identifier: Identifier,
}

impl NodeId {
    /// Numeric identifier.
    pub const fn numeric(namespace: u16, value: u32) -> Self {
        Self {
            namespace,
            identifier: Identifier::Numeric(value),
        }
    }

    /// String identifier.
    pub fn string(namespace: u16, value: impl Into<String>) -> Self {
        Self {
            namespace,
            identifier: Identifier::String(value.into()),
        }
    }

    /// GUID identifier.
    pub const fn guid(namespace: u16, value: [u8; 16]) -> Self {
        Self {
            namespace,
            identifier: Identifier::Guid(value),
        }
    }

    /// Opaque (byte string) identifier.
    pub fn opaque(namespace: u16, value: impl Into<Vec<u8>>) -> Self {
        Self {
            namespace,
            identifier: Identifier::Opaque(value.into()),
        }
    }

    /// The null node id (`i=0`).
    pub const fn null() -> Self {
        Self::numeric(0, 0)
    }

    /// True for the null node id in any of its encodings.
    pub fn is_null(&self) -> bool {
        if self.namespace != 0 {
            return false;
        }
        match &self.identifier {
            Identifier::Numeric(v) => *v == 0,
            Identifier::String(s) => s.is_empty(),
            Identifier::Guid(g) => g.iter().all(|b| *b == 0),
            Identifier::Opaque(b) => b.is_empty(),
        }
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace != 0 {
            write!(f, "ns={};", self.namespace)?;
        }
        match &self.identifier {
            Identifier::Numeric(v) => write!(f, "i={}", v),
            Identifier::String(s) => write!(f, "s={}", s),
            Identifier::Guid(g) => write!(f, "g={}", format_guid(g)),
            Identifier::Opaque(b) => write!(f, "b={}", BASE64.encode(b)),
        }
    }
}

/// NodeId parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid node id {input:?}: {reason}")]
pub struct ParseNodeIdError {
    pub input: String,
    pub reason: &'static str,
}

impl FromStr for NodeId {
    type Err = ParseNodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = |reason| ParseNodeIdError {
            input: s.to_string(),
            reason,
        };

        let (namespace, rest) = match s.strip_prefix("ns=") {
            Some(tail) => {
                let (ns, rest) = tail.split_once(';').ok_or_else(|| fail("missing ';'"))?;
                let ns = ns.parse::<u16>().map_err(|_| fail("bad namespace index"))?;
                (ns, rest)
            }
            None => (0, s),
        };

        let (kind, value) = rest
            .split_once('=')
            .ok_or_else(|| fail("missing identifier type"))?;

        let identifier = match kind {
            "i" => Identifier::Numeric(value.parse().map_err(|_| fail("bad numeric identifier"))?),
            "s" => Identifier::String(value.to_string()),
            "g" => Identifier::Guid(parse_guid(value).ok_or_else(|| fail("bad guid"))?),
            "b" => Identifier::Opaque(BASE64.decode(value).map_err(|_| fail("bad base64"))?),
            _ => return Err(fail("unknown identifier type")),
        };

        Ok(Self {
            namespace,
            identifier,
        })
    }
}

impl TryFrom<String> for NodeId {
    type Error = ParseNodeIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NodeId> for String {
    fn from(value: NodeId) -> Self {
        value.to_string()
    }
}

fn format_guid(g: &[u8; 16]) -> String {
    let hex: String = g.iter().map(|b| format!("{:02x}", b)).collect();
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}

fn parse_guid(s: &str) -> Option<[u8; 16]> {
    let hex: String = s.chars().filter(|c| *c != '-').collect();
    if hex.len() != 32 || s.len() != 36 {
        return None;
    }
    let mut out = [0u8; 16];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = u8::from_str_radix(hex.get(i * 2..i * 2 + 2)?, 16).ok()?;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric() {
        assert_eq!("i=84".parse::<NodeId>().unwrap(), NodeId::numeric(0, 84));
        assert_eq!(
            "ns=2;i=5001".parse::<NodeId>().unwrap(),
            NodeId::numeric(2, 5001)
        );
    }

    #[test]
    fn test_parse_string_keeps_separators() {
        let id: NodeId = "ns=1;s=Line;Pump=3".parse().unwrap();
        assert_eq!(id, NodeId::string(1, "Line;Pump=3"));
    }

    #[test]
    fn test_guid_text_form() {
        let text = "ns=3;g=72962b91-fa75-4ae6-8d28-b404dc7daf63";
        let id: NodeId = text.parse().unwrap();
        assert!(matches!(id.identifier, Identifier::Guid(_)));
        assert_eq!(id.to_string(), text);
    }

    #[test]
    fn test_opaque_text_form() {
        let id = NodeId::opaque(4, vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(id.to_string(), "ns=4;b=3q2+7w==");
        assert_eq!(id.to_string().parse::<NodeId>().unwrap(), id);
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<NodeId>().is_err());
        assert!("ns=x;i=1".parse::<NodeId>().is_err());
        assert!("ns=1".parse::<NodeId>().is_err());
        assert!("q=1".parse::<NodeId>().is_err());
        assert!("i=abc".parse::<NodeId>().is_err());
        assert!("g=1234".parse::<NodeId>().is_err());
    }

    #[test]
    fn test_null() {
        assert!(NodeId::null().is_null());
        assert!(NodeId::string(0, "").is_null());
        assert!(!NodeId::numeric(1, 0).is_null());
        assert!(!NodeId::numeric(0, 22).is_null());
    }
}
