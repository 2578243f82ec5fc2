//! Relationships parsing and modification.
//!
//! OPC packages map relationship IDs to part targets via `_rels/*.rels`
//! files. The writer rebuilds the presentation-level relationships when
//! slides are injected and creates one relationship set per slide.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::constants::NS_RELATIONSHIPS;
use crate::error::{DeckError, Result};

/// Parsed relationships from a .rels file.
///
/// Maintains insertion order for deterministic XML serialization.
#[derive(Debug, Clone)]
pub struct Relationships {
    /// Ordered list of relationship IDs
    order: Vec<String>,

    /// Map of relationship ID to target
    map: HashMap<String, RelationshipTarget>,

    /// Counter for generating unique IDs (starts at 1)
    next_id_counter: u32,
}

/// A relationship target with its type
#[derive(Debug, Clone)]
pub struct RelationshipTarget {
    /// The target path
    pub target: String,

    /// The relationship type URI
    pub rel_type: String,
}

impl Default for Relationships {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            map: HashMap::new(),
            next_id_counter: 1, // IDs start at rId1
        }
    }
}

impl Relationships {
    /// Create an empty relationships map
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse relationships from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut order = Vec::new();
        let mut map = HashMap::new();
        let mut max_id: u32 = 0;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    if e.local_name().as_ref() == b"Relationship" {
                        let mut id = None;
                        let mut target = None;
                        let mut rel_type = None;

                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"Id" => {
                                    id = attr.unescape_value().ok().map(|s| s.to_string());
                                }
                                b"Target" => {
                                    target = attr.unescape_value().ok().map(|s| s.to_string());
                                }
                                b"Type" => {
                                    rel_type = attr.unescape_value().ok().map(|s| s.to_string());
                                }
                                _ => {}
                            }
                        }

                        if let (Some(id), Some(target)) = (id, target) {
                            if let Some(num) = extract_id_number(&id) {
                                max_id = max_id.max(num);
                            }

                            order.push(id.clone());
                            map.insert(
                                id,
                                RelationshipTarget {
                                    target,
                                    rel_type: rel_type.unwrap_or_default(),
                                },
                            );
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(DeckError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(Self {
            order,
            map,
            next_id_counter: max_id + 1,
        })
    }

    /// Add a new relationship and return the generated ID
    pub fn add(&mut self, target: String, rel_type: String) -> String {
        let id = format!("rId{}", self.next_id_counter);
        self.next_id_counter += 1;

        self.order.push(id.clone());
        self.map
            .insert(id.clone(), RelationshipTarget { target, rel_type });

        id
    }

    /// Drop every relationship the predicate rejects
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &RelationshipTarget) -> bool,
    {
        let map = &mut self.map;
        self.order.retain(|id| {
            let kept = map.get(id).map(|rel| keep(id, rel)).unwrap_or(false);
            if !kept {
                map.remove(id);
            }
            kept
        });
    }

    /// Get the target for a relationship ID
    pub fn get(&self, id: &str) -> Option<&RelationshipTarget> {
        self.map.get(id)
    }

    /// Iterate over relationships in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RelationshipTarget)> {
        self.order
            .iter()
            .filter_map(|id| self.map.get(id).map(|rel| (id.as_str(), rel)))
    }

    /// Get the number of relationships
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if there are no relationships
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Serialize relationships to OPC format
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, NS_RELATIONSHIPS));
        xml.push('\n');

        // Insertion order keeps serialization deterministic
        for id in &self.order {
            if let Some(rel) = self.map.get(id) {
                xml.push_str(&format!(
                    "  <Relationship Id=\"{}\" Type=\"{}\" Target=\"{}\"/>\n",
                    escape_attr(id),
                    escape_attr(&rel.rel_type),
                    escape_attr(&rel.target)
                ));
            }
        }

        xml.push_str("</Relationships>");
        xml
    }
}

/// Extract the numeric portion from a relationship ID (e.g., "rId5" -> 5)
fn extract_id_number(id: &str) -> Option<u32> {
    id.strip_prefix("rId").and_then(|n| n.parse().ok())
}

/// Escape XML attribute values
fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
