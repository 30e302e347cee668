// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry of recognized RDF vocabularies.
//!
//! Four vocabularies are understood: BOT, Brick, SBCO and the internal
//! `graph2ifc` namespace. URIs are grouped by the role they play during
//! extraction (space class, adjacency property, ...) and looked up by exact
//! string match. This module is the only place namespace strings appear; new
//! vocabularies are added here and nowhere else.

use rustc_hash::FxHashSet;

const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

const SPACE_CLASSES: &[&str] = &[
    "https://w3id.org/bot#Space",
    "https://brickschema.org/schema/Brick#Room",
    "https://brickschema.org/schema/Brick#Space",
    "https://w3id.org/sbco#Space",
    "https://graph2ifc.dev/ns#Space",
];

const STOREY_CLASSES: &[&str] = &[
    "https://w3id.org/bot#Storey",
    "https://brickschema.org/schema/Brick#Floor",
    "https://w3id.org/sbco#Level",
    "https://graph2ifc.dev/ns#Storey",
];

const ADJACENCY_PROPS: &[&str] = &[
    "https://w3id.org/bot#adjacentZone",
    "https://w3id.org/sbco#adjacentTo",
    "https://graph2ifc.dev/ns#adjacentTo",
];

const CONNECTION_PROPS: &[&str] = &[
    "https://w3id.org/sbco#connectsTo",
    "https://graph2ifc.dev/ns#connectedTo",
];

/// Containment asserted as `space → storey`.
const CONTAINMENT_SPACE_TO_STOREY: &[&str] = &[
    "https://brickschema.org/schema/Brick#isPartOf",
    "https://w3id.org/sbco#isPartOfLevel",
    "https://graph2ifc.dev/ns#onStorey",
];

/// Containment asserted as `storey → space`.
const CONTAINMENT_STOREY_TO_SPACE: &[&str] = &[
    "https://w3id.org/bot#hasSpace",
    "https://w3id.org/bot#containsZone",
    "https://brickschema.org/schema/Brick#hasPart",
    "https://w3id.org/sbco#hasSpace",
    "https://graph2ifc.dev/ns#hasSpace",
];

const NAME_PROPS: &[&str] = &[
    RDFS_LABEL,
    "https://w3id.org/sbco#name",
    "https://graph2ifc.dev/ns#name",
];

const AREA_PROPS: &[&str] = &[
    "https://w3id.org/sbco#targetArea",
    "https://graph2ifc.dev/ns#targetArea",
];

const ELEVATION_PROPS: &[&str] = &[
    "https://w3id.org/sbco#elevation",
    "https://graph2ifc.dev/ns#elevation",
];

const CATEGORY_PROPS: &[&str] = &[
    "https://w3id.org/sbco#category",
    "https://graph2ifc.dev/ns#category",
];

/// Classes recognized but ignored by the layout core.
const IGNORED_CLASSES: &[&str] = &[
    "https://w3id.org/bot#Element",
    "https://brickschema.org/schema/Brick#Equipment",
    "https://brickschema.org/schema/Brick#Point",
    "https://brickschema.org/schema/Brick#Sensor",
    "https://graph2ifc.dev/ns#Equipment",
];

/// Immutable registry of recognized URIs, grouped by role.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    space_classes: FxHashSet<&'static str>,
    storey_classes: FxHashSet<&'static str>,
    adjacency_props: FxHashSet<&'static str>,
    connection_props: FxHashSet<&'static str>,
    containment_space_to_storey: FxHashSet<&'static str>,
    containment_storey_to_space: FxHashSet<&'static str>,
    name_props: FxHashSet<&'static str>,
    area_props: FxHashSet<&'static str>,
    elevation_props: FxHashSet<&'static str>,
    category_props: FxHashSet<&'static str>,
    ignored_classes: FxHashSet<&'static str>,
}

impl Vocabulary {
    /// The standard registry covering all four vocabularies.
    pub fn standard() -> Self {
        fn set(uris: &[&'static str]) -> FxHashSet<&'static str> {
            uris.iter().copied().collect()
        }
        Self {
            space_classes: set(SPACE_CLASSES),
            storey_classes: set(STOREY_CLASSES),
            adjacency_props: set(ADJACENCY_PROPS),
            connection_props: set(CONNECTION_PROPS),
            containment_space_to_storey: set(CONTAINMENT_SPACE_TO_STOREY),
            containment_storey_to_space: set(CONTAINMENT_STOREY_TO_SPACE),
            name_props: set(NAME_PROPS),
            area_props: set(AREA_PROPS),
            elevation_props: set(ELEVATION_PROPS),
            category_props: set(CATEGORY_PROPS),
            ignored_classes: set(IGNORED_CLASSES),
        }
    }

    pub fn is_space_class(&self, uri: &str) -> bool {
        self.space_classes.contains(uri)
    }

    pub fn is_storey_class(&self, uri: &str) -> bool {
        self.storey_classes.contains(uri)
    }

    pub fn is_adjacency_prop(&self, uri: &str) -> bool {
        self.adjacency_props.contains(uri)
    }

    pub fn is_connection_prop(&self, uri: &str) -> bool {
        self.connection_props.contains(uri)
    }

    pub fn is_space_to_storey_prop(&self, uri: &str) -> bool {
        self.containment_space_to_storey.contains(uri)
    }

    pub fn is_storey_to_space_prop(&self, uri: &str) -> bool {
        self.containment_storey_to_space.contains(uri)
    }

    pub fn is_name_prop(&self, uri: &str) -> bool {
        self.name_props.contains(uri)
    }

    pub fn is_area_prop(&self, uri: &str) -> bool {
        self.area_props.contains(uri)
    }

    pub fn is_elevation_prop(&self, uri: &str) -> bool {
        self.elevation_props.contains(uri)
    }

    pub fn is_category_prop(&self, uri: &str) -> bool {
        self.category_props.contains(uri)
    }

    pub fn is_ignored_class(&self, uri: &str) -> bool {
        self.ignored_classes.contains(uri)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_all_four_vocabularies() {
        let v = Vocabulary::standard();
        assert!(v.is_space_class("https://w3id.org/bot#Space"));
        assert!(v.is_space_class("https://brickschema.org/schema/Brick#Room"));
        assert!(v.is_space_class("https://w3id.org/sbco#Space"));
        assert!(v.is_space_class("https://graph2ifc.dev/ns#Space"));
        assert!(v.is_storey_class("https://w3id.org/bot#Storey"));
        assert!(v.is_storey_class("https://brickschema.org/schema/Brick#Floor"));
    }

    #[test]
    fn lookup_is_exact_match() {
        let v = Vocabulary::standard();
        assert!(!v.is_space_class("https://w3id.org/bot#space"));
        assert!(!v.is_space_class("bot#Space"));
        assert!(!v.is_adjacency_prop("https://w3id.org/bot#adjacentzone"));
    }

    #[test]
    fn containment_directions_are_disjoint() {
        let v = Vocabulary::standard();
        assert!(v.is_space_to_storey_prop("https://graph2ifc.dev/ns#onStorey"));
        assert!(!v.is_storey_to_space_prop("https://graph2ifc.dev/ns#onStorey"));
        assert!(v.is_storey_to_space_prop("https://w3id.org/bot#hasSpace"));
        assert!(!v.is_space_to_storey_prop("https://w3id.org/bot#hasSpace"));
    }

    #[test]
    fn equipment_and_points_are_ignored() {
        let v = Vocabulary::standard();
        assert!(v.is_ignored_class("https://brickschema.org/schema/Brick#Equipment"));
        assert!(v.is_ignored_class("https://brickschema.org/schema/Brick#Point"));
        assert!(!v.is_space_class("https://brickschema.org/schema/Brick#Equipment"));
    }
}
