// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Topology extraction from the triple store.
//!
//! Walks the store with the vocabulary registry and produces the neutral
//! topology: storeys (elevation-sorted, indexed), spaces (with name, target
//! area, category and storey assignment), and deduplicated undirected edges.
//! Subjects without a recognized type are skipped; edges with unknown
//! endpoints are dropped and reported as warnings.

use graph2ifc_core::{
    Diagnostic, Diagnostics, Edge, EdgeKind, Space, Storey, DEFAULT_STOREY_ID,
};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::Topology;
use crate::store::{local_name, Term, TripleStore, RDF_TYPE};
use crate::vocabulary::Vocabulary;

#[derive(Default)]
struct SubjectInfo {
    name: Option<String>,
    area: Option<f64>,
    elevation: Option<f64>,
    category: Option<String>,
}

/// Extracts storeys, spaces and edges from a parsed triple store.
///
/// Returns the topology together with extraction warnings. Fails with
/// [`Error::InputInvalid`] only when a non-empty store contains no recognized
/// subject at all — an empty store yields an empty topology.
pub fn extract(store: &TripleStore, vocab: &Vocabulary) -> Result<(Topology, Diagnostics)> {
    let mut diagnostics = Diagnostics::new();

    // Pass 1: typed subjects, in insertion order of their first type triple.
    let mut space_subjects: Vec<&str> = Vec::new();
    let mut storey_subjects: Vec<&str> = Vec::new();
    let mut space_set: FxHashSet<&str> = FxHashSet::default();
    let mut storey_set: FxHashSet<&str> = FxHashSet::default();
    let mut ignored_seen = 0usize;

    for triple in store.iter() {
        if triple.predicate != RDF_TYPE {
            continue;
        }
        let Some(class) = triple.object.as_iri() else {
            continue;
        };
        let subject = triple.subject.as_str();
        if vocab.is_space_class(class) {
            if space_set.insert(subject) {
                space_subjects.push(subject);
            }
        } else if vocab.is_storey_class(class) {
            if storey_set.insert(subject) {
                storey_subjects.push(subject);
            }
        } else if vocab.is_ignored_class(class) {
            ignored_seen += 1;
        }
    }

    if !store.is_empty() && space_subjects.is_empty() && storey_subjects.is_empty() && ignored_seen == 0
    {
        return Err(Error::InputInvalid(
            "no subject carries a recognized building-topology type".to_string(),
        ));
    }

    // Pass 2: literal attributes of typed subjects.
    let mut info: FxHashMap<&str, SubjectInfo> = FxHashMap::default();
    for triple in store.iter() {
        let subject = triple.subject.as_str();
        if !space_set.contains(subject) && !storey_set.contains(subject) {
            continue;
        }
        let entry = info.entry(subject).or_default();
        let predicate = triple.predicate.as_str();
        if vocab.is_name_prop(predicate) {
            if entry.name.is_none() {
                entry.name = triple.object.as_literal().map(str::to_string);
            }
        } else if vocab.is_area_prop(predicate) {
            match triple.object.as_f64() {
                Some(value) if entry.area.is_none() => entry.area = Some(value),
                Some(_) => {}
                None => diagnostics.push(Diagnostic::warning(
                    "invalid-literal",
                    format!("area target on {subject} is not a number"),
                    &[subject],
                )),
            }
        } else if vocab.is_elevation_prop(predicate) {
            match triple.object.as_f64() {
                Some(value) if entry.elevation.is_none() => entry.elevation = Some(value),
                Some(_) => {}
                None => diagnostics.push(Diagnostic::warning(
                    "invalid-literal",
                    format!("elevation on {subject} is not a number"),
                    &[subject],
                )),
            }
        } else if vocab.is_category_prop(predicate) {
            if entry.category.is_none() {
                entry.category = match &triple.object {
                    Term::Literal(value) => Some(value.clone()),
                    Term::Iri(iri) => Some(local_name(iri).to_string()),
                };
            }
        }
    }

    // Pass 3: containment, in either asserted direction.
    let mut containment: FxHashMap<String, String> = FxHashMap::default();
    let mut cycles: Vec<(String, String)> = Vec::new();

    fn assign(
        space_subject: &str,
        storey_subject: &str,
        containment: &mut FxHashMap<String, String>,
        diagnostics: &mut Diagnostics,
    ) {
        let storey_id = local_name(storey_subject).to_string();
        if let Some(existing) = containment.get(space_subject) {
            if *existing != storey_id {
                diagnostics.push(Diagnostic::warning(
                    "conflicting-containment",
                    format!("{space_subject} is assigned to more than one storey"),
                    &[space_subject, existing.as_str(), storey_id.as_str()],
                ));
            }
            return;
        }
        containment.insert(space_subject.to_string(), storey_id);
    }

    for triple in store.iter() {
        let predicate = triple.predicate.as_str();
        let subject = triple.subject.as_str();
        let Some(object) = triple.object.as_iri() else {
            continue;
        };

        if vocab.is_space_to_storey_prop(predicate) {
            if space_set.contains(subject) && storey_set.contains(object) {
                assign(subject, object, &mut containment, &mut diagnostics);
            } else if storey_set.contains(subject) && space_set.contains(object) {
                // A storey asserted to sit inside a space.
                cycles.push((local_name(subject).to_string(), local_name(object).to_string()));
            }
        } else if vocab.is_storey_to_space_prop(predicate) {
            if storey_set.contains(subject) && space_set.contains(object) {
                assign(object, subject, &mut containment, &mut diagnostics);
            } else if space_set.contains(subject) && storey_set.contains(object) {
                cycles.push((local_name(object).to_string(), local_name(subject).to_string()));
            }
        }
    }

    // Assemble storeys, elevation-sorted with assigned ordering index.
    let mut storeys: Vec<Storey> = storey_subjects
        .iter()
        .map(|subject| {
            let entry = info.get(subject);
            Storey {
                id: local_name(subject).to_string(),
                name: entry.and_then(|e| e.name.clone()),
                elevation: entry.and_then(|e| e.elevation).unwrap_or(0.0),
                index: 0,
            }
        })
        .collect();

    let needs_default = space_subjects
        .iter()
        .any(|subject| !containment.contains_key(*subject));
    if needs_default && !space_subjects.is_empty() {
        storeys.push(Storey {
            id: DEFAULT_STOREY_ID.to_string(),
            name: None,
            elevation: 0.0,
            index: 0,
        });
    }

    storeys.sort_by(|a, b| {
        a.elevation
            .partial_cmp(&b.elevation)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    for (index, storey) in storeys.iter_mut().enumerate() {
        storey.index = index;
    }

    // Assemble spaces in subject order.
    let spaces: Vec<Space> = space_subjects
        .iter()
        .map(|subject| {
            let entry = info.get(subject);
            Space {
                id: local_name(subject).to_string(),
                name: entry.and_then(|e| e.name.clone()),
                category: entry.and_then(|e| e.category.clone()),
                target_area: entry.and_then(|e| e.area),
                storey_id: containment
                    .get(*subject)
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_STOREY_ID.to_string()),
            }
        })
        .collect();

    // Pass 4: undirected edges, deduplicated as unordered pairs.
    let mut edges: Vec<Edge> = Vec::new();
    let mut edge_set: FxHashSet<Edge> = FxHashSet::default();
    let mut add_edge = |kind: EdgeKind,
                        subject: &str,
                        object: &str,
                        edges: &mut Vec<Edge>,
                        edge_set: &mut FxHashSet<Edge>,
                        diagnostics: &mut Diagnostics| {
        if !space_set.contains(subject) || !space_set.contains(object) {
            warn!(subject, object, "dropping edge with unknown endpoint");
            diagnostics.push(Diagnostic::warning(
                "unknown-edge-endpoint",
                "edge endpoint is not a known space",
                &[subject, object],
            ));
            return;
        }
        let a = local_name(subject);
        let b = local_name(object);
        if a == b {
            diagnostics.push(Diagnostic::warning(
                "self-referential-edge",
                format!("edge connects {a} to itself"),
                &[subject, object],
            ));
            return;
        }
        let edge = Edge::new(kind, a, b);
        if edge_set.insert(edge.clone()) {
            edges.push(edge);
        }
    };

    for triple in store.iter() {
        let predicate = triple.predicate.as_str();
        let Some(object) = triple.object.as_iri() else {
            continue;
        };
        if vocab.is_adjacency_prop(predicate) {
            add_edge(
                EdgeKind::Adjacency,
                &triple.subject,
                object,
                &mut edges,
                &mut edge_set,
                &mut diagnostics,
            );
        } else if vocab.is_connection_prop(predicate) {
            add_edge(
                EdgeKind::Connection,
                &triple.subject,
                object,
                &mut edges,
                &mut edge_set,
                &mut diagnostics,
            );
        }
    }

    debug!(
        storeys = storeys.len(),
        spaces = spaces.len(),
        edges = edges.len(),
        warnings = diagnostics.len(),
        "topology extracted"
    );

    let topology = Topology::new(storeys, spaces, edges).with_containment_cycles(cycles);
    Ok((topology, diagnostics))
}
