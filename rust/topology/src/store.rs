// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Neutral triple-store input model.
//!
//! The pipeline consumes an already-parsed RDF graph; this type is the
//! library-independent hand-off format. Triples are indexed by subject and by
//! predicate so the extractor can walk them without repeated scans. Iteration
//! order follows insertion order, which keeps extraction deterministic for a
//! fixed input.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// The `rdf:type` predicate.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// Object position of a triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    /// A resource reference.
    Iri(String),
    /// A literal value, stored in lexical form.
    Literal(String),
}

impl Term {
    /// The IRI string, when this term is a resource.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            Term::Literal(_) => None,
        }
    }

    /// The literal lexical form, when this term is a literal.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Term::Iri(_) => None,
            Term::Literal(value) => Some(value),
        }
    }

    /// Parses the literal as an `f64`, when possible.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_literal().and_then(|v| v.trim().parse().ok())
    }
}

/// A single subject–predicate–object statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: Term,
}

/// An indexed, in-memory set of triples.
#[derive(Debug, Clone, Default)]
pub struct TripleStore {
    triples: Vec<Triple>,
    by_subject: FxHashMap<String, Vec<usize>>,
    by_predicate: FxHashMap<String, Vec<usize>>,
}

impl TripleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts one triple, updating both indexes.
    pub fn insert(&mut self, subject: impl Into<String>, predicate: impl Into<String>, object: Term) {
        let subject = subject.into();
        let predicate = predicate.into();
        let idx = self.triples.len();
        self.by_subject.entry(subject.clone()).or_default().push(idx);
        self.by_predicate
            .entry(predicate.clone())
            .or_default()
            .push(idx);
        self.triples.push(Triple {
            subject,
            predicate,
            object,
        });
    }

    /// Convenience: inserts a triple with an IRI object.
    pub fn insert_iri(
        &mut self,
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) {
        self.insert(subject, predicate, Term::Iri(object.into()));
    }

    /// Convenience: inserts a triple with a literal object.
    pub fn insert_literal(
        &mut self,
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) {
        self.insert(subject, predicate, Term::Literal(object.into()));
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// All `rdf:type` class IRIs declared for a subject.
    pub fn types_of(&self, subject: &str) -> Vec<&str> {
        self.objects(subject, RDF_TYPE)
            .into_iter()
            .filter_map(Term::as_iri)
            .collect()
    }

    /// Objects of all `(subject, predicate, _)` triples, in insertion order.
    pub fn objects(&self, subject: &str, predicate: &str) -> Vec<&Term> {
        self.by_subject
            .get(subject)
            .map(|indices| {
                indices
                    .iter()
                    .map(|&i| &self.triples[i])
                    .filter(|t| t.predicate == predicate)
                    .map(|t| &t.object)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All `(subject, object)` pairs for a predicate, in insertion order.
    pub fn pairs(&self, predicate: &str) -> Vec<(&str, &Term)> {
        self.by_predicate
            .get(predicate)
            .map(|indices| {
                indices
                    .iter()
                    .map(|&i| {
                        let t = &self.triples[i];
                        (t.subject.as_str(), &t.object)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Subjects declared with `rdf:type <class>`, in insertion order.
    pub fn subjects_of_type(&self, class: &str) -> Vec<&str> {
        self.by_predicate
            .get(RDF_TYPE)
            .map(|indices| {
                indices
                    .iter()
                    .map(|&i| &self.triples[i])
                    .filter(|t| t.object.as_iri() == Some(class))
                    .map(|t| t.subject.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Local name of an IRI: the part after the last `#`, `/` or `:`.
pub fn local_name(iri: &str) -> &str {
    iri.rfind(&['#', '/', ':'][..])
        .map(|i| &iri[i + 1..])
        .filter(|s| !s.is_empty())
        .unwrap_or(iri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_query() {
        let mut store = TripleStore::new();
        store.insert_iri("urn:ex:A", RDF_TYPE, "https://w3id.org/bot#Space");
        store.insert_literal("urn:ex:A", "https://graph2ifc.dev/ns#targetArea", "16.0");

        assert_eq!(store.len(), 2);
        assert_eq!(store.types_of("urn:ex:A"), vec!["https://w3id.org/bot#Space"]);
        assert_eq!(
            store.subjects_of_type("https://w3id.org/bot#Space"),
            vec!["urn:ex:A"]
        );
        let areas = store.objects("urn:ex:A", "https://graph2ifc.dev/ns#targetArea");
        assert_eq!(areas.len(), 1);
        assert_eq!(areas[0].as_f64(), Some(16.0));
    }

    #[test]
    fn pairs_preserve_insertion_order() {
        let mut store = TripleStore::new();
        store.insert_iri("urn:ex:A", "p", "urn:ex:B");
        store.insert_iri("urn:ex:C", "p", "urn:ex:D");
        let pairs = store.pairs("p");
        assert_eq!(pairs[0].0, "urn:ex:A");
        assert_eq!(pairs[1].0, "urn:ex:C");
    }

    #[test]
    fn literal_parsing() {
        assert_eq!(Term::Literal(" 3.25 ".to_string()).as_f64(), Some(3.25));
        assert_eq!(Term::Literal("tall".to_string()).as_f64(), None);
        assert_eq!(Term::Iri("urn:x".to_string()).as_f64(), None);
    }

    #[test]
    fn local_names() {
        assert_eq!(local_name("https://w3id.org/bot#Space"), "Space");
        assert_eq!(local_name("https://brickschema.org/schema/Brick/Room"), "Room");
        assert_eq!(local_name("urn:ex:R1"), "R1");
        assert_eq!(local_name("plain"), "plain");
    }
}
