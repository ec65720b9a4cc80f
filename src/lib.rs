//! Kindred – an in-memory genealogical entity graph with privacy inference
//! and partial/fuzzy date reasoning.
//!
//! Kindred consumes a graph populated by an external loader (a GEDCOM or
//! Gramps importer, say) and offers the pieces a site renderer needs before
//! anything may be published:
//! * A [`construct::Thing`] is an opaque identity (a simple `u64`).
//! * Entity kinds ([`construct::Person`], [`construct::Event`],
//!   [`construct::Source`], [`construct::Citation`], [`construct::File`],
//!   [`construct::Place`], and friends) are owned and deduplicated by
//!   "keeper" structures inside the [`construct::Ancestry`] aggregate.
//! * Associations between entities are non-owning and bidirectional, all
//!   maintained by one shared [`construct::Association`] utility so that a
//!   link added on one side always has its mirror on the other.
//! * [`datey::Datey`] models possibly-partial, possibly-fuzzy dates and
//!   date ranges with a widening partial order and overlap checks.
//! * The [`privatize::Privatizer`] resolves every unset privacy flag in a
//!   single idempotent pass, flowing privacy downward from living people to
//!   the records and media that document them.
//!
//! ## Modules
//! * [`construct`] – Identities, entity kinds, keepers, associations and
//!   the [`construct::Ancestry`] aggregate.
//! * [`datey`] – [`datey::Date`], [`datey::DateRange`] and the
//!   [`datey::Datey`] union, plus the dateval literal parser.
//! * [`format`] – Locale-aware rendering of datey values via an externally
//!   supplied [`format::Localization`] context.
//! * [`privatize`] – The privacy inference pass.
//! * [`settings`] – File/environment-backed configuration.
//!
//! ## Quick Start
//! ```
//! use kindred::construct::{Ancestry, EventType, Role};
//! use kindred::datey::Date;
//! use kindred::privatize::privatize;
//!
//! let mut ancestry = Ancestry::new();
//! let person = ancestry.create_person(Some("P0"));
//! let death = ancestry.create_event(None, EventType::Death, Some(Date::from_ymd(1887, 3, 1).into()));
//! ancestry.add_presence(person, Role::Subject, death);
//! privatize(&mut ancestry);
//! assert!(ancestry.person(person).unwrap().private().is_public());
//! ```
//!
//! ## Scope
//! Rendering, import adapters, asset caching and the preview server are the
//! surrounding application's concern; this crate never touches the
//! filesystem or the network. The engine is synchronous and single-threaded:
//! the privacy pass mutates the graph in place and must complete before a
//! renderer reads the flags.

pub mod construct;
pub mod datey;
pub mod error;
pub mod format;
pub mod privatize;
pub mod settings;
