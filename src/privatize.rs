//! Privacy inference over an [`Ancestry`].
//!
//! The privatizer runs once as a post-load pass and resolves every unset
//! privacy flag to a definite value; explicitly flagged entities are left
//! untouched, which also makes the pass idempotent. Privacy flows downward
//! from people to the records and media documenting them, never upward or
//! sideways: a private subject makes an event private, a private event does
//! not make an unrelated attendee private.
//!
//! Each entity kind is resolved in one flat pass, kinds ordered so that a
//! rule only ever reads flags that are already final (people, then sources,
//! events, citations, files). People are judged from their own subject-role
//! presences alone; the parent/child graph may contain cycles and is
//! deliberately not walked.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{Datelike, Local, NaiveDate};
use tracing::{debug, info};

use crate::construct::{Ancestry, Privacy, Role, Thing, ThingHasher};
use crate::datey::{Date, Datey};
use crate::settings::Settings;

/// People without evidence of an event this many years in the past are
/// assumed to still be alive.
pub const DEFAULT_LIFETIME_THRESHOLD: u16 = 125;

/// Runs privacy inference with the default lifetime threshold.
pub fn privatize(ancestry: &mut Ancestry) {
    Privatizer::new().privatize(ancestry)
}

pub struct Privatizer {
    lifetime_threshold: u16,
    today: NaiveDate,
}

impl Privatizer {
    pub fn new() -> Self {
        Self::with_lifetime_threshold(DEFAULT_LIFETIME_THRESHOLD)
    }
    pub fn with_lifetime_threshold(lifetime_threshold: u16) -> Self {
        Self {
            lifetime_threshold,
            today: Local::now().date_naive(),
        }
    }
    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_lifetime_threshold(settings.lifetime_threshold)
    }
    // pins "now", so expiry becomes reproducible in tests
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn privatize(&self, ancestry: &mut Ancestry) {
        let people = self.privatize_people(ancestry);
        let sources = self.privatize_sources(ancestry);
        let events = self.privatize_events(ancestry);
        let citations = self.privatize_citations(ancestry);
        let files = self.privatize_files(ancestry);
        info!(
            people,
            sources, events, citations, files, "privacy inference complete"
        );
    }

    // ---- people ----
    fn privatize_people(&self, ancestry: &mut Ancestry) -> usize {
        let mut privatized = 0;
        for person in ancestry.person_things() {
            if !ancestry
                .person(person)
                .is_some_and(|kept| kept.private().is_unknown())
            {
                continue;
            }
            let private = self.person_is_private(ancestry, person);
            if let Some(kept) = ancestry.person_mut(person) {
                kept.set_private(if private {
                    Privacy::Private
                } else {
                    Privacy::Public
                });
            }
            if private {
                privatized += 1;
            }
        }
        debug!(privatized, "people resolved");
        privatized
    }

    /// A person is private unless some subject-role event proves otherwise:
    /// an end-of-life event that is undated or lies in the past, or any
    /// event more than a lifetime ago.
    fn person_is_private(&self, ancestry: &Ancestry, person: Thing) -> bool {
        for &presence in ancestry.presences_of_person(person) {
            if !ancestry
                .presence(presence)
                .is_some_and(|kept| kept.role() == Role::Subject)
            {
                continue;
            }
            // a presence without an event carries no information
            let Some(event) = ancestry
                .event_of_presence(presence)
                .and_then(|thing| ancestry.event(thing))
            else {
                continue;
            };
            if event.event_type().is_end_of_life() {
                match event.date() {
                    None => return false,
                    Some(date) => {
                        if self.has_expired(date, 0) {
                            return false;
                        }
                    }
                }
            }
            if let Some(date) = event.date() {
                if self.has_expired(date, 1) {
                    return false;
                }
            }
        }
        true
    }

    /// Whether the datey value certainly lies at least `multiplier`
    /// lifetimes in the past. A range can only prove expiry through its end
    /// date; a start alone says nothing about when the event concluded.
    fn has_expired(&self, datey: &Datey, multiplier: u16) -> bool {
        let date = match datey {
            Datey::Date(date) => Some(date),
            Datey::Range(range) => range.end(),
        };
        match date {
            Some(date) if date.comparable() => {
                // the horizon date itself counts as expired
                matches!(
                    date.partial_cmp(&self.horizon(multiplier)),
                    Some(Ordering::Less | Ordering::Equal)
                )
            }
            _ => false,
        }
    }

    fn horizon(&self, multiplier: u16) -> Date {
        Date::from_ymd(
            self.today.year() - (self.lifetime_threshold as i32) * (multiplier as i32),
            self.today.month(),
            self.today.day(),
        )
    }

    // ---- sources ----
    fn privatize_sources(&self, ancestry: &mut Ancestry) -> usize {
        let mut privatized = 0;
        for source in ancestry.source_things() {
            if !ancestry
                .source(source)
                .is_some_and(|kept| kept.private().is_unknown())
            {
                continue;
            }
            let private = source_is_private(ancestry, source);
            if let Some(kept) = ancestry.source_mut(source) {
                kept.set_private(if private {
                    Privacy::Private
                } else {
                    Privacy::Public
                });
            }
            if private {
                privatized += 1;
            }
        }
        debug!(privatized, "sources resolved");
        privatized
    }

    // ---- events ----
    fn privatize_events(&self, ancestry: &mut Ancestry) -> usize {
        let mut privatized = 0;
        for event in ancestry.event_things() {
            if !ancestry
                .event(event)
                .is_some_and(|kept| kept.private().is_unknown())
            {
                continue;
            }
            let private = event_is_private(ancestry, event);
            if let Some(kept) = ancestry.event_mut(event) {
                kept.set_private(if private {
                    Privacy::Private
                } else {
                    Privacy::Public
                });
            }
            if private {
                privatized += 1;
            }
        }
        debug!(privatized, "events resolved");
        privatized
    }

    // ---- citations ----
    fn privatize_citations(&self, ancestry: &mut Ancestry) -> usize {
        let mut privatized = 0;
        for citation in ancestry.citation_things() {
            if !ancestry
                .citation(citation)
                .is_some_and(|kept| kept.private().is_unknown())
            {
                continue;
            }
            let private = ancestry
                .source_of_citation(citation)
                .and_then(|source| ancestry.source(source))
                .is_some_and(|source| source.private().is_private());
            if let Some(kept) = ancestry.citation_mut(citation) {
                kept.set_private(if private {
                    Privacy::Private
                } else {
                    Privacy::Public
                });
            }
            if private {
                privatized += 1;
            }
        }
        debug!(privatized, "citations resolved");
        privatized
    }

    // ---- files ----
    fn privatize_files(&self, ancestry: &mut Ancestry) -> usize {
        let mut privatized = 0;
        for file in ancestry.file_things() {
            if !ancestry
                .file(file)
                .is_some_and(|kept| kept.private().is_unknown())
            {
                continue;
            }
            let private = file_is_private(ancestry, file);
            if let Some(kept) = ancestry.file_mut(file) {
                kept.set_private(if private {
                    Privacy::Private
                } else {
                    Privacy::Public
                });
            }
            if private {
                privatized += 1;
            }
        }
        debug!(privatized, "files resolved");
        privatized
    }
}

impl Default for Privatizer {
    fn default() -> Self {
        Self::new()
    }
}

/// A source inherits privacy from the nearest transitively containing source
/// that carries a decided flag. Malformed containment cycles end the walk.
fn source_is_private(ancestry: &Ancestry, source: Thing) -> bool {
    let mut seen: HashSet<Thing, ThingHasher> = HashSet::default();
    seen.insert(source);
    let mut cursor = ancestry.container_of_source(source);
    while let Some(container) = cursor {
        if !seen.insert(container) {
            break;
        }
        match ancestry.source(container).map(|kept| kept.private()) {
            Some(Privacy::Private) => return true,
            Some(Privacy::Public) => return false,
            _ => (),
        }
        cursor = ancestry.container_of_source(container);
    }
    false
}

/// An event is private when any subject-role participant is; other roles do
/// not contribute.
fn event_is_private(ancestry: &Ancestry, event: Thing) -> bool {
    ancestry.presences_of_event(event).iter().any(|&presence| {
        ancestry
            .presence(presence)
            .is_some_and(|kept| kept.role() == Role::Subject)
            && ancestry
                .person_of_presence(presence)
                .and_then(|person| ancestry.person(person))
                .is_some_and(|person| person.private().is_private())
    })
}

/// Privacy flows from the fact record to attached media: a file is private
/// when any event, citation or source it is attached to is.
fn file_is_private(ancestry: &Ancestry, file: Thing) -> bool {
    ancestry.owners_of_file(file).iter().any(|&owner| {
        ancestry
            .event(owner)
            .map(|kept| kept.private())
            .or_else(|| ancestry.citation(owner).map(|kept| kept.private()))
            .or_else(|| ancestry.source(owner).map(|kept| kept.private()))
            .is_some_and(|privacy| privacy.is_private())
    })
}
