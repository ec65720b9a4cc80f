use std::collections::hash_set::Iter;
use std::collections::{HashMap, HashSet};
use std::hash::BuildHasherDefault;
use std::path::{Path, PathBuf};

// used to keep the two-way mapping between stable entity ids and things
use bimap::BiMap;

// we will use a fast hashing algo for maps and sets keyed by Things
use seahash::SeaHasher;

// used to print out readable forms of a construct
use std::fmt;

use crate::datey::Datey;

// ------------- Thing -------------
pub type Thing = u64;

pub type ThingHasher = BuildHasherDefault<SeaHasher>;

pub const GENESIS: Thing = 0;

#[derive(Debug, Default)]
pub struct ThingGenerator {
    lower_bound: Thing,
    retained: HashSet<Thing, ThingHasher>,
    released: Vec<Thing>,
}

impl ThingGenerator {
    pub fn new() -> Self {
        Self {
            lower_bound: GENESIS,
            retained: HashSet::default(),
            released: Vec::new(),
        }
    }
    // A loader that restores a previously exported graph may bring its own
    // identities, which must be retained so they are never handed out again.
    pub fn retain(&mut self, thing: Thing) {
        self.retained.insert(thing);
        if thing > self.lower_bound {
            self.lower_bound = thing;
        }
    }
    pub fn check(&self, thing: Thing) -> Option<Thing> {
        self.retained.get(&thing).copied()
    }
    pub fn release(&mut self, thing: Thing) {
        if self.retained.remove(&thing) {
            self.released.push(thing);
        }
    }
    pub fn generate(&mut self) -> Thing {
        self.released.pop().unwrap_or_else(|| {
            self.lower_bound += 1;
            self.retained.insert(self.lower_bound);
            self.lower_bound
        })
    }
    pub fn iter(&self) -> Iter<Thing> {
        self.retained.iter()
    }
}

// ------------- Privacy -------------
/// The ternary visibility flag carried by privacy-aware entities. `Unknown`
/// is distinct from `Public`: only `Unknown` flags are ever computed by the
/// privatizer, while explicit flags are left untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Privacy {
    #[default]
    Unknown,
    Private,
    Public,
}

impl Privacy {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Privacy::Unknown)
    }
    pub fn is_private(&self) -> bool {
        matches!(self, Privacy::Private)
    }
    pub fn is_public(&self) -> bool {
        matches!(self, Privacy::Public)
    }
    pub fn resolved(&self) -> Option<bool> {
        match self {
            Privacy::Unknown => None,
            Privacy::Private => Some(true),
            Privacy::Public => Some(false),
        }
    }
    pub fn of(flag: Option<bool>) -> Self {
        match flag {
            None => Privacy::Unknown,
            Some(true) => Privacy::Private,
            Some(false) => Privacy::Public,
        }
    }
}

impl fmt::Display for Privacy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Privacy::Unknown => write!(f, "unknown"),
            Privacy::Private => write!(f, "private"),
            Privacy::Public => write!(f, "public"),
        }
    }
}

// ------------- Role -------------
/// The capacity in which a person took part in an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Subject,
    Witness,
    Beneficiary,
    Attendee,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Role::Subject => "subject",
            Role::Witness => "witness",
            Role::Beneficiary => "beneficiary",
            Role::Attendee => "attendee",
        }
    }
    pub fn label(&self) -> &'static str {
        match self {
            Role::Subject => "Subject",
            Role::Witness => "Witness",
            Role::Beneficiary => "Beneficiary",
            Role::Attendee => "Attendee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ------------- EventType -------------
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    Birth,
    Baptism,
    Adoption,
    Death,
    Funeral,
    Cremation,
    Burial,
    Will,
    Engagement,
    Marriage,
    MarriageAnnouncement,
    Divorce,
    DivorceAnnouncement,
    Residence,
    Immigration,
    Emigration,
    Occupation,
    Retirement,
    Correspondence,
    Confirmation,
    Missing,
    Unknown,
}

impl EventType {
    pub fn name(&self) -> &'static str {
        match self {
            EventType::Birth => "birth",
            EventType::Baptism => "baptism",
            EventType::Adoption => "adoption",
            EventType::Death => "death",
            EventType::Funeral => "funeral",
            EventType::Cremation => "cremation",
            EventType::Burial => "burial",
            EventType::Will => "will",
            EventType::Engagement => "engagement",
            EventType::Marriage => "marriage",
            EventType::MarriageAnnouncement => "marriage-announcement",
            EventType::Divorce => "divorce",
            EventType::DivorceAnnouncement => "divorce-announcement",
            EventType::Residence => "residence",
            EventType::Immigration => "immigration",
            EventType::Emigration => "emigration",
            EventType::Occupation => "occupation",
            EventType::Retirement => "retirement",
            EventType::Correspondence => "correspondence",
            EventType::Confirmation => "confirmation",
            EventType::Missing => "missing",
            EventType::Unknown => "unknown",
        }
    }
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Birth => "Birth",
            EventType::Baptism => "Baptism",
            EventType::Adoption => "Adoption",
            EventType::Death => "Death",
            EventType::Funeral => "Funeral",
            EventType::Cremation => "Cremation",
            EventType::Burial => "Burial",
            EventType::Will => "Will",
            EventType::Engagement => "Engagement",
            EventType::Marriage => "Marriage",
            EventType::MarriageAnnouncement => "Announcement of marriage",
            EventType::Divorce => "Divorce",
            EventType::DivorceAnnouncement => "Announcement of divorce",
            EventType::Residence => "Residence",
            EventType::Immigration => "Immigration",
            EventType::Emigration => "Emigration",
            EventType::Occupation => "Occupation",
            EventType::Retirement => "Retirement",
            EventType::Correspondence => "Correspondence",
            EventType::Confirmation => "Confirmation",
            EventType::Missing => "Missing",
            EventType::Unknown => "Unknown",
        }
    }
    /// Whether the event closes a life: death or a final disposition.
    pub fn is_end_of_life(&self) -> bool {
        matches!(
            self,
            EventType::Death | EventType::Burial | EventType::Cremation
        )
    }
    pub fn is_start_of_life(&self) -> bool {
        matches!(self, EventType::Birth | EventType::Baptism)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ------------- Constructs -------------
/// Anything kept by a [`Keeper`]: a thing with a stable string id, unique
/// within its own kind.
pub trait Construct {
    fn thing(&self) -> Thing;
    fn id(&self) -> &str;
}

#[derive(Debug)]
pub struct Person {
    person: Thing,
    id: String,
    private: Privacy,
}

impl Person {
    pub fn new(person: Thing, id: String) -> Self {
        Self {
            person,
            id,
            private: Privacy::Unknown,
        }
    }
    pub fn person(&self) -> Thing {
        self.person
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn private(&self) -> Privacy {
        self.private
    }
    pub fn set_private(&mut self, private: Privacy) {
        self.private = private;
    }
}

impl Construct for Person {
    fn thing(&self) -> Thing {
        self.person
    }
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug)]
pub struct PersonName {
    name: Thing,
    id: String,
    individual: Option<String>,
    affiliation: Option<String>,
    locale: Option<String>,
}

impl PersonName {
    pub fn new(
        name: Thing,
        id: String,
        individual: Option<String>,
        affiliation: Option<String>,
    ) -> Self {
        Self {
            name,
            id,
            individual,
            affiliation,
            locale: None,
        }
    }
    pub fn name(&self) -> Thing {
        self.name
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn individual(&self) -> Option<&str> {
        self.individual.as_deref()
    }
    pub fn affiliation(&self) -> Option<&str> {
        self.affiliation.as_deref()
    }
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }
    pub fn set_locale(&mut self, locale: Option<String>) {
        self.locale = locale;
    }
    // names sort by family name first, the way name indexes are printed
    pub fn sort_key(&self) -> (&str, &str) {
        (
            self.affiliation.as_deref().unwrap_or(""),
            self.individual.as_deref().unwrap_or(""),
        )
    }
}

impl Construct for PersonName {
    fn thing(&self) -> Thing {
        self.name
    }
    fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.individual, &self.affiliation) {
            (Some(individual), Some(affiliation)) => write!(f, "{} {}", individual, affiliation),
            (Some(individual), None) => write!(f, "{}", individual),
            (None, Some(affiliation)) => write!(f, "{}", affiliation),
            (None, None) => write!(f, "?"),
        }
    }
}

/// Binds one person to one event in a named role. The person and event ends
/// live in associations and either may be absent in malformed data.
#[derive(Debug)]
pub struct Presence {
    presence: Thing,
    id: String,
    role: Role,
}

impl Presence {
    pub fn new(presence: Thing, id: String, role: Role) -> Self {
        Self { presence, id, role }
    }
    pub fn presence(&self) -> Thing {
        self.presence
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn role(&self) -> Role {
        self.role
    }
}

impl Construct for Presence {
    fn thing(&self) -> Thing {
        self.presence
    }
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug)]
pub struct Event {
    event: Thing,
    id: String,
    event_type: EventType,
    date: Option<Datey>,
    description: Option<String>,
    private: Privacy,
}

impl Event {
    pub fn new(event: Thing, id: String, event_type: EventType, date: Option<Datey>) -> Self {
        Self {
            event,
            id,
            event_type,
            date,
            description: None,
            private: Privacy::Unknown,
        }
    }
    pub fn event(&self) -> Thing {
        self.event
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn event_type(&self) -> EventType {
        self.event_type
    }
    pub fn date(&self) -> Option<&Datey> {
        self.date.as_ref()
    }
    pub fn set_date(&mut self, date: Option<Datey>) {
        self.date = date;
    }
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }
    pub fn private(&self) -> Privacy {
        self.private
    }
    pub fn set_private(&mut self, private: Privacy) {
        self.private = private;
    }
}

impl Construct for Event {
    fn thing(&self) -> Thing {
        self.event
    }
    fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.date {
            Some(date) => write!(f, "{} ({})", self.event_type, date),
            None => write!(f, "{}", self.event_type),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlaceName {
    name: String,
    locale: Option<String>,
    date: Option<Datey>,
}

impl PlaceName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locale: None,
            date: None,
        }
    }
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
    pub fn with_date(mut self, date: Datey) -> Self {
        self.date = Some(date);
        self
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }
    pub fn date(&self) -> Option<&Datey> {
        self.date.as_ref()
    }
}

impl fmt::Display for PlaceName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug)]
pub struct Place {
    place: Thing,
    id: String,
    names: Vec<PlaceName>,
    coordinates: Option<(f64, f64)>,
}

impl Place {
    pub fn new(place: Thing, id: String, names: Vec<PlaceName>) -> Self {
        Self {
            place,
            id,
            names,
            coordinates: None,
        }
    }
    pub fn place(&self) -> Thing {
        self.place
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn names(&self) -> &[PlaceName] {
        &self.names
    }
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.coordinates
    }
    pub fn set_coordinates(&mut self, coordinates: Option<(f64, f64)>) {
        self.coordinates = coordinates;
    }
}

impl Construct for Place {
    fn thing(&self) -> Thing {
        self.place
    }
    fn id(&self) -> &str {
        &self.id
    }
}

/// Reifies one place lying within another, so the containment itself can be
/// dated.
#[derive(Debug)]
pub struct Enclosure {
    enclosure: Thing,
    id: String,
    date: Option<Datey>,
}

impl Enclosure {
    pub fn new(enclosure: Thing, id: String) -> Self {
        Self {
            enclosure,
            id,
            date: None,
        }
    }
    pub fn enclosure(&self) -> Thing {
        self.enclosure
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn date(&self) -> Option<&Datey> {
        self.date.as_ref()
    }
    pub fn set_date(&mut self, date: Option<Datey>) {
        self.date = date;
    }
}

impl Construct for Enclosure {
    fn thing(&self) -> Thing {
        self.enclosure
    }
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug)]
pub struct Source {
    source: Thing,
    id: String,
    name: Option<String>,
    author: Option<String>,
    publisher: Option<String>,
    date: Option<Datey>,
    private: Privacy,
}

impl Source {
    pub fn new(source: Thing, id: String, name: Option<String>) -> Self {
        Self {
            source,
            id,
            name,
            author: None,
            publisher: None,
            date: None,
            private: Privacy::Unknown,
        }
    }
    pub fn source(&self) -> Thing {
        self.source
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }
    pub fn set_author(&mut self, author: Option<String>) {
        self.author = author;
    }
    pub fn publisher(&self) -> Option<&str> {
        self.publisher.as_deref()
    }
    pub fn set_publisher(&mut self, publisher: Option<String>) {
        self.publisher = publisher;
    }
    pub fn date(&self) -> Option<&Datey> {
        self.date.as_ref()
    }
    pub fn set_date(&mut self, date: Option<Datey>) {
        self.date = date;
    }
    pub fn private(&self) -> Privacy {
        self.private
    }
    pub fn set_private(&mut self, private: Privacy) {
        self.private = private;
    }
}

impl Construct for Source {
    fn thing(&self) -> Thing {
        self.source
    }
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug)]
pub struct Citation {
    citation: Thing,
    id: String,
    location: Option<String>,
    date: Option<Datey>,
    private: Privacy,
}

impl Citation {
    pub fn new(citation: Thing, id: String) -> Self {
        Self {
            citation,
            id,
            location: None,
            date: None,
            private: Privacy::Unknown,
        }
    }
    pub fn citation(&self) -> Thing {
        self.citation
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
    pub fn set_location(&mut self, location: Option<String>) {
        self.location = location;
    }
    pub fn date(&self) -> Option<&Datey> {
        self.date.as_ref()
    }
    pub fn set_date(&mut self, date: Option<Datey>) {
        self.date = date;
    }
    pub fn private(&self) -> Privacy {
        self.private
    }
    pub fn set_private(&mut self, private: Privacy) {
        self.private = private;
    }
}

impl Construct for Citation {
    fn thing(&self) -> Thing {
        self.citation
    }
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug)]
pub struct File {
    file: Thing,
    id: String,
    path: PathBuf,
    media_type: Option<String>,
    description: Option<String>,
    private: Privacy,
}

impl File {
    pub fn new(file: Thing, id: String, path: impl Into<PathBuf>) -> Self {
        Self {
            file,
            id,
            path: path.into(),
            media_type: None,
            description: None,
            private: Privacy::Unknown,
        }
    }
    pub fn file(&self) -> Thing {
        self.file
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }
    pub fn set_media_type(&mut self, media_type: Option<String>) {
        self.media_type = media_type;
    }
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }
    pub fn private(&self) -> Privacy {
        self.private
    }
    pub fn set_private(&mut self, private: Privacy) {
        self.private = private;
    }
}

impl Construct for File {
    fn thing(&self) -> Thing {
        self.file
    }
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug)]
pub struct Note {
    note: Thing,
    id: String,
    text: String,
}

impl Note {
    pub fn new(note: Thing, id: String, text: String) -> Self {
        Self { note, id, text }
    }
    pub fn note(&self) -> Thing {
        self.note
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Construct for Note {
    fn thing(&self) -> Thing {
        self.note
    }
    fn id(&self) -> &str {
        &self.id
    }
}

// ------------- Keeper -------------
/// Owns all constructs of one kind and guards id uniqueness: keeping a
/// construct whose id is already taken yields the already kept thing.
#[derive(Debug)]
pub struct Keeper<E: Construct> {
    kept: HashMap<Thing, E, ThingHasher>,
    ids: BiMap<String, Thing>,
}

impl<E: Construct> Keeper<E> {
    pub fn new() -> Self {
        Self {
            kept: HashMap::default(),
            ids: BiMap::new(),
        }
    }
    pub fn keep(&mut self, construct: E) -> (Thing, bool) {
        if let Some(&existing) = self.ids.get_by_left(construct.id()) {
            return (existing, true);
        }
        let thing = construct.thing();
        self.ids.insert(construct.id().to_owned(), thing);
        self.kept.insert(thing, construct);
        (thing, false)
    }
    pub fn get(&self, thing: Thing) -> Option<&E> {
        self.kept.get(&thing)
    }
    pub fn get_mut(&mut self, thing: Thing) -> Option<&mut E> {
        self.kept.get_mut(&thing)
    }
    pub fn by_id(&self, id: &str) -> Option<&E> {
        self.ids
            .get_by_left(id)
            .and_then(|thing| self.kept.get(thing))
    }
    pub fn thing_of(&self, id: &str) -> Option<Thing> {
        self.ids.get_by_left(id).copied()
    }
    pub fn id_of(&self, thing: Thing) -> Option<&str> {
        self.ids.get_by_right(&thing).map(String::as_str)
    }
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.kept.values()
    }
    pub fn things(&self) -> Vec<Thing> {
        self.kept.keys().copied().collect()
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}

impl<E: Construct> Default for Keeper<E> {
    fn default() -> Self {
        Self::new()
    }
}

// ------------- Association -------------
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Multiplicity {
    ManyToMany,
    // each left thing relates to at most one right thing; relinking replaces
    ManyToOne,
}

/// The one relationship utility shared by every association kind. Both
/// directions are kept in mirrored indexes: linking on one side writes the
/// mirror entry, unlinking removes both. Insertion order is preserved and
/// duplicates are refused.
#[derive(Debug)]
pub struct Association {
    multiplicity: Multiplicity,
    rights_by_left: HashMap<Thing, Vec<Thing>, ThingHasher>,
    lefts_by_right: HashMap<Thing, Vec<Thing>, ThingHasher>,
}

impl Association {
    pub fn new(multiplicity: Multiplicity) -> Self {
        Self {
            multiplicity,
            rights_by_left: HashMap::default(),
            lefts_by_right: HashMap::default(),
        }
    }
    pub fn link(&mut self, left: Thing, right: Thing) {
        if self.multiplicity == Multiplicity::ManyToOne {
            if let Some(previous) = self.right_of(left) {
                if previous == right {
                    return;
                }
                self.unlink(left, previous);
            }
        }
        let rights = self.rights_by_left.entry(left).or_default();
        if rights.contains(&right) {
            return;
        }
        rights.push(right);
        self.lefts_by_right.entry(right).or_default().push(left);
    }
    pub fn unlink(&mut self, left: Thing, right: Thing) {
        if let Some(rights) = self.rights_by_left.get_mut(&left) {
            rights.retain(|&kept| kept != right);
            if rights.is_empty() {
                self.rights_by_left.remove(&left);
            }
        }
        if let Some(lefts) = self.lefts_by_right.get_mut(&right) {
            lefts.retain(|&kept| kept != left);
            if lefts.is_empty() {
                self.lefts_by_right.remove(&right);
            }
        }
    }
    pub fn rights_of(&self, left: Thing) -> &[Thing] {
        self.rights_by_left
            .get(&left)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
    pub fn lefts_of(&self, right: Thing) -> &[Thing] {
        self.lefts_by_right
            .get(&right)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
    pub fn right_of(&self, left: Thing) -> Option<Thing> {
        self.rights_of(left).first().copied()
    }
    pub fn len(&self) -> usize {
        self.rights_by_left.values().map(Vec::len).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.rights_by_left.is_empty()
    }
}

// ------------- Ancestry -------------
/// The aggregate owning every entity reachable from it. Associations between
/// entities are non-owning links living in [`Association`] tables keyed by
/// thing, so a link can span entity kinds (a file can attach to a person,
/// an event, a source or a citation alike).
pub struct Ancestry {
    thing_generator: ThingGenerator,
    // keepers for each entity kind
    people: Keeper<Person>,
    person_names: Keeper<PersonName>,
    presences: Keeper<Presence>,
    events: Keeper<Event>,
    places: Keeper<Place>,
    enclosures: Keeper<Enclosure>,
    sources: Keeper<Source>,
    citations: Keeper<Citation>,
    files: Keeper<File>,
    notes: Keeper<Note>,
    // associations between things, all mirrored
    parenthood: Association,         // child -> parent
    presence_person: Association,    // presence -> person
    presence_event: Association,     // presence -> event
    event_place: Association,        // event -> place
    citation_source: Association,    // citation -> source
    source_containment: Association, // contained source -> containing source
    file_owners: Association,        // file -> any has-files entity
    citation_facts: Association,     // citation -> any fact-bearing entity
    name_person: Association,        // person name -> person
    note_owners: Association,        // note -> owning entity
    enclosure_inner: Association,    // enclosure -> the place enclosed
    enclosure_outer: Association,    // enclosure -> the enclosing place
}

impl Ancestry {
    pub fn new() -> Self {
        Self {
            thing_generator: ThingGenerator::new(),
            people: Keeper::new(),
            person_names: Keeper::new(),
            presences: Keeper::new(),
            events: Keeper::new(),
            places: Keeper::new(),
            enclosures: Keeper::new(),
            sources: Keeper::new(),
            citations: Keeper::new(),
            files: Keeper::new(),
            notes: Keeper::new(),
            parenthood: Association::new(Multiplicity::ManyToMany),
            presence_person: Association::new(Multiplicity::ManyToOne),
            presence_event: Association::new(Multiplicity::ManyToOne),
            event_place: Association::new(Multiplicity::ManyToOne),
            citation_source: Association::new(Multiplicity::ManyToOne),
            source_containment: Association::new(Multiplicity::ManyToOne),
            file_owners: Association::new(Multiplicity::ManyToMany),
            citation_facts: Association::new(Multiplicity::ManyToMany),
            name_person: Association::new(Multiplicity::ManyToOne),
            note_owners: Association::new(Multiplicity::ManyToOne),
            enclosure_inner: Association::new(Multiplicity::ManyToOne),
            enclosure_outer: Association::new(Multiplicity::ManyToOne),
        }
    }

    fn synthesize_id(thing: Thing) -> String {
        format!("_{}", thing)
    }

    fn resolve_id(id: Option<&str>, thing: Thing) -> String {
        id.map(str::to_owned)
            .unwrap_or_else(|| Self::synthesize_id(thing))
    }

    // ---- creation ----
    pub fn create_person(&mut self, id: Option<&str>) -> Thing {
        let thing = self.thing_generator.generate();
        let (kept, previously_kept) = self
            .people
            .keep(Person::new(thing, Self::resolve_id(id, thing)));
        if previously_kept {
            self.thing_generator.release(thing);
        }
        kept
    }
    pub fn create_event(
        &mut self,
        id: Option<&str>,
        event_type: EventType,
        date: Option<Datey>,
    ) -> Thing {
        let thing = self.thing_generator.generate();
        let (kept, previously_kept) = self.events.keep(Event::new(
            thing,
            Self::resolve_id(id, thing),
            event_type,
            date,
        ));
        if previously_kept {
            self.thing_generator.release(thing);
        }
        kept
    }
    pub fn create_place(&mut self, id: Option<&str>, names: Vec<PlaceName>) -> Thing {
        let thing = self.thing_generator.generate();
        let (kept, previously_kept) = self
            .places
            .keep(Place::new(thing, Self::resolve_id(id, thing), names));
        if previously_kept {
            self.thing_generator.release(thing);
        }
        kept
    }
    pub fn create_source(&mut self, id: Option<&str>, name: Option<&str>) -> Thing {
        let thing = self.thing_generator.generate();
        let (kept, previously_kept) = self.sources.keep(Source::new(
            thing,
            Self::resolve_id(id, thing),
            name.map(str::to_owned),
        ));
        if previously_kept {
            self.thing_generator.release(thing);
        }
        kept
    }
    pub fn create_citation(&mut self, id: Option<&str>) -> Thing {
        let thing = self.thing_generator.generate();
        let (kept, previously_kept) = self
            .citations
            .keep(Citation::new(thing, Self::resolve_id(id, thing)));
        if previously_kept {
            self.thing_generator.release(thing);
        }
        kept
    }
    pub fn create_file(&mut self, id: Option<&str>, path: impl Into<PathBuf>) -> Thing {
        let thing = self.thing_generator.generate();
        let (kept, previously_kept) = self
            .files
            .keep(File::new(thing, Self::resolve_id(id, thing), path));
        if previously_kept {
            self.thing_generator.release(thing);
        }
        kept
    }
    pub fn create_note(&mut self, id: Option<&str>, text: &str, owner: Thing) -> Thing {
        let thing = self.thing_generator.generate();
        let (kept, previously_kept) = self.notes.keep(Note::new(
            thing,
            Self::resolve_id(id, thing),
            text.to_owned(),
        ));
        if previously_kept {
            self.thing_generator.release(thing);
        }
        self.note_owners.link(kept, owner);
        kept
    }
    pub fn create_person_name(
        &mut self,
        person: Thing,
        individual: Option<&str>,
        affiliation: Option<&str>,
    ) -> Thing {
        let thing = self.thing_generator.generate();
        let (kept, _) = self.person_names.keep(PersonName::new(
            thing,
            Self::synthesize_id(thing),
            individual.map(str::to_owned),
            affiliation.map(str::to_owned),
        ));
        self.name_person.link(kept, person);
        kept
    }
    /// Creates the presence binding `person` to `event` in the given role,
    /// wiring both ends of the association.
    pub fn add_presence(&mut self, person: Thing, role: Role, event: Thing) -> Thing {
        let thing = self.thing_generator.generate();
        let (kept, _) = self
            .presences
            .keep(Presence::new(thing, Self::synthesize_id(thing), role));
        self.presence_person.link(kept, person);
        self.presence_event.link(kept, event);
        kept
    }
    /// Records that `encloses` lies within `enclosed_by`, reified as an
    /// [`Enclosure`] so the containment can be dated.
    pub fn enclose(&mut self, encloses: Thing, enclosed_by: Thing) -> Thing {
        let thing = self.thing_generator.generate();
        let (kept, _) = self
            .enclosures
            .keep(Enclosure::new(thing, Self::synthesize_id(thing)));
        self.enclosure_inner.link(kept, encloses);
        self.enclosure_outer.link(kept, enclosed_by);
        kept
    }

    // ---- links ----
    pub fn add_parent(&mut self, child: Thing, parent: Thing) {
        self.parenthood.link(child, parent);
    }
    pub fn remove_parent(&mut self, child: Thing, parent: Thing) {
        self.parenthood.unlink(child, parent);
    }
    pub fn add_child(&mut self, parent: Thing, child: Thing) {
        self.parenthood.link(child, parent);
    }
    pub fn set_event_place(&mut self, event: Thing, place: Thing) {
        self.event_place.link(event, place);
    }
    pub fn set_citation_source(&mut self, citation: Thing, source: Thing) {
        self.citation_source.link(citation, source);
    }
    pub fn set_contained_by(&mut self, source: Thing, container: Thing) {
        self.source_containment.link(source, container);
    }
    pub fn attach_file(&mut self, owner: Thing, file: Thing) {
        self.file_owners.link(file, owner);
    }
    pub fn detach_file(&mut self, owner: Thing, file: Thing) {
        self.file_owners.unlink(file, owner);
    }
    pub fn add_citation(&mut self, fact: Thing, citation: Thing) {
        self.citation_facts.link(citation, fact);
    }
    pub fn remove_citation(&mut self, fact: Thing, citation: Thing) {
        self.citation_facts.unlink(citation, fact);
    }

    // ---- graph accessors ----
    pub fn parents_of(&self, person: Thing) -> &[Thing] {
        self.parenthood.rights_of(person)
    }
    pub fn children_of(&self, person: Thing) -> &[Thing] {
        self.parenthood.lefts_of(person)
    }
    pub fn siblings_of(&self, person: Thing) -> Vec<Thing> {
        let mut siblings = Vec::new();
        for &parent in self.parents_of(person) {
            for &sibling in self.children_of(parent) {
                if sibling != person && !siblings.contains(&sibling) {
                    siblings.push(sibling);
                }
            }
        }
        siblings
    }
    pub fn presences_of_person(&self, person: Thing) -> &[Thing] {
        self.presence_person.lefts_of(person)
    }
    pub fn presences_of_event(&self, event: Thing) -> &[Thing] {
        self.presence_event.lefts_of(event)
    }
    pub fn person_of_presence(&self, presence: Thing) -> Option<Thing> {
        self.presence_person.right_of(presence)
    }
    pub fn event_of_presence(&self, presence: Thing) -> Option<Thing> {
        self.presence_event.right_of(presence)
    }
    pub fn place_of_event(&self, event: Thing) -> Option<Thing> {
        self.event_place.right_of(event)
    }
    pub fn events_at_place(&self, place: Thing) -> &[Thing] {
        self.event_place.lefts_of(place)
    }
    pub fn source_of_citation(&self, citation: Thing) -> Option<Thing> {
        self.citation_source.right_of(citation)
    }
    pub fn citations_of_source(&self, source: Thing) -> &[Thing] {
        self.citation_source.lefts_of(source)
    }
    pub fn container_of_source(&self, source: Thing) -> Option<Thing> {
        self.source_containment.right_of(source)
    }
    pub fn sources_contained_by(&self, container: Thing) -> &[Thing] {
        self.source_containment.lefts_of(container)
    }
    pub fn files_of(&self, owner: Thing) -> &[Thing] {
        self.file_owners.lefts_of(owner)
    }
    pub fn owners_of_file(&self, file: Thing) -> &[Thing] {
        self.file_owners.rights_of(file)
    }
    pub fn citations_of(&self, fact: Thing) -> &[Thing] {
        self.citation_facts.lefts_of(fact)
    }
    pub fn facts_of_citation(&self, citation: Thing) -> &[Thing] {
        self.citation_facts.rights_of(citation)
    }
    pub fn names_of_person(&self, person: Thing) -> &[Thing] {
        self.name_person.lefts_of(person)
    }
    pub fn person_of_name(&self, name: Thing) -> Option<Thing> {
        self.name_person.right_of(name)
    }
    pub fn notes_of(&self, owner: Thing) -> &[Thing] {
        self.note_owners.lefts_of(owner)
    }
    pub fn inner_place_of(&self, enclosure: Thing) -> Option<Thing> {
        self.enclosure_inner.right_of(enclosure)
    }
    pub fn outer_place_of(&self, enclosure: Thing) -> Option<Thing> {
        self.enclosure_outer.right_of(enclosure)
    }
    pub fn enclosures_enclosing(&self, place: Thing) -> &[Thing] {
        self.enclosure_inner.lefts_of(place)
    }
    pub fn enclosures_within(&self, place: Thing) -> &[Thing] {
        self.enclosure_outer.lefts_of(place)
    }

    /// The first subject-role event opening this person's life, preferring
    /// births over baptisms.
    pub fn start_of(&self, person: Thing) -> Option<Thing> {
        self.life_event_of(person, EventType::Birth, EventType::Baptism)
    }
    /// The first subject-role event closing this person's life, preferring
    /// deaths over burials.
    pub fn end_of(&self, person: Thing) -> Option<Thing> {
        self.life_event_of(person, EventType::Death, EventType::Burial)
    }
    fn life_event_of(
        &self,
        person: Thing,
        preferred: EventType,
        fallback: EventType,
    ) -> Option<Thing> {
        for wanted in [preferred, fallback] {
            for &presence in self.presences_of_person(person) {
                if !self
                    .presences
                    .get(presence)
                    .is_some_and(|kept| kept.role() == Role::Subject)
                {
                    continue;
                }
                let Some(event) = self.event_of_presence(presence) else {
                    continue;
                };
                if self
                    .events
                    .get(event)
                    .is_some_and(|kept| kept.event_type() == wanted)
                {
                    return Some(event);
                }
            }
        }
        None
    }

    // ---- entity accessors ----
    pub fn person(&self, thing: Thing) -> Option<&Person> {
        self.people.get(thing)
    }
    pub fn person_mut(&mut self, thing: Thing) -> Option<&mut Person> {
        self.people.get_mut(thing)
    }
    pub fn person_by_id(&self, id: &str) -> Option<&Person> {
        self.people.by_id(id)
    }
    pub fn person_things(&self) -> Vec<Thing> {
        self.people.things()
    }
    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.people.iter()
    }
    pub fn person_name(&self, thing: Thing) -> Option<&PersonName> {
        self.person_names.get(thing)
    }
    pub fn person_name_mut(&mut self, thing: Thing) -> Option<&mut PersonName> {
        self.person_names.get_mut(thing)
    }
    pub fn presence(&self, thing: Thing) -> Option<&Presence> {
        self.presences.get(thing)
    }
    pub fn event(&self, thing: Thing) -> Option<&Event> {
        self.events.get(thing)
    }
    pub fn event_mut(&mut self, thing: Thing) -> Option<&mut Event> {
        self.events.get_mut(thing)
    }
    pub fn event_by_id(&self, id: &str) -> Option<&Event> {
        self.events.by_id(id)
    }
    pub fn event_things(&self) -> Vec<Thing> {
        self.events.things()
    }
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }
    pub fn place(&self, thing: Thing) -> Option<&Place> {
        self.places.get(thing)
    }
    pub fn place_mut(&mut self, thing: Thing) -> Option<&mut Place> {
        self.places.get_mut(thing)
    }
    pub fn enclosure(&self, thing: Thing) -> Option<&Enclosure> {
        self.enclosures.get(thing)
    }
    pub fn enclosure_mut(&mut self, thing: Thing) -> Option<&mut Enclosure> {
        self.enclosures.get_mut(thing)
    }
    pub fn source(&self, thing: Thing) -> Option<&Source> {
        self.sources.get(thing)
    }
    pub fn source_mut(&mut self, thing: Thing) -> Option<&mut Source> {
        self.sources.get_mut(thing)
    }
    pub fn source_by_id(&self, id: &str) -> Option<&Source> {
        self.sources.by_id(id)
    }
    pub fn source_things(&self) -> Vec<Thing> {
        self.sources.things()
    }
    pub fn citation(&self, thing: Thing) -> Option<&Citation> {
        self.citations.get(thing)
    }
    pub fn citation_mut(&mut self, thing: Thing) -> Option<&mut Citation> {
        self.citations.get_mut(thing)
    }
    pub fn citation_things(&self) -> Vec<Thing> {
        self.citations.things()
    }
    pub fn file(&self, thing: Thing) -> Option<&File> {
        self.files.get(thing)
    }
    pub fn file_mut(&mut self, thing: Thing) -> Option<&mut File> {
        self.files.get_mut(thing)
    }
    pub fn file_things(&self) -> Vec<Thing> {
        self.files.things()
    }
    pub fn note(&self, thing: Thing) -> Option<&Note> {
        self.notes.get(thing)
    }
}

impl Default for Ancestry {
    fn default() -> Self {
        Self::new()
    }
}
