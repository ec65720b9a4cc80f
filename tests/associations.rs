use kindred::construct::{
    Ancestry, Association, EventType, Multiplicity, PlaceName, Role,
};

#[test]
fn links_are_mirrored_on_both_sides() {
    let mut ancestry = Ancestry::new();
    let parent = ancestry.create_person(Some("P0"));
    let child = ancestry.create_person(Some("P1"));
    ancestry.add_parent(child, parent);
    assert_eq!(ancestry.parents_of(child), &[parent][..]);
    assert_eq!(ancestry.children_of(parent), &[child][..]);
    ancestry.remove_parent(child, parent);
    assert!(ancestry.parents_of(child).is_empty());
    assert!(ancestry.children_of(parent).is_empty());
}

#[test]
fn duplicate_links_are_refused() {
    let mut association = Association::new(Multiplicity::ManyToMany);
    association.link(1, 2);
    association.link(1, 2);
    assert_eq!(association.rights_of(1), &[2][..]);
    assert_eq!(association.lefts_of(2), &[1][..]);
    assert_eq!(association.len(), 1);
}

#[test]
fn many_to_one_relinking_replaces_the_previous_link() {
    let mut ancestry = Ancestry::new();
    let citation = ancestry.create_citation(Some("C0"));
    let first = ancestry.create_source(Some("S0"), Some("The Source"));
    let second = ancestry.create_source(Some("S1"), Some("Another Source"));
    ancestry.set_citation_source(citation, first);
    ancestry.set_citation_source(citation, second);
    assert_eq!(ancestry.source_of_citation(citation), Some(second));
    assert!(ancestry.citations_of_source(first).is_empty());
    assert_eq!(ancestry.citations_of_source(second), &[citation][..]);
}

#[test]
fn presences_wire_person_and_event_both_ways() {
    let mut ancestry = Ancestry::new();
    let person = ancestry.create_person(Some("P0"));
    let event = ancestry.create_event(Some("E0"), EventType::Marriage, None);
    let presence = ancestry.add_presence(person, Role::Witness, event);
    assert_eq!(ancestry.person_of_presence(presence), Some(person));
    assert_eq!(ancestry.event_of_presence(presence), Some(event));
    assert_eq!(ancestry.presences_of_person(person), &[presence][..]);
    assert_eq!(ancestry.presences_of_event(event), &[presence][..]);
    assert_eq!(ancestry.presence(presence).unwrap().role(), Role::Witness);
}

#[test]
fn siblings_share_a_parent_without_duplicates() {
    let mut ancestry = Ancestry::new();
    let father = ancestry.create_person(Some("P0"));
    let mother = ancestry.create_person(Some("P1"));
    let first = ancestry.create_person(Some("P2"));
    let second = ancestry.create_person(Some("P3"));
    for child in [first, second] {
        ancestry.add_parent(child, father);
        ancestry.add_parent(child, mother);
    }
    assert_eq!(ancestry.siblings_of(first), vec![second]);
    assert_eq!(ancestry.siblings_of(second), vec![first]);
    assert!(ancestry.siblings_of(father).is_empty());
}

#[test]
fn missing_ids_are_synthesized_and_clashing_ids_deduplicate() {
    let mut ancestry = Ancestry::new();
    let person = ancestry.create_person(None);
    assert!(ancestry.person(person).unwrap().id().starts_with('_'));
    let original = ancestry.create_person(Some("P7"));
    let duplicate = ancestry.create_person(Some("P7"));
    assert_eq!(original, duplicate);
    assert_eq!(ancestry.person_things().len(), 2);
    assert_eq!(ancestry.person_by_id("P7").unwrap().person(), original);
}

#[test]
fn life_bounds_prefer_birth_and_death_over_stand_ins() {
    let mut ancestry = Ancestry::new();
    let person = ancestry.create_person(Some("P0"));
    let baptism = ancestry.create_event(None, EventType::Baptism, None);
    let burial = ancestry.create_event(None, EventType::Burial, None);
    ancestry.add_presence(person, Role::Subject, baptism);
    ancestry.add_presence(person, Role::Subject, burial);
    assert_eq!(ancestry.start_of(person), Some(baptism));
    assert_eq!(ancestry.end_of(person), Some(burial));
    let birth = ancestry.create_event(None, EventType::Birth, None);
    let death = ancestry.create_event(None, EventType::Death, None);
    ancestry.add_presence(person, Role::Subject, birth);
    ancestry.add_presence(person, Role::Subject, death);
    assert_eq!(ancestry.start_of(person), Some(birth));
    assert_eq!(ancestry.end_of(person), Some(death));
    // non-subject roles never bound a life
    let bystander = ancestry.create_person(Some("P1"));
    ancestry.add_presence(bystander, Role::Witness, death);
    assert_eq!(ancestry.end_of(bystander), None);
}

#[test]
fn files_attach_across_entity_kinds() {
    let mut ancestry = Ancestry::new();
    let person = ancestry.create_person(Some("P0"));
    let event = ancestry.create_event(Some("E0"), EventType::Birth, None);
    let scan = ancestry.create_file(Some("F0"), "scan.png");
    ancestry.attach_file(person, scan);
    ancestry.attach_file(event, scan);
    assert_eq!(ancestry.owners_of_file(scan), &[person, event][..]);
    assert_eq!(ancestry.files_of(person), &[scan][..]);
    assert_eq!(ancestry.files_of(event), &[scan][..]);
    ancestry.detach_file(person, scan);
    assert_eq!(ancestry.owners_of_file(scan), &[event][..]);
    assert!(ancestry.files_of(person).is_empty());
}

#[test]
fn citations_back_facts_of_any_kind() {
    let mut ancestry = Ancestry::new();
    let source = ancestry.create_source(Some("S0"), Some("The Source"));
    let citation = ancestry.create_citation(Some("C0"));
    ancestry.set_citation_source(citation, source);
    let person = ancestry.create_person(Some("P0"));
    let event = ancestry.create_event(Some("E0"), EventType::Birth, None);
    ancestry.add_citation(person, citation);
    ancestry.add_citation(event, citation);
    assert_eq!(ancestry.citations_of(person), &[citation][..]);
    assert_eq!(ancestry.facts_of_citation(citation), &[person, event][..]);
    ancestry.remove_citation(person, citation);
    assert_eq!(ancestry.facts_of_citation(citation), &[event][..]);
}

#[test]
fn places_nest_through_enclosures() {
    let mut ancestry = Ancestry::new();
    let city = ancestry.create_place(
        Some("PL0"),
        vec![PlaceName::new("Amsterdam").with_locale("nl")],
    );
    let country = ancestry.create_place(Some("PL1"), vec![PlaceName::new("Netherlands")]);
    let enclosure = ancestry.enclose(city, country);
    assert_eq!(ancestry.inner_place_of(enclosure), Some(city));
    assert_eq!(ancestry.outer_place_of(enclosure), Some(country));
    assert_eq!(ancestry.enclosures_enclosing(city), &[enclosure][..]);
    assert_eq!(ancestry.enclosures_within(country), &[enclosure][..]);
    assert_eq!(ancestry.place(city).unwrap().names()[0].name(), "Amsterdam");
}

#[test]
fn events_happen_at_places() {
    let mut ancestry = Ancestry::new();
    let place = ancestry.create_place(Some("PL0"), vec![PlaceName::new("Leiden")]);
    let event = ancestry.create_event(Some("E0"), EventType::Birth, None);
    ancestry.set_event_place(event, place);
    assert_eq!(ancestry.place_of_event(event), Some(place));
    assert_eq!(ancestry.events_at_place(place), &[event][..]);
}

#[test]
fn notes_and_names_hang_off_their_owners() {
    let mut ancestry = Ancestry::new();
    let person = ancestry.create_person(Some("P0"));
    let name = ancestry.create_person_name(person, Some("Jane"), Some("Dough"));
    assert_eq!(ancestry.names_of_person(person), &[name][..]);
    assert_eq!(ancestry.person_of_name(name), Some(person));
    let kept = ancestry.person_name(name).unwrap();
    assert_eq!(kept.to_string(), "Jane Dough");
    assert_eq!(kept.sort_key(), ("Dough", "Jane"));
    let note = ancestry.create_note(None, "Emigrated twice.", person);
    assert_eq!(ancestry.notes_of(person), &[note][..]);
    assert_eq!(ancestry.note(note).unwrap().text(), "Emigrated twice.");
}
