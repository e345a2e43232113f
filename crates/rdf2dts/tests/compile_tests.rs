use std::collections::HashSet;
use std::path::Path;
use std::time::{Duration, Instant};

use rdf2dts::compile::algebra::{deprecation_note, Heritage};
use rdf2dts::compile::class_map::ClassKind;
use rdf2dts::compile::{compile, CompileOptions, CompiledOntology};
use rdf2dts::diagnostics::DiagnosticKind;
use rdf2dts::error::CompileError;
use rdf2dts::loader::load_file;
use rdf2dts::model::context::NamingContext;
use rdf2dts::model::ontology::standard;
use rdf2dts::model::term::{Statement, Term};
use rdf2dts::model::type_ref::{Primitive, TypeRef};

const NS: &str = "https://schema.org/";

fn iri(local: &str) -> String {
    format!("{NS}{local}")
}

fn class(local: &str) -> Statement {
    Statement::new(iri(local), standard::RDF_TYPE, Term::entity(standard::RDFS_CLASS))
}

fn sub_class(child: &str, parent: &str) -> Statement {
    Statement::new(iri(child), standard::RDFS_SUBCLASS_OF, Term::entity(iri(parent)))
}

fn fixture_statements() -> Vec<Statement> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/mini_schema.nt");
    load_file(&path).unwrap()
}

fn compile_fixture(options: &CompileOptions) -> CompiledOntology {
    compile(fixture_statements(), options).unwrap()
}

fn named(name: &str) -> TypeRef {
    TypeRef::Named(name.to_string())
}

// --- Basic scenarios ---

#[test]
fn thing_with_name_property() {
    let statements = vec![
        Statement::new(iri("name"), standard::RDF_TYPE, Term::entity(standard::RDF_PROPERTY)),
        Statement::new(iri("name"), iri("domainIncludes"), Term::entity(iri("Thing"))),
        Statement::new(iri("name"), iri("rangeIncludes"), Term::entity(iri("Text"))),
        class("Thing"),
    ];
    let compiled = compile(statements, &CompileOptions::default()).unwrap();

    let classes: Vec<_> = compiled
        .declarations
        .iter()
        .filter(|d| d.kind == ClassKind::Class)
        .collect();
    assert_eq!(classes.len(), 1);

    let thing = classes[0];
    assert_eq!(thing.ident, "Thing");
    let base = thing.base.as_ref().unwrap();
    assert_eq!(base.name, "ThingBase");
    assert_eq!(base.heritage, Heritage::Referenceable);
    assert_eq!(base.members.len(), 1);
    assert_eq!(base.members[0].key, "name");
    assert_eq!(base.members[0].range, vec![named("Text")]);

    let text = compiled.declaration("Text").unwrap();
    assert_eq!(text.kind, ClassKind::Builtin);
    assert_eq!(text.total, vec![TypeRef::Primitive(Primitive::String)]);
}

#[test]
fn superseded_class_is_hidden_regardless_of_order() {
    let statements = vec![
        class("A"),
        class("B"),
        Statement::new(iri("A"), iri("supersededBy"), Term::entity(iri("B"))),
    ];
    let mut reversed = statements.clone();
    reversed.reverse();

    for input in [statements, reversed] {
        let compiled = compile(input, &CompileOptions::default()).unwrap();
        assert!(compiled.declaration("A").is_none());
        assert!(compiled.declaration("B").is_some());
    }
}

#[test]
fn deprecated_class_is_emitted_with_note_when_requested() {
    let statements = vec![
        class("A"),
        class("B"),
        class("C"),
        Statement::new(iri("A"), standard::RDFS_COMMENT, Term::literal("Old.")),
        Statement::new(iri("A"), iri("supersededBy"), Term::entity(iri("C"))),
        Statement::new(iri("A"), iri("supersededBy"), Term::entity(iri("B"))),
    ];
    let options = CompileOptions {
        include_deprecated: true,
        ..CompileOptions::default()
    };
    let compiled = compile(statements, &options).unwrap();

    let a = compiled.declaration("A").unwrap();
    assert!(a.deprecated);
    assert_eq!(a.comment.as_deref(), Some("Old.\n@deprecated Use B or C instead."));
}

#[test]
fn deprecation_note_sorts_successors() {
    assert_eq!(
        deprecation_note(vec!["b".to_string(), "a".to_string()]),
        "@deprecated Use a or b instead."
    );
}

#[test]
fn dangling_superseded_by_fails() {
    let statements = vec![
        class("A"),
        Statement::new(iri("A"), iri("supersededBy"), Term::entity(iri("Missing"))),
    ];
    let err = compile(statements, &CompileOptions::default()).unwrap_err();
    assert!(matches!(&err, CompileError::DanglingReference { object, .. } if object.contains("Missing")));
}

#[test]
fn invalid_context_fails_before_compiling() {
    let options = CompileOptions {
        include_deprecated: false,
        context: NamingContext::new(),
    };
    let err = compile(Vec::new(), &options).unwrap_err();
    assert!(matches!(err, CompileError::InvalidContext(_)));
}

// --- Fixture ontology ---

#[test]
fn fixture_declarations_are_sorted() {
    let compiled = compile_fixture(&CompileOptions::default());
    let idents: Vec<&str> = compiled.declarations.iter().map(|d| d.ident.as_str()).collect();
    assert_eq!(
        idents,
        vec![
            "Boolean",
            "Date",
            "DateTime",
            "Number",
            "Text",
            "Time",
            "DataType",
            "Corporation",
            "DayOfWeek",
            "Float",
            "Organization",
            "Person",
            "Thing",
            "URL",
        ]
    );
}

#[test]
fn fixture_thing_total_lists_leaf_then_children() {
    let compiled = compile_fixture(&CompileOptions::default());
    let thing = compiled.declaration("Thing").unwrap();

    assert_eq!(thing.comment.as_deref(), Some("The most generic type of item."));
    assert_eq!(
        thing.total,
        vec![
            named("ThingLeaf"),
            named("DayOfWeek"),
            named("Organization"),
            named("Person"),
        ]
    );
    let leaf = thing.leaf.as_ref().unwrap();
    assert_eq!(leaf.extends, vec!["ThingBase".to_string()]);
    assert_eq!(leaf.type_discriminator, "Thing");
}

#[test]
fn fixture_person_hides_deprecated_members_and_children() {
    let compiled = compile_fixture(&CompileOptions::default());
    let person = compiled.declaration("Person").unwrap();

    let base = person.base.as_ref().unwrap();
    assert_eq!(base.heritage, Heritage::Parents(vec!["ThingBase".to_string()]));
    let keys: Vec<&str> = base.members.iter().map(|m| m.key.as_str()).collect();
    assert_eq!(keys, vec!["birthDate", "knows"]);
    assert_eq!(base.members[1].range, vec![named("Person"), TypeRef::IdReference]);
    assert_eq!(person.total, vec![named("PersonLeaf")]);
    assert!(compiled.declaration("OldPerson").is_none());
}

#[test]
fn fixture_with_deprecated_entities() {
    let options = CompileOptions {
        include_deprecated: true,
        ..CompileOptions::default()
    };
    let compiled = compile_fixture(&options);

    let person = compiled.declaration("Person").unwrap();
    assert_eq!(person.total, vec![named("PersonLeaf"), named("OldPerson")]);

    let nickname = person
        .base
        .as_ref()
        .unwrap()
        .members
        .iter()
        .find(|m| m.key == "nickname")
        .unwrap();
    assert!(nickname.deprecated);
    assert_eq!(nickname.comment.as_deref(), Some("@deprecated Use name instead."));

    let old = compiled.declaration("OldPerson").unwrap();
    assert_eq!(old.comment.as_deref(), Some("@deprecated Use Person instead."));
    assert_eq!(compiled.declarations.len(), 15);
}

#[test]
fn fixture_corporation_leaf_extends_parent_base() {
    let compiled = compile_fixture(&CompileOptions::default());
    let corporation = compiled.declaration("Corporation").unwrap();
    assert!(corporation.base.is_none());
    let leaf = corporation.leaf.as_ref().unwrap();
    assert_eq!(leaf.extends, vec!["OrganizationBase".to_string()]);
    assert_eq!(corporation.parents, vec!["Organization".to_string()]);
}

#[test]
fn fixture_enumeration_literals() {
    let compiled = compile_fixture(&CompileOptions::default());
    let day = compiled.declaration("DayOfWeek").unwrap();

    let literal = |s: &str| TypeRef::Literal(s.to_string());
    assert_eq!(
        day.total,
        vec![
            literal("Monday"),
            literal("Tuesday"),
            literal("http://schema.org/Monday"),
            literal("http://schema.org/Tuesday"),
            literal("https://schema.org/Monday"),
            literal("https://schema.org/Tuesday"),
            named("DayOfWeekLeaf"),
        ]
    );
    assert_eq!(day.enum_members.len(), 2);
    assert_eq!(
        day.enum_members[0].comment.as_deref(),
        Some("The day of the week between Sunday and Tuesday.")
    );
}

#[test]
fn fixture_data_types() {
    let compiled = compile_fixture(&CompileOptions::default());

    let union = compiled.declaration("DataType").unwrap();
    assert_eq!(union.kind, ClassKind::DataTypeUnion);
    assert_eq!(
        union.total,
        ["Boolean", "Date", "DateTime", "Number", "Text", "Time"]
            .into_iter()
            .map(named)
            .collect::<Vec<_>>()
    );

    let number = compiled.declaration("Number").unwrap();
    assert_eq!(number.total, vec![named("Float"), TypeRef::Primitive(Primitive::Number)]);
    let float = compiled.declaration("Float").unwrap();
    assert_eq!(float.total, vec![TypeRef::Primitive(Primitive::Number)]);
    assert!(float.leaf.is_none());

    let text = compiled.declaration("Text").unwrap();
    assert_eq!(text.comment.as_deref(), Some("Data type: Text."));
}

#[test]
fn fixture_diagnostics_and_helpers() {
    let compiled = compile_fixture(&CompileOptions::default());
    let unrecognized: Vec<_> = compiled
        .diagnostics
        .of_kind(DiagnosticKind::UnrecognizedStatement)
        .collect();
    assert_eq!(unrecognized.len(), 1);
    assert_eq!(unrecognized[0].subject, "http://schema.org/Thing");
    assert_eq!(compiled.diagnostics.len(), 1);

    assert!(!compiled.helpers.has_role);
    assert_eq!(compiled.helpers.root.as_deref(), Some("Thing"));
    assert_eq!(compiled.helpers.context, serde_json::json!("https://schema.org"));
}

#[test]
fn fixture_class_map_contents() {
    let compiled = compile_fixture(&CompileOptions::default());
    let classes = &compiled.classes;

    assert_eq!(classes.properties().count(), 5);
    let values: Vec<&str> = classes
        .enum_values()
        .map(|(_, value)| value.subject.iri())
        .collect();
    assert_eq!(values, vec!["http://schema.org/Monday", "http://schema.org/Tuesday"]);

    let day = classes.get("http://schema.org/DayOfWeek").unwrap();
    for (_, value) in classes.enum_values() {
        assert_eq!(value.owners, vec![day]);
    }
    assert!(classes.node(classes.get("http://schema.org/OldPerson").unwrap()).is_deprecated());
}

#[test]
fn scoped_names_are_unique() {
    let compiled = compile_fixture(&CompileOptions::default());
    let mut seen = HashSet::new();
    for decl in &compiled.declarations {
        assert!(seen.insert(decl.scoped_name.clone()), "{} repeated", decl.scoped_name);
    }
}

#[test]
fn compilation_is_deterministic() {
    let options = CompileOptions::default();
    let first = compile_fixture(&options);
    let second = compile_fixture(&options);
    assert_eq!(first.declarations, second.declarations);

    let mut reversed = fixture_statements();
    reversed.reverse();
    let third = compile(reversed, &options).unwrap();
    assert_eq!(first.declarations, third.declarations);
}

#[test]
fn heritage_ignores_sub_class_statement_order() {
    let common = || {
        let mut statements = vec![class("Thing"), class("Left"), class("Right"), class("Bottom")];
        for (local, domain) in [("left", "Left"), ("right", "Right")] {
            statements.push(Statement::new(iri(local), standard::RDF_TYPE, Term::entity(standard::RDF_PROPERTY)));
            statements.push(Statement::new(iri(local), iri("domainIncludes"), Term::entity(iri(domain))));
            statements.push(Statement::new(iri(local), iri("rangeIncludes"), Term::entity(iri("Text"))));
        }
        statements
    };
    let mut left_first = common();
    left_first.extend([sub_class("Bottom", "Left"), sub_class("Bottom", "Right")]);
    let mut right_first = common();
    right_first.extend([sub_class("Bottom", "Right"), sub_class("Bottom", "Left")]);

    let options = CompileOptions::default();
    let a = compile(left_first, &options).unwrap();
    let b = compile(right_first, &options).unwrap();
    assert_eq!(a.declarations, b.declarations);

    let bottom = a.declaration("Bottom").unwrap();
    assert_eq!(
        bottom.base.as_ref().unwrap().heritage,
        Heritage::Parents(vec!["LeftBase".to_string(), "RightBase".to_string()])
    );
}

#[test]
fn diamond_ladder_compiles_quickly() {
    const DEPTH: usize = 40;
    let name = |level: usize, side: &str| format!("L{level}{side}");

    let mut statements = vec![class("L0A"), class("L0B")];
    for level in 1..DEPTH {
        for side in ["A", "B"] {
            let child = name(level, side);
            statements.push(class(&child));
            statements.push(sub_class(&child, &name(level - 1, "A")));
            statements.push(sub_class(&child, &name(level - 1, "B")));
        }
    }

    let started = Instant::now();
    let compiled = compile(statements, &CompileOptions::default()).unwrap();
    assert!(started.elapsed() < Duration::from_secs(5), "took {:?}", started.elapsed());

    let top = compiled.declaration(&name(DEPTH - 1, "A")).unwrap();
    let expected = vec![format!("L{}ABase", DEPTH - 2), format!("L{}BBase", DEPTH - 2)];
    assert_eq!(top.base.as_ref().unwrap().heritage, Heritage::Parents(expected));
}

// --- Enum/class duality ---

#[test]
fn subject_can_be_class_and_enum_value() {
    let statements = vec![
        class("Thing"),
        class("MedicalSpecialty"),
        sub_class("MedicalSpecialty", "Thing"),
        class("Dentistry"),
        sub_class("Dentistry", "Thing"),
        Statement::new(iri("Dentistry"), standard::RDF_TYPE, Term::entity(iri("MedicalSpecialty"))),
    ];
    let compiled = compile(statements, &CompileOptions::default()).unwrap();

    assert!(compiled.declaration("Dentistry").is_some());
    let specialty = compiled.declaration("MedicalSpecialty").unwrap();
    assert_eq!(specialty.enum_members.len(), 1);
    assert_eq!(specialty.enum_members[0].scoped_name, "Dentistry");
    assert!(specialty.total.contains(&TypeRef::Literal("Dentistry".to_string())));
    assert_eq!(
        compiled.diagnostics.of_kind(DiagnosticKind::UnrecognizedStatement).count(),
        0
    );
}

#[test]
fn enum_value_of_unknown_class_is_dangling() {
    let statements = vec![
        class("Thing"),
        Statement::new(iri("Monday"), standard::RDF_TYPE, Term::entity(iri("DayOfWeek"))),
    ];
    let err = compile(statements, &CompileOptions::default()).unwrap_err();
    match err {
        CompileError::DanglingReference { predicate, object, .. } => {
            assert!(predicate.contains("22-rdf-syntax-ns#type"));
            assert!(object.contains("DayOfWeek"));
        }
        other => panic!("expected DanglingReference, got {other:?}"),
    }
}

#[test]
fn enum_value_extra_statements_are_reported() {
    let statements = vec![
        class("DayOfWeek"),
        Statement::new(iri("Monday"), standard::RDF_TYPE, Term::entity(iri("DayOfWeek"))),
        Statement::new(iri("Monday"), standard::RDFS_LABEL, Term::literal("Monday")),
    ];
    let compiled = compile(statements, &CompileOptions::default()).unwrap();
    assert_eq!(
        compiled.diagnostics.of_kind(DiagnosticKind::UnrecognizedStatement).count(),
        1
    );
}

// --- Other model features ---

#[test]
fn role_enables_role_helpers() {
    let statements = vec![class("Thing"), class("Role"), sub_class("Role", "Thing")];
    let compiled = compile(statements, &CompileOptions::default()).unwrap();
    assert!(compiled.helpers.has_role);
}

#[test]
fn colliding_scoped_names_are_reported_and_kept() {
    let statements = vec![
        class("Widget"),
        Statement::new(
            "http://schema.org/Widget",
            standard::RDF_TYPE,
            Term::entity(standard::RDFS_CLASS),
        ),
    ];
    let compiled = compile(statements, &CompileOptions::default()).unwrap();
    let widgets = compiled
        .declarations
        .iter()
        .filter(|d| d.scoped_name == "Widget")
        .count();
    assert_eq!(widgets, 2);
    assert_eq!(compiled.diagnostics.of_kind(DiagnosticKind::NameCollision).count(), 1);
}

#[test]
fn same_local_name_in_other_namespace_is_reported() {
    let statements = vec![
        class("Widget"),
        Statement::new(
            "https://example.org/Widget",
            standard::RDF_TYPE,
            Term::entity(standard::RDFS_CLASS),
        ),
    ];
    let compiled = compile(statements, &CompileOptions::default()).unwrap();

    let scoped: HashSet<&str> = compiled
        .declarations
        .iter()
        .filter(|d| d.ident == "Widget")
        .map(|d| d.scoped_name.as_str())
        .collect();
    assert_eq!(scoped, HashSet::from(["Widget", "https://example.org/Widget"]));

    let collisions: Vec<_> = compiled.diagnostics.of_kind(DiagnosticKind::NameCollision).collect();
    assert_eq!(collisions.len(), 1);
    assert!(collisions[0].message.contains("identifier \"Widget\""));
}

#[test]
fn node_type_ranges_allow_id_references() {
    let statements = vec![
        class("Thing"),
        class("Quantity"),
        sub_class("Quantity", "Number"),
        Statement::new(iri("name"), standard::RDF_TYPE, Term::entity(standard::RDF_PROPERTY)),
        Statement::new(iri("name"), iri("domainIncludes"), Term::entity(iri("Thing"))),
        Statement::new(iri("name"), iri("rangeIncludes"), Term::entity(iri("Thing"))),
        Statement::new(iri("name"), iri("rangeIncludes"), Term::entity(iri("Quantity"))),
    ];
    let compiled = compile(statements, &CompileOptions::default()).unwrap();
    let thing = compiled.declaration("Thing").unwrap();
    let member = &thing.base.as_ref().unwrap().members[0];
    assert_eq!(member.range, vec![named("Quantity"), named("Thing"), TypeRef::IdReference]);
}

#[test]
fn literal_range_is_malformed() {
    let statements = vec![
        class("Thing"),
        Statement::new(iri("name"), standard::RDF_TYPE, Term::entity(standard::RDF_PROPERTY)),
        Statement::new(iri("name"), iri("rangeIncludes"), Term::literal("Text")),
    ];
    let err = compile(statements, &CompileOptions::default()).unwrap_err();
    assert!(matches!(err, CompileError::MalformedInput { .. }));
}

#[test]
fn named_context_scopes_keys_and_discriminators() {
    let options = CompileOptions {
        include_deprecated: false,
        context: NamingContext::parse("schema:https://schema.org/").unwrap(),
    };
    let compiled = compile_fixture(&options);
    let thing = compiled.declaration("Thing").unwrap();

    assert_eq!(thing.scoped_name, "schema:Thing");
    assert_eq!(thing.leaf.as_ref().unwrap().type_discriminator, "schema:Thing");
    assert_eq!(thing.base.as_ref().unwrap().members[0].key, "schema:name");
    assert_eq!(
        compiled.helpers.context,
        serde_json::json!({ "schema": "https://schema.org/" })
    );
}
