//! Layer architecture verification end-to-end.

use koscope::{Architecture, ArchitectureConfig, Codebase, Layer};

fn clean_architecture() -> (Layer, Layer, Layer) {
    (
        Layer::new("presentation", "com.sample.presentation.."),
        Layer::new("application", "com.sample.application.."),
        Layer::new("domain", "com.sample.domain.."),
    )
}

#[test]
fn layered_rules_permit_transitive_dependencies() {
    let (presentation, application, domain) = clean_architecture();
    let arch = Architecture::builder()
        .layer(presentation.clone())
        .layer(application.clone())
        .layer(domain.clone())
        .dependencies(|rules| {
            rules.depends_on(&presentation, &application);
            rules.depends_on(&application, &domain);
        })
        .build()
        .expect("acyclic rules should validate");

    assert!(arch.is_dependency_permitted(&presentation, &domain));
    assert!(arch.is_dependency_permitted(&domain, &domain));
    assert!(!arch.is_dependency_permitted(&domain, &presentation));
}

#[test]
fn circular_rules_never_validate() {
    let layer1 = Layer::new("layer1", "layer1");
    let layer2 = Layer::new("layer2", "layer2");
    let err = Architecture::builder()
        .layer(layer1.clone())
        .layer(layer2.clone())
        .dependencies(|rules| {
            rules.depends_on(&layer1, &layer2);
            rules.depends_on(&layer2, &layer1);
        })
        .build()
        .expect_err("a cycle must be rejected");

    insta::assert_snapshot!(err.to_string(), @r"
    Illegal circular dependencies:
    Layer(name=layer2, isDefinedBy=layer2) -->
    Layer(name=layer1, isDefinedBy=layer1) -->
    Layer(name=layer2, isDefinedBy=layer2).
    ");
}

#[test]
fn parsed_declarations_resolve_to_their_layer() {
    let (presentation, application, domain) = clean_architecture();
    let arch = Architecture::builder()
        .layer(presentation.clone())
        .layer(application.clone())
        .layer(domain.clone())
        .dependencies(|rules| {
            rules.depends_on(&presentation, &application);
            rules.depends_on(&application, &domain);
        })
        .build()
        .expect("acyclic rules should validate");

    let codebase = Codebase::from_sources([
        "package com.sample.domain.model\n\nclass User\n",
        "package com.sample.presentation.view\n\nclass UserView\n",
        "package org.thirdparty\n\nclass Outside\n",
    ])
    .expect("snippets should parse");

    let mut layers = Vec::new();
    for file in codebase.scope().files() {
        let class = file.children().next().expect("one class per file");
        layers.push(arch.layer_of(&class).map(Layer::name));
    }
    assert_eq!(layers, [Some("domain"), Some("presentation"), None]);
}

#[test]
fn toml_definitions_behave_like_the_builder() {
    let toml = r#"
[[layers]]
name = "presentation"
defined-by = "com.sample.presentation.."

[[layers]]
name = "application"
defined-by = "com.sample.application.."

[[layers]]
name = "domain"
defined-by = "com.sample.domain.."

[dependencies]
presentation = ["application"]
application = ["domain"]
domain = []
"#;
    let arch = ArchitectureConfig::parse(toml)
        .expect("definition should parse")
        .into_architecture()
        .expect("definition should validate");

    let (presentation, _, domain) = clean_architecture();
    assert!(arch.depends_on(&presentation, &domain));
    assert_eq!(
        arch.layer_of_package("com.sample.domain.model")
            .map(Layer::name),
        Some("domain")
    );
}
