use anchorfp::{
    create_descriptor, deserialize, encode_state, fingerprint_text, resolve, serialize, DocTree,
    FocusConfig, FocusEngine, NodeId, ViewState,
};

fn article() -> (DocTree, Vec<NodeId>) {
    let mut doc = DocTree::new();
    let root = doc.root();
    let article = doc.append_element_with_id(root, "article", "post").unwrap();
    let mut nodes = Vec::new();
    for (i, text) in ["Intro", "  Body   text\nwith breaks ", "Outro 🚀"].iter().enumerate() {
        let section = doc.append_element(article, "section").unwrap();
        nodes.push(doc.append_text_element(section, "h2", &format!("Heading {i}")).unwrap());
        nodes.push(doc.append_text_element(section, "p", text).unwrap());
    }
    (doc, nodes)
}

#[test]
fn equivalent_whitespace_fingerprints_match() {
    let a = fingerprint_text("  Hello \t  world\n");
    let b = fingerprint_text("Hello world");
    assert_eq!(a, b);
    assert_eq!(fingerprint_text(&a.normalized), a);
}

#[test]
fn separately_built_trees_produce_identical_descriptors() {
    let (doc_a, nodes_a) = article();
    let (doc_b, nodes_b) = article();
    for (a, b) in nodes_a.iter().zip(&nodes_b) {
        assert_eq!(
            create_descriptor(&doc_a, *a, doc_a.root()),
            create_descriptor(&doc_b, *b, doc_b.root())
        );
    }
}

#[test]
fn tokens_are_stable_across_runs() {
    let (doc, nodes) = article();
    let descriptors: Vec<_> = nodes
        .iter()
        .map(|n| create_descriptor(&doc, *n, doc.root()).unwrap())
        .collect();
    let first = serialize(&descriptors);
    for _ in 0..10 {
        assert_eq!(serialize(&descriptors), first);
    }
    assert_eq!(deserialize(&first), descriptors);
}

#[test]
fn every_node_resolves_back_to_itself() {
    let (doc, nodes) = article();
    for node in &nodes {
        let d = create_descriptor(&doc, *node, doc.root()).unwrap();
        assert_eq!(resolve(&doc, doc.root(), &d), Some(*node));
    }
}

#[test]
fn view_state_encoding_ignores_insertion_order() {
    let a = ViewState::new().with_shown("z").with_shown("a").with_tab("k", "v").with_tab("b", "c");
    let b = ViewState::new().with_tab("b", "c").with_shown("a").with_tab("k", "v").with_shown("z");
    assert_eq!(encode_state(&a), encode_state(&b));
}

#[test]
fn focus_outcome_is_repeatable() {
    let (mut doc, nodes) = article();
    let d = vec![create_descriptor(&doc, nodes[3], doc.root()).unwrap()];
    let mut engine = FocusEngine::new(doc.root(), FocusConfig::default()).unwrap();

    let first = engine.apply_descriptors(&mut doc, &d);
    let outline = doc.outline();
    for _ in 0..3 {
        assert_eq!(engine.apply_descriptors(&mut doc, &d), first);
        assert_eq!(doc.outline(), outline);
    }
}
