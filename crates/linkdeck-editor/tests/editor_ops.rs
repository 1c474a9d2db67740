use linkdeck_editor::{
    add_link, delete_link, reorder_links, toggle_visibility, update_link, EditError, LinkDraft,
    LinkPatch,
};
use linkdeck_model::{Configuration, IconType, LinkId, Username, ValidationError};

fn base_config() -> Configuration {
    Configuration::default_for(Username::parse("nitesh").expect("username"), "Nitesh Kumar")
}

fn config_with_links(names: &[&str]) -> Configuration {
    names.iter().fold(base_config(), |config, name| {
        add_link(
            &config,
            LinkDraft::new(*name, format!("https://example.com/{name}")),
        )
        .expect("add link")
    })
}

fn display_names(config: &Configuration) -> Vec<String> {
    config
        .sorted_links()
        .into_iter()
        .map(|l| l.name.clone())
        .collect()
}

fn orders(config: &Configuration) -> Vec<u32> {
    config.links.iter().map(|l| l.order).collect()
}

#[test]
fn add_link_to_empty_config_gets_rank_zero_and_fresh_id() {
    let config = add_link(
        &base_config(),
        LinkDraft::new("GitHub", "https://github.com/x").with_icon("Github", IconType::Lucide),
    )
    .expect("add");
    assert_eq!(config.links.len(), 1);
    let link = &config.links[0];
    assert_eq!(link.order, 0);
    assert!(!link.id.as_str().is_empty());
    assert!(link.show);
    config.validate().expect("valid after add");
}

#[test]
fn add_link_rejects_empty_required_fields() {
    let original = base_config();
    let err = add_link(&original, LinkDraft::new("", "https://x.example")).expect_err("no name");
    assert!(matches!(
        err,
        EditError::Validation(ValidationError::Empty("link name"))
    ));
    let err = add_link(&original, LinkDraft::new("X", "  ")).expect_err("no url");
    assert!(matches!(
        err,
        EditError::Validation(ValidationError::Empty("link url"))
    ));
}

#[test]
fn added_ids_never_collide() {
    let config = config_with_links(&["A", "B", "C", "D"]);
    let mut ids: Vec<&str> = config.links.iter().map(|l| l.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 4);
}

#[test]
fn update_patches_fields_but_not_identity_or_rank() {
    let config = config_with_links(&["A", "B"]);
    let target = config.links[1].id.clone();
    let updated = update_link(
        &config,
        &target,
        LinkPatch {
            name: Some("Renamed".to_string()),
            url: Some("https://renamed.example".to_string()),
            show: Some(false),
            ..LinkPatch::default()
        },
    )
    .expect("update");
    let link = updated
        .links
        .iter()
        .find(|l| l.id == target)
        .expect("patched link");
    assert_eq!(link.name, "Renamed");
    assert_eq!(link.url, "https://renamed.example");
    assert!(!link.show);
    assert_eq!(link.order, 1);
}

#[test]
fn update_missing_link_fails_and_input_is_unchanged() {
    let config = config_with_links(&["A"]);
    let missing = LinkId::numeric(999);
    let err = update_link(&config, &missing, LinkPatch::default()).expect_err("missing id");
    assert!(matches!(err, EditError::LinkNotFound(id) if id == missing));
    assert_eq!(display_names(&config), vec!["A"]);
}

#[test]
fn update_rejects_emptying_required_fields() {
    let config = config_with_links(&["A"]);
    let target = config.links[0].id.clone();
    let err = update_link(
        &config,
        &target,
        LinkPatch {
            url: Some(String::new()),
            ..LinkPatch::default()
        },
    )
    .expect_err("empty url");
    assert!(matches!(err, EditError::Validation(_)));
}

#[test]
fn delete_middle_link_reranks_remaining_in_relative_order() {
    let config = config_with_links(&["A", "B", "C"]);
    let middle = config.links[1].id.clone();
    let after = delete_link(&config, &middle).expect("delete");
    assert_eq!(display_names(&after), vec!["A", "C"]);
    assert_eq!(orders(&after), vec![0, 1]);
}

#[test]
fn delete_missing_link_fails_loudly() {
    let config = config_with_links(&["A"]);
    let err = delete_link(&config, &LinkId::numeric(42)).expect_err("missing id");
    assert!(matches!(err, EditError::LinkNotFound(_)));
}

#[test]
fn toggle_flips_visibility_only() {
    let config = config_with_links(&["A"]);
    let target = config.links[0].id.clone();
    let toggled = toggle_visibility(&config, &target).expect("toggle");
    assert!(!toggled.links[0].show);
    let back = toggle_visibility(&toggled, &target).expect("toggle back");
    assert!(back.links[0].show);
    assert_eq!(orders(&back), orders(&config));
}

#[test]
fn toggle_missing_link_fails() {
    let config = base_config();
    assert!(matches!(
        toggle_visibility(&config, &LinkId::numeric(1)),
        Err(EditError::LinkNotFound(_))
    ));
}

#[test]
fn reorder_moves_head_to_tail() {
    let config = config_with_links(&["A", "B", "C"]);
    let after = reorder_links(&config, 0, 2).expect("reorder");
    assert_eq!(display_names(&after), vec!["B", "C", "A"]);
    assert_eq!(orders(&after), vec![0, 1, 2]);
}

#[test]
fn reorder_then_inverse_restores_display_order() {
    let config = config_with_links(&["A", "B", "C", "D"]);
    let moved = reorder_links(&config, 1, 3).expect("reorder");
    let restored = reorder_links(&moved, 3, 1).expect("inverse");
    assert_eq!(display_names(&restored), display_names(&config));
}

#[test]
fn reorder_same_index_is_a_no_op() {
    let config = config_with_links(&["A", "B"]);
    let after = reorder_links(&config, 1, 1).expect("no-op");
    assert_eq!(after, config);
}

#[test]
fn reorder_rejects_out_of_range_indices() {
    let config = config_with_links(&["A", "B"]);
    assert!(matches!(
        reorder_links(&config, 2, 0),
        Err(EditError::IndexOutOfRange { index: 2, len: 2 })
    ));
    assert!(matches!(
        reorder_links(&config, 0, 5),
        Err(EditError::IndexOutOfRange { index: 5, len: 2 })
    ));
}

#[test]
fn operations_never_mutate_their_input() {
    let config = config_with_links(&["A", "B", "C"]);
    let snapshot = config.clone();
    let _ = delete_link(&config, &config.links[0].id.clone());
    let _ = reorder_links(&config, 0, 2);
    let _ = toggle_visibility(&config, &config.links[1].id.clone());
    let _ = add_link(&config, LinkDraft::new("D", "https://d.example"));
    assert_eq!(config, snapshot);
}
