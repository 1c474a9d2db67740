use linkdeck_model::{
    Configuration, IconType, LinkId, LinkItem, Username, ValidationError, DEFAULT_AVATAR,
    DEFAULT_BIO, LINK_ID_MAX_LEN, USERNAME_MAX_LEN,
};

fn mk_link(id: &str, order: u32) -> LinkItem {
    LinkItem {
        id: LinkId::parse(id).expect("link id"),
        name: format!("link-{id}"),
        url: format!("https://example.com/{id}"),
        icon: "Globe".to_string(),
        icon_type: IconType::Lucide,
        show: true,
        order,
    }
}

fn mk_config(links: Vec<LinkItem>) -> Configuration {
    let mut config = Configuration::default_for(
        Username::parse("nitesh").expect("username"),
        "Nitesh Kumar",
    );
    config.links = links;
    config
}

#[test]
fn username_parsing_is_strict() {
    assert!(Username::parse("nitesh").is_ok());
    assert!(Username::parse("dev-2024_x").is_ok());
    assert!(Username::parse("").is_err());
    assert!(Username::parse("Nitesh").is_err());
    assert!(Username::parse("nit esh").is_err());
    assert!(Username::parse(" nitesh").is_err());
    assert!(Username::parse(&"a".repeat(USERNAME_MAX_LEN + 1)).is_err());
}

#[test]
fn link_id_rejects_hidden_trimming() {
    assert!(LinkId::parse("1712000000").is_ok());
    assert!(LinkId::parse(" 1").is_err());
    assert!(LinkId::parse("1 ").is_err());
    assert!(LinkId::parse("").is_err());
    assert!(LinkId::parse(&"x".repeat(LINK_ID_MAX_LEN + 1)).is_err());
}

#[test]
fn default_configuration_carries_documented_defaults() {
    let config = mk_config(Vec::new());
    assert_eq!(config.profile.bio, DEFAULT_BIO);
    assert_eq!(config.profile.avatar, DEFAULT_AVATAR);
    assert_eq!(config.theme.background_color, "#ffffff");
    assert_eq!(config.theme.font_family, "Inter, sans-serif");
    assert!(!config.special_button.enabled);
    assert_eq!(config.special_button.title, "Contact Me");
    assert!(config.links.is_empty());
    config.validate().expect("default configuration is valid");
}

#[test]
fn validate_rejects_empty_profile_name() {
    let mut config = mk_config(Vec::new());
    config.profile.name = "  ".to_string();
    assert!(matches!(
        config.validate(),
        Err(ValidationError::Empty("profile name"))
    ));
}

#[test]
fn validate_rejects_duplicate_link_ids() {
    let config = mk_config(vec![mk_link("1", 0), mk_link("1", 1)]);
    assert!(matches!(
        config.validate(),
        Err(ValidationError::DuplicateLinkId(id)) if id == "1"
    ));
}

#[test]
fn validate_rejects_non_dense_order() {
    let config = mk_config(vec![mk_link("1", 0), mk_link("2", 2)]);
    assert_eq!(config.validate(), Err(ValidationError::NonDenseOrder));
}

#[test]
fn validate_rejects_empty_link_fields() {
    let mut link = mk_link("1", 0);
    link.url = String::new();
    let config = mk_config(vec![link]);
    assert!(matches!(
        config.validate(),
        Err(ValidationError::EmptyLinkField { field: "url", .. })
    ));
}

#[test]
fn normalize_repairs_gaps_and_duplicates_in_rank() {
    let mut config = mk_config(vec![mk_link("a", 7), mk_link("b", 2), mk_link("c", 2)]);
    config.normalize_link_order();
    let ids: Vec<&str> = config.links.iter().map(|l| l.id.as_str()).collect();
    let orders: Vec<u32> = config.links.iter().map(|l| l.order).collect();
    assert_eq!(ids, vec!["b", "c", "a"]);
    assert_eq!(orders, vec![0, 1, 2]);
    config.validate().expect("normalized configuration is valid");
}

#[test]
fn sorted_links_returns_display_order() {
    let config = mk_config(vec![mk_link("a", 1), mk_link("b", 0)]);
    let ids: Vec<&str> = config
        .sorted_links()
        .into_iter()
        .map(|l| l.id.as_str())
        .collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[test]
fn ensure_owner_requires_matching_username() {
    let config = mk_config(Vec::new());
    let owner = Username::parse("nitesh").expect("username");
    let other = Username::parse("akshay").expect("username");
    config.ensure_owner(&owner).expect("owner matches");
    assert!(matches!(
        config.ensure_owner(&other),
        Err(ValidationError::UsernameMismatch { .. })
    ));
}
