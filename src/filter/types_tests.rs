use super::*;

#[test]
fn test_structural_equality_includes_reversed() {
    assert_eq!(Filter::tag("#a"), Filter::tag("#a"));
    assert_ne!(Filter::tag("#a"), Filter::tag("#a").negated());
    assert_ne!(Filter::tag("#a"), Filter::folder("#a"));
    assert_ne!(Filter::link("a.md", true), Filter::link("a.md", false));
}

#[test]
fn test_key_plain_kinds() {
    assert_eq!(Filter::tag("#project").key().as_str(), "tag:#project");
    assert_eq!(Filter::folder("notes").key().as_str(), "folder:notes");
    assert_eq!(Filter::backlink("a.md").key().as_str(), "backlink:a.md");
    assert_eq!(Filter::text("foo").key().as_str(), "text:foo");
}

#[test]
fn test_key_equal_filters_share_key() {
    let a = Filter::link_with_alias("a.md", true, "Alpha").negated();
    let b = Filter::link_with_alias("a.md", true, "Alpha").negated();
    assert_eq!(a, b);
    assert_eq!(a.key(), b.key());
}

#[test]
fn test_key_differs_on_reversed() {
    for filter in [
        Filter::tag("#a"),
        Filter::folder("f"),
        Filter::link("a.md", true),
        Filter::backlink("b.md"),
        Filter::text("t"),
    ] {
        let reversed = filter.clone().negated();
        assert_ne!(filter.key(), reversed.key(), "{filter}");
    }
}

#[test]
fn test_link_key_encodes_alias_and_existence() {
    let plain = Filter::link("a.md", true);
    let missing = Filter::link("a.md", false);
    let aliased = Filter::link_with_alias("a.md", true, "Alpha");

    assert_eq!(plain.key().as_str(), "link:a.md");
    assert_eq!(missing.key().as_str(), "link:nofile:a.md");
    assert_eq!(aliased.key().as_str(), "link:alias:Alpha:a.md");
    assert_ne!(plain.key(), missing.key());
    assert_ne!(plain.key(), aliased.key());
}

#[test]
fn test_parse_each_kind() {
    assert_eq!("tag:#x".parse::<Filter>().unwrap(), Filter::tag("#x"));
    assert_eq!("tag:x".parse::<Filter>().unwrap(), Filter::tag("#x"));
    assert_eq!("folder:notes".parse::<Filter>().unwrap(), Filter::folder("notes"));
    assert_eq!("link:a.md".parse::<Filter>().unwrap(), Filter::link("a.md", true));
    assert_eq!(
        "link:a.md|Alpha".parse::<Filter>().unwrap(),
        Filter::link_with_alias("a.md", true, "Alpha")
    );
    assert_eq!("backlink:b.md".parse::<Filter>().unwrap(), Filter::backlink("b.md"));
    assert_eq!("text:Hello World".parse::<Filter>().unwrap(), Filter::text("Hello World"));
}

#[test]
fn test_parse_reversed() {
    let f: Filter = "!folder:archive".parse().unwrap();
    assert_eq!(f, Filter::folder("archive").negated());
}

#[test]
fn test_parse_errors() {
    assert_eq!(
        "nonsense".parse::<Filter>(),
        Err(FilterError::InvalidFormat("nonsense".into()))
    );
    assert_eq!(
        "color:red".parse::<Filter>(),
        Err(FilterError::UnknownKind("color".into()))
    );
    assert_eq!("tag:".parse::<Filter>(), Err(FilterError::EmptyValue(FilterType::Tag)));
    assert_eq!(
        "tag:my project".parse::<Filter>(),
        Err(FilterError::InvalidTag("my project".into()))
    );
    assert_eq!("text:".parse::<Filter>(), Ok(Filter::text("")));
}

#[test]
fn test_display_round_trips_through_parse() {
    for filter in [
        Filter::tag("#a/b"),
        Filter::folder("x/y").negated(),
        Filter::link_with_alias("a.md", true, "A"),
        Filter::backlink("b.md"),
        Filter::text("needle").negated(),
    ] {
        let parsed: Filter = filter.to_string().parse().unwrap();
        assert_eq!(parsed, filter);
    }
}

#[test]
fn test_describe() {
    assert_eq!(Filter::tag("#a").describe(), "Has tag #a");
    assert_eq!(Filter::folder("n").negated().describe(), "Is not inside folder n");
    assert_eq!(Filter::link("x.md", false).describe(), "Links to x.md (missing)");
    assert_eq!(
        Filter::link_with_alias("x.md", true, "Ex").describe(),
        "Links to Ex (x.md)"
    );
    assert_eq!(Filter::backlink("b.md").describe(), "Is linked by b.md");
    assert_eq!(Filter::text("t").negated().describe(), "Does not contain text t");
}

#[test]
fn test_serde_shape() {
    let f = Filter::link("a.md", false).negated();
    let json = serde_json::to_value(&f).unwrap();
    assert_eq!(json["type"], "link");
    assert_eq!(json["value"], "a.md");
    assert_eq!(json["exists"], false);
    assert_eq!(json["reversed"], true);

    let back: Filter = serde_json::from_value(json).unwrap();
    assert_eq!(back, f);
}

#[test]
fn test_backend_expressible() {
    assert!(FilterType::Tag.is_backend_expressible());
    assert!(FilterType::Backlink.is_backend_expressible());
    assert!(!FilterType::Text.is_backend_expressible());
}
