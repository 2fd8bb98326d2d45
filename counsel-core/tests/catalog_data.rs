use counsel_core::{ServiceCatalog, ServiceIcon, ServiceId};

fn load_catalog() -> ServiceCatalog {
    ServiceCatalog::bundled().unwrap()
}

#[test]
fn shipped_catalog_loads_three_services_in_order() {
    let catalog = load_catalog();
    let ids: Vec<&str> = catalog.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["education", "marriage", "life"]);
}

#[test]
fn shipped_prices_are_in_paise() {
    let catalog = load_catalog();
    let price = |id: &str| {
        catalog
            .get(&ServiceId::from(id))
            .map(|s| s.price.minor_units())
            .unwrap()
    };
    assert_eq!(price("education"), 99_900);
    assert_eq!(price("marriage"), 149_900);
    assert_eq!(price("life"), 99_900);
}

#[test]
fn every_service_has_copy_for_both_views() {
    for service in load_catalog().iter() {
        assert!(!service.description.is_empty(), "{}", service.id);
        assert!(!service.overview.is_empty(), "{}", service.id);
        assert!(!service.audience.is_empty(), "{}", service.id);
        assert_eq!(service.includes.len(), 4, "{}", service.id);
        assert_eq!(service.duration, "45 minutes");
    }
}

#[test]
fn grid_titles_fall_back_to_booking_title() {
    let catalog = load_catalog();
    let education = catalog.get(&ServiceId::from("education")).unwrap();
    assert_eq!(education.title, "Career Counselling");
    assert_eq!(education.grid_title(), "Education Counselling");
    let marriage = catalog.get(&ServiceId::from("marriage")).unwrap();
    assert_eq!(marriage.grid_title(), "Marriage & Relationship Guidance");
    assert_eq!(marriage.icon, ServiceIcon::Heart);
}
