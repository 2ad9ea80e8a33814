use freebie_calendar::catalog::{Catalog, CatalogError, Category, OfferId, RedemptionWindow};
use std::io::Cursor;

const HEADER: &str = "id,name,description,category,types,offer_title,offer_description,value_min,value_max,requires_app,requires_email,requires_id,advance_signup_days,redemption_window,popularity,last_verified_at\n";

#[test]
fn bundled_catalog_is_valid() {
    let catalog = Catalog::bundled().expect("bundled catalog parses");

    assert_eq!(catalog.len(), 14);
    let starbucks = catalog
        .get(&OfferId::from("starbucks-birthday"))
        .expect("starbucks present");
    assert_eq!(starbucks.category, Category::Drinks);
    assert_eq!(starbucks.redemption_window, RedemptionWindow::Day);
    assert!(starbucks.requirements.requires_app);
    assert_eq!(catalog.by_type("ice-cream").len(), 2);
    assert!(catalog
        .category_counts()
        .contains(&(Category::Entertainment, 1)));
}

#[test]
fn csv_export_loads() {
    let csv = format!(
        "{HEADER}\
         dennys-birthday,Denny's,Grand Slam,food,breakfast|diner,Free Grand Slam,,,,false,false,true,0,day,85,2025-01-20\n\
         cineplex-birthday,Cineplex,Popcorn,entertainment,movies,Free Popcorn,Small size,,,true,true,false,3,week,70,\n"
    );

    let catalog = Catalog::from_csv_reader(Cursor::new(csv)).expect("csv loads");

    assert_eq!(catalog.len(), 2);
    let cineplex = catalog
        .get(&OfferId::from("cineplex-birthday"))
        .expect("cineplex present");
    assert!(cineplex.last_verified_at.is_none());
    assert_eq!(cineplex.offer.description.as_deref(), Some("Small size"));
    assert_eq!(cineplex.advance_signup_days(), 3);
}

#[test]
fn csv_with_unknown_window_names_the_line() {
    let csv = format!(
        "{HEADER}a,A,,food,,Free,,,,false,false,false,0,day,1,\n\
         b,B,,food,,Free,,,,false,false,false,0,fortnight,1,\n"
    );

    let err = Catalog::from_csv_reader(Cursor::new(csv)).expect_err("bad window rejected");
    assert!(matches!(err, CatalogError::InvalidRow { line: 3, .. }));
}

#[test]
fn duplicate_ids_are_rejected() {
    let json = r#"[
        {"id": "x", "name": "X", "description": "", "category": "food",
         "offer": {"title": "Free"}, "redemption_window": "day"},
        {"id": "x", "name": "X again", "description": "", "category": "food",
         "offer": {"title": "Free"}, "redemption_window": "week"}
    ]"#;

    let err = Catalog::from_json_reader(Cursor::new(json)).expect_err("duplicate rejected");
    assert!(matches!(err, CatalogError::DuplicateId(id) if id.as_str() == "x"));
}

#[test]
fn negative_signup_days_fail_to_parse() {
    let json = r#"[
        {"id": "x", "name": "X", "description": "", "category": "food",
         "offer": {"title": "Free"}, "redemption_window": "day",
         "requirements": {"advance_signup_days": -3}}
    ]"#;

    assert!(matches!(
        Catalog::from_json_reader(Cursor::new(json)),
        Err(CatalogError::Json(_))
    ));
}

#[test]
fn from_path_picks_csv_by_extension() {
    let path = std::env::temp_dir().join(format!("freebies-{}.csv", std::process::id()));
    std::fs::write(
        &path,
        format!("{HEADER}a,A,,retail,,Free bear,,,,false,true,false,14,month,61,2025-01-15\n"),
    )
    .expect("temp file written");

    let loaded = Catalog::from_path(&path);
    std::fs::remove_file(&path).ok();

    let catalog = loaded.expect("csv file loads");
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.offers()[0].category, Category::Retail);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Catalog::from_path("/definitely/not/here.json").expect_err("missing file");
    assert!(matches!(err, CatalogError::Io(_)));
}
