use super::*;

// =============================================================
// RouteDef::matches
// =============================================================

#[test]
fn static_route_matches_with_query_and_trailing_slash() {
    let route = RouteDef::gated("documents", "/dokumente", "Dokumente");
    assert!(route.matches("/dokumente"));
    assert!(route.matches("/dokumente/"));
    assert!(route.matches("/dokumente?tag=steuer"));
    assert!(!route.matches("/dokumente/42"));
    assert!(!route.matches("/dokument"));
}

#[test]
fn param_segment_matches_any_single_segment() {
    let route = RouteDef::gated("document-detail", "/dokumente/:id", "Dokument");
    assert!(route.matches("/dokumente/42"));
    assert!(route.matches("/dokumente/abc?tab=ocr"));
    assert!(!route.matches("/dokumente"));
    assert!(!route.matches("/dokumente/42/file"));
}

#[test]
fn root_route_only_matches_root() {
    let route = RouteDef::gated("dashboard", "/", "Übersicht");
    assert!(route.matches("/"));
    assert!(route.matches("/?welcome=1"));
    assert!(!route.matches("/suche"));
}

// =============================================================
// RouteTable
// =============================================================

#[test]
fn standard_table_has_pin_route_as_only_public_route() {
    let table = RouteTable::standard();
    assert_eq!(table.pin_route().path, PIN_ROUTE_PATH);
    assert_eq!(table.pin_route().name, PIN_ROUTE_NAME);
    let public = table.routes().iter().filter(|r| r.visibility == Visibility::Public).count();
    assert_eq!(public, 1);
    assert!(RouteTable::new(table.routes().to_vec()).is_ok());
}

#[test]
fn visibility_of_known_and_unknown_paths() {
    let table = RouteTable::standard();
    assert_eq!(table.visibility("/pin"), Visibility::Public);
    assert_eq!(table.visibility("/pin?redirect=%2Fsuche"), Visibility::Public);
    assert_eq!(table.visibility("/suche"), Visibility::Gated);
    assert_eq!(table.visibility("/documents/42"), Visibility::Gated);
    assert!(table.resolve("/documents/42").is_none());
}

#[test]
fn resolve_returns_named_route() {
    let table = RouteTable::standard();
    assert_eq!(table.resolve("/dokumente/7").map(|r| r.name), Some("document-detail"));
    assert_eq!(table.resolve("/einstellungen/").map(|r| r.name), Some("settings"));
}

#[test]
fn table_without_public_route_is_rejected() {
    let routes = vec![RouteDef::gated("dashboard", "/", "Übersicht")];
    assert_eq!(RouteTable::new(routes).unwrap_err(), RouteError::MissingPinRoute);
}

#[test]
fn table_with_two_public_routes_is_rejected() {
    let routes = vec![
        RouteDef::public("pin-login", "/pin", "PIN"),
        RouteDef::public("about", "/about", "Info"),
        RouteDef::gated("dashboard", "/", "Übersicht"),
    ];
    assert_eq!(RouteTable::new(routes).unwrap_err(), RouteError::MultiplePublicRoutes(2));
}
