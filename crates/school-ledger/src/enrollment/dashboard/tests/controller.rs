use super::common::*;
use std::sync::Arc;

use crate::enrollment::dashboard::controller::{DashboardController, DashboardError};
use crate::enrollment::dashboard::store::{SchoolStore, StoreError};
use crate::enrollment::domain::{LedgerError, LicenseClass, SchoolId, SchoolRecord};
use crate::enrollment::ledger::Ledger;

fn empty_school() -> SchoolRecord {
    SchoolRecord::new("school-z", "Marmara Sürücü Kursu", Ledger::new())
}

#[test]
fn increase_updates_totals_immediately() {
    let store = Arc::new(MemoryStore::seeded());
    let mut controller = DashboardController::new(store, fees(), empty_school());

    assert_eq!(controller.increase(LicenseClass::B).expect("relay"), 1);
    assert_eq!(controller.increase(LicenseClass::B).expect("relay"), 2);
    assert_eq!(controller.increase(LicenseClass::A1).expect("relay"), 1);

    let totals = controller.totals();
    assert_eq!(totals.total_candidates, 3);
    assert_eq!(totals.total_fee, 17_000);
    assert_eq!(totals.total_fee_display, "17.000 TL");
}

#[test]
fn decrease_at_zero_is_silent() {
    let store = Arc::new(MemoryStore::seeded());
    let mut controller = DashboardController::new(store, fees(), empty_school());

    assert_eq!(controller.decrease(LicenseClass::B).expect("no error"), 0);
    assert_eq!(controller.school().candidates.read(LicenseClass::B), 0);
    assert_eq!(controller.totals().total_candidates, 0);
}

#[test]
fn every_mutation_relays_full_snapshot() {
    let store = Arc::new(MemoryStore::seeded());
    let id = SchoolId::new("school-x");
    let mut controller =
        DashboardController::open(store.clone(), fees(), &id).expect("school exists");

    controller.increase(LicenseClass::C).expect("relay");
    controller.decrease(LicenseClass::B).expect("relay");

    let relays = store.relays();
    assert_eq!(relays.len(), 2);
    let (relayed_id, snapshot) = &relays[1];
    assert_eq!(relayed_id, &id);
    assert_eq!(snapshot.len(), LicenseClass::COUNT);
    assert_eq!(snapshot[&LicenseClass::B], 1);
    assert_eq!(snapshot[&LicenseClass::C], 1);

    let stored = store.fetch(&id).expect("fetch").expect("present");
    assert_eq!(stored.candidates, controller.school().candidates);
}

#[test]
fn relay_failure_keeps_local_change() {
    let mut controller = DashboardController::new(Arc::new(ReadOnlyStore), fees(), school_x());

    match controller.increase(LicenseClass::B) {
        Err(DashboardError::Store(StoreError::Unavailable(_))) => {}
        other => panic!("expected relay failure, got {other:?}"),
    }
    assert_eq!(controller.school().candidates.read(LicenseClass::B), 3);
    assert_eq!(controller.totals().total_fee, 15_000);
}

#[test]
fn open_propagates_not_found() {
    let store = Arc::new(MemoryStore::seeded());
    match DashboardController::open(store, fees(), &SchoolId::new("missing")) {
        Err(DashboardError::Store(StoreError::NotFound(id))) => assert_eq!(id.as_str(), "missing"),
        Err(other) => panic!("expected not found, got {other:?}"),
        Ok(_) => panic!("expected not found"),
    }
}

#[test]
fn adjust_code_rejects_unknown_category() {
    let store = Arc::new(MemoryStore::seeded());
    let mut controller = DashboardController::new(store.clone(), fees(), school_x());

    match controller.adjust_code("Z", 1) {
        Err(DashboardError::Ledger(LedgerError::UnknownCategory(code))) => assert_eq!(code, "Z"),
        other => panic!("expected unknown category, got {other:?}"),
    }
    assert!(store.relays().is_empty());

    let view = controller.adjust_code("FARK_A1", 5).expect("known code");
    assert_eq!(view.category, LicenseClass::FarkA1);
    assert_eq!(view.count, 5);
    assert_eq!(view.totals.total_candidates, 7);
}

#[test]
fn toggles_are_independent_of_totals() {
    let store = Arc::new(MemoryStore::seeded());
    let mut controller = DashboardController::new(store, fees(), school_y());
    let before = controller.totals();

    let initial = controller.panels();
    assert!(!initial.candidate_form);
    assert!(!initial.analytics);
    assert!(initial.report);

    assert!(controller.toggle_candidate_form());
    assert!(controller.toggle_analytics());
    assert!(!controller.toggle_report());
    assert!(!controller.toggle_analytics());

    let panels = controller.panels();
    assert!(panels.candidate_form);
    assert!(!panels.analytics);
    assert!(!panels.report);
    assert_eq!(controller.totals(), before);
}

#[test]
fn render_includes_only_visible_panels() {
    let store = Arc::new(MemoryStore::seeded());
    let mut controller = DashboardController::new(store, fees(), school_y());
    let schools = vec![school_x(), school_y()];

    let view = controller.render(&schools);
    assert_eq!(view.welcome, "Hoş Geldiniz, Anadolu Sürücü Kursu!");
    assert!(view.candidate_form.is_none());
    assert!(view.analytics.is_none());
    assert!(view.report.is_some());

    controller.toggle_candidate_form();
    controller.toggle_analytics();
    controller.toggle_report();
    let view = controller.render(&schools);
    let entries = view.candidate_form.expect("entry panel shown");
    assert_eq!(entries.len(), LicenseClass::COUNT);
    assert_eq!(entries[1].count, 1);
    let chart = view.analytics.expect("chart shown");
    assert_eq!(chart.points[0].count, 1);
    assert!(view.report.is_none());
}

#[test]
fn report_uses_local_ledger_for_active_school() {
    let store = Arc::new(ReadOnlyStore);
    let mut controller = DashboardController::new(store.clone(), fees(), school_x());
    let _ = controller.increase(LicenseClass::A1);

    let view = controller.render_from_store().expect("schools load");
    let report = view.report.expect("report expanded");
    assert_eq!(report.rows[0].total_candidates, 3);
    assert_eq!(report.rows[0].total_fee, 17_000);
    assert_eq!(report.footer.total_candidates, 5);
    assert_eq!(report.footer.total_fee, 29_000);
    assert_eq!(view.totals.total_candidates, 3);
}

#[test]
fn render_from_store_propagates_unavailable() {
    let controller = DashboardController::new(Arc::new(UnavailableStore), fees(), school_x());
    assert!(matches!(
        controller.render_from_store(),
        Err(DashboardError::Store(StoreError::Unavailable(_)))
    ));
}
