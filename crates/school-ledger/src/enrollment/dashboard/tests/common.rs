use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::enrollment::dashboard::router::{dashboard_router, DashboardState};
use crate::enrollment::dashboard::store::{SchoolStore, StoreError};
use crate::enrollment::domain::{LicenseClass, SchoolId, SchoolRecord};
use crate::enrollment::fees::FeeSchedule;
use crate::enrollment::ledger::{Ledger, LedgerSnapshot};

pub(super) fn fees() -> Arc<FeeSchedule> {
    Arc::new(
        FeeSchedule::zero()
            .with_fee(LicenseClass::B, 5_000)
            .with_fee(LicenseClass::A1, 7_000),
    )
}

pub(super) fn school_x() -> SchoolRecord {
    SchoolRecord::new(
        "school-x",
        "Yıldız Sürücü Kursu",
        Ledger::from_counts([(LicenseClass::B, 2)]),
    )
}

pub(super) fn school_y() -> SchoolRecord {
    SchoolRecord::new(
        "school-y",
        "Anadolu Sürücü Kursu",
        Ledger::from_counts([(LicenseClass::B, 1), (LicenseClass::A1, 1)]),
    )
}

#[derive(Default)]
pub(super) struct MemoryStore {
    schools: Mutex<Vec<SchoolRecord>>,
    relays: Mutex<Vec<(SchoolId, LedgerSnapshot)>>,
}

impl MemoryStore {
    pub(super) fn seeded() -> Self {
        let store = Self::default();
        store
            .schools
            .lock()
            .expect("store mutex poisoned")
            .extend([school_x(), school_y()]);
        store
    }

    pub(super) fn relays(&self) -> Vec<(SchoolId, LedgerSnapshot)> {
        self.relays.lock().expect("relay mutex poisoned").clone()
    }
}

impl SchoolStore for MemoryStore {
    fn schools(&self) -> Result<Vec<SchoolRecord>, StoreError> {
        Ok(self.schools.lock().expect("store mutex poisoned").clone())
    }

    fn fetch(&self, id: &SchoolId) -> Result<Option<SchoolRecord>, StoreError> {
        Ok(self
            .schools
            .lock()
            .expect("store mutex poisoned")
            .iter()
            .find(|school| &school.id == id)
            .cloned())
    }

    fn persist_ledger(&self, id: &SchoolId, snapshot: LedgerSnapshot) -> Result<(), StoreError> {
        let mut schools = self.schools.lock().expect("store mutex poisoned");
        let school = schools
            .iter_mut()
            .find(|school| &school.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        school.candidates = Ledger::from(snapshot.clone());
        self.relays
            .lock()
            .expect("relay mutex poisoned")
            .push((id.clone(), snapshot));
        Ok(())
    }
}

/// Serves reads but refuses every write.
pub(super) struct ReadOnlyStore;

impl SchoolStore for ReadOnlyStore {
    fn schools(&self) -> Result<Vec<SchoolRecord>, StoreError> {
        Ok(vec![school_x(), school_y()])
    }

    fn fetch(&self, id: &SchoolId) -> Result<Option<SchoolRecord>, StoreError> {
        Ok(self.schools()?.into_iter().find(|school| &school.id == id))
    }

    fn persist_ledger(&self, _id: &SchoolId, _snapshot: LedgerSnapshot) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("read only".to_string()))
    }
}

pub(super) struct UnavailableStore;

impl SchoolStore for UnavailableStore {
    fn schools(&self) -> Result<Vec<SchoolRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &SchoolId) -> Result<Option<SchoolRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn persist_ledger(&self, _id: &SchoolId, _snapshot: LedgerSnapshot) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn router_with_store<S: SchoolStore + 'static>(store: Arc<S>) -> axum::Router {
    dashboard_router(Arc::new(DashboardState::new(store, fees())))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
