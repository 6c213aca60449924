use metrics_exporter_prometheus::PrometheusHandle;
use school_ledger::config::LedgerConfig;
use school_ledger::enrollment::dashboard::{SchoolStore, StoreError};
use school_ledger::enrollment::import::{read_schools_from_path, ImportError};
use school_ledger::enrollment::{Ledger, LedgerSnapshot, LicenseClass, SchoolId, SchoolRecord};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local stand-in for the external school store.
#[derive(Default, Clone)]
pub(crate) struct InMemorySchoolStore {
    schools: Arc<Mutex<Vec<SchoolRecord>>>,
}

impl InMemorySchoolStore {
    pub(crate) fn with_schools(schools: Vec<SchoolRecord>) -> Self {
        Self {
            schools: Arc::new(Mutex::new(schools)),
        }
    }

    /// Seed from `LEDGER_SCHOOLS_CSV` when configured, else the demo schools.
    pub(crate) fn from_config(config: &LedgerConfig) -> Result<Self, ImportError> {
        let schools = match &config.schools_csv {
            Some(path) => {
                let schools = read_schools_from_path(path)?;
                info!(path = %path.display(), count = schools.len(), "seeded schools from CSV");
                schools
            }
            None => demo_schools(),
        };
        Ok(Self::with_schools(schools))
    }
}

impl SchoolStore for InMemorySchoolStore {
    fn schools(&self) -> Result<Vec<SchoolRecord>, StoreError> {
        let guard = self.schools.lock().expect("school store mutex poisoned");
        Ok(guard.clone())
    }

    fn fetch(&self, id: &SchoolId) -> Result<Option<SchoolRecord>, StoreError> {
        let guard = self.schools.lock().expect("school store mutex poisoned");
        Ok(guard.iter().find(|school| &school.id == id).cloned())
    }

    fn persist_ledger(&self, id: &SchoolId, snapshot: LedgerSnapshot) -> Result<(), StoreError> {
        let mut guard = self.schools.lock().expect("school store mutex poisoned");
        match guard.iter_mut().find(|school| &school.id == id) {
            Some(school) => {
                school.candidates = Ledger::from(snapshot);
                Ok(())
            }
            None => Err(StoreError::NotFound(id.clone())),
        }
    }
}

pub(crate) fn demo_schools() -> Vec<SchoolRecord> {
    vec![
        SchoolRecord::new(
            "yildiz",
            "Yıldız Sürücü Kursu",
            Ledger::from_counts([
                (LicenseClass::B, 12),
                (LicenseClass::A1, 3),
                (LicenseClass::FarkA2, 1),
            ]),
        ),
        SchoolRecord::new(
            "anadolu",
            "Anadolu Sürücü Kursu",
            Ledger::from_counts([
                (LicenseClass::B, 8),
                (LicenseClass::A2, 2),
                (LicenseClass::C, 1),
                (LicenseClass::BakanlikA1, 4),
            ]),
        ),
        SchoolRecord::new(
            "marmara",
            "Marmara Sürücü Kursu",
            Ledger::from_counts([(LicenseClass::D, 2), (LicenseClass::FarkA1, 5)]),
        ),
    ]
}
