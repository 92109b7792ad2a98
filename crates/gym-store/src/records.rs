use serde::{de::DeserializeOwned, Serialize};

use gym_domain::{AttendanceRecord, Expense, Fields, GymClass, Id, Member, Trainer};

use crate::results::StoreError;

/// A record type persisted as one JSON array under `KEY`.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KEY: &'static str;
    fn id(&self) -> Id;
}

impl Record for Member {
    const KEY: &'static str = "members";
    fn id(&self) -> Id {
        self.id
    }
}

impl Record for AttendanceRecord {
    const KEY: &'static str = "attendance";
    fn id(&self) -> Id {
        self.id
    }
}

impl Record for Expense {
    const KEY: &'static str = "expenses";
    fn id(&self) -> Id {
        self.id
    }
}

impl Record for Trainer {
    const KEY: &'static str = "trainers";
    fn id(&self) -> Id {
        self.id
    }
}

impl Record for GymClass {
    const KEY: &'static str = "classes";
    fn id(&self) -> Id {
        self.id
    }
}

/// Caller fields with the store owned keys removed.
pub fn without_reserved(mut fields: Fields, reserved: &[&str]) -> Fields {
    for key in reserved {
        fields.remove(*key);
    }
    fields
}

/// Shallow merge `patch` into a record. Top level keys of the patch
/// replace those of the record, `id` can not be changed.
pub fn merge<T: Record>(record: &T, patch: Fields) -> Result<T, StoreError> {
    let mut value = serde_json::to_value(record)?;
    let object = value
        .as_object_mut()
        .ok_or_else(|| StoreError::InvalidPatch(format!("{} record is not an object", T::KEY)))?;
    for (key, v) in without_reserved(patch, &["id"]) {
        object.insert(key, v);
    }
    serde_json::from_value(value).map_err(|err| StoreError::InvalidPatch(err.to_string()))
}
