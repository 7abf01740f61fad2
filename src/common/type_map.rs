use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::Arc,
};

/// A type-erased shared handle as stored in the map
pub(crate) type Untyped = Arc<dyn Any + Send + Sync>;

type Map = HashMap<TypeId, Untyped>;

pub(crate) struct TypeMap {
    inner: RwLock<Map>,
}

impl TypeMap {
    pub(crate) fn new() -> Self {
        Self {
            inner: RwLock::new(Map::new()),
        }
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Map> {
        self.inner.read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Map> {
        self.inner.write()
    }
}
