//! In-memory backend that records every call, for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{Backend, FetchParams};
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Fetch,
    Create,
    Update,
    Transition,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Fetch {
        collection: String,
        params: FetchParams,
    },
    Create {
        collection: String,
        payload: Value,
    },
    Update {
        collection: String,
        id: String,
        payload: Value,
    },
    Transition {
        collection: String,
        id: String,
        transition: String,
    },
    Delete {
        collection: String,
        id: String,
    },
}

impl Call {
    pub fn op(&self) -> Op {
        match self {
            Self::Fetch { .. } => Op::Fetch,
            Self::Create { .. } => Op::Create,
            Self::Update { .. } => Op::Update,
            Self::Transition { .. } => Op::Transition,
            Self::Delete { .. } => Op::Delete,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    collections: HashMap<String, Vec<Value>>,
    calls: Vec<Call>,
    failures: HashMap<Op, VecDeque<(StatusCode, Option<String>)>>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection with serialized items.
    pub fn with_items<T: Serialize>(self, collection: &str, items: &[T]) -> Self {
        let values = items
            .iter()
            .map(|i| serde_json::to_value(i).unwrap())
            .collect();
        self.lock().collections.insert(collection.to_string(), values);
        self
    }

    /// Make the next call of `op` fail with the given status and message.
    pub fn fail_next(&self, op: Op, status: StatusCode, message: Option<&str>) {
        self.lock()
            .failures
            .entry(op)
            .or_default()
            .push_back((status, message.map(str::to_string)));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn count(&self, op: Op) -> usize {
        self.lock().calls.iter().filter(|c| c.op() == op).count()
    }

    pub fn items(&self, collection: &str) -> Vec<Value> {
        self.lock()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Drop an item without recording a call, as another admin would.
    pub fn remove(&self, collection: &str, id: &str) {
        let mut inner = self.lock();
        if let Some(items) = inner.collections.get_mut(collection) {
            items.retain(|v| v["_id"] != id);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    fn record(&self, call: Call) -> Result<(), AppError> {
        let mut inner = self.lock();
        let op = call.op();
        inner.calls.push(call);
        match inner.failures.get_mut(&op).and_then(VecDeque::pop_front) {
            Some((status, message)) => Err(AppError::Http { status, message }),
            None => Ok(()),
        }
    }

    fn position(items: &[Value], id: &str) -> Option<usize> {
        items.iter().position(|v| v["_id"] == id)
    }
}

impl Backend for MemoryBackend {
    async fn fetch<T>(&self, collection: &str, params: &FetchParams) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        self.record(Call::Fetch {
            collection: collection.to_string(),
            params: params.clone(),
        })?;
        let items = self.items(collection);
        let items = match params.limit {
            Some(limit) => items.into_iter().take(limit).collect(),
            None => items,
        };
        Ok(serde_json::from_value(Value::Array(items))?)
    }

    async fn create<P>(&self, collection: &str, payload: &P) -> Result<(), AppError>
    where
        P: Serialize + Sync,
    {
        let payload = serde_json::to_value(payload)?;
        self.record(Call::Create {
            collection: collection.to_string(),
            payload: payload.clone(),
        })?;
        self.lock()
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(payload);
        Ok(())
    }

    async fn update<P>(&self, collection: &str, id: &str, payload: &P) -> Result<(), AppError>
    where
        P: Serialize + Sync,
    {
        let payload = serde_json::to_value(payload)?;
        self.record(Call::Update {
            collection: collection.to_string(),
            id: id.to_string(),
            payload: payload.clone(),
        })?;
        let mut inner = self.lock();
        let items = inner.collections.entry(collection.to_string()).or_default();
        match Self::position(items, id) {
            Some(i) => {
                items[i] = payload;
                Ok(())
            }
            None => Err(AppError::Http {
                status: StatusCode::NOT_FOUND,
                message: None,
            }),
        }
    }

    async fn transition(&self, collection: &str, id: &str, transition: &str) -> Result<(), AppError> {
        self.record(Call::Transition {
            collection: collection.to_string(),
            id: id.to_string(),
            transition: transition.to_string(),
        })?;
        let mut inner = self.lock();
        let items = inner.collections.entry(collection.to_string()).or_default();
        if let (Some(i), "deliver") = (Self::position(items, id), transition) {
            items[i]["isDelivered"] = Value::Bool(true);
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), AppError> {
        self.record(Call::Delete {
            collection: collection.to_string(),
            id: id.to_string(),
        })?;
        let mut inner = self.lock();
        let items = inner.collections.entry(collection.to_string()).or_default();
        if let Some(i) = Self::position(items, id) {
            items.remove(i);
        }
        Ok(())
    }
}
