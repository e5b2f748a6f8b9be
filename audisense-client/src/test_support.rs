//! In-memory gateway standing in for the API in unit tests

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use audisense_common::models::HEARING_TESTS_PATH;
use audisense_common::{HearingTestId, HearingTestRequest, HearingTestView};
use chrono::{Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::gateway::DataGateway;

pub(crate) fn request(tester_name: &str, days_ago: i64) -> HearingTestRequest {
    HearingTestRequest {
        tester_name: tester_name.to_string(),
        date_conducted: Utc::now() - Duration::days(days_ago),
        result: "Normal hearing range".to_string(),
    }
}

#[derive(Default)]
struct FakeState {
    records: BTreeMap<HearingTestId, HearingTestView>,
    next_id: HearingTestId,
    offline: bool,
    fail_gets: bool,
    calls: Vec<String>,
}

/// Behaves like the API server, with switches to simulate failures
#[derive(Default)]
pub(crate) struct FakeGateway {
    state: Mutex<FakeState>,
}

impl FakeGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Every call fails, as if the server were unreachable
    pub(crate) fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    /// GETs fail; mutations still go through
    pub(crate) fn set_fail_gets(&self, fail: bool) {
        self.state.lock().unwrap().fail_gets = fail;
    }

    /// Remove a record behind the client's back
    pub(crate) fn remove(&self, id: HearingTestId) {
        self.state.lock().unwrap().records.remove(&id);
    }

    /// "METHOD path" for every call made so far
    pub(crate) fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }
}

/// `None` for the collection, `Some(id)` for an item, `Err` otherwise
fn parse_path(path: &str) -> Result<Option<HearingTestId>, ()> {
    let rest = path.strip_prefix(HEARING_TESTS_PATH).ok_or(())?;
    match rest.strip_prefix('/') {
        None if rest.is_empty() => Ok(None),
        Some(id) => id.parse().map(Some).map_err(|_| ()),
        None => Err(()),
    }
}

fn convert<S: Serialize, T: DeserializeOwned>(value: &S) -> Option<T> {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| serde_json::from_value(v).ok())
}

#[async_trait]
impl DataGateway for FakeGateway {
    async fn get<T>(&self, path: &str) -> Option<T>
    where
        T: DeserializeOwned + Send,
    {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("GET {}", path));
        if state.offline || state.fail_gets {
            return None;
        }

        match parse_path(path).ok()? {
            None => convert(&state.records.values().collect::<Vec<_>>()),
            Some(id) => state.records.get(&id).and_then(|view| convert(view)),
        }
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Option<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("POST {}", path));
        if state.offline || parse_path(path) != Ok(None) {
            return None;
        }

        let request: HearingTestRequest = convert(body)?;
        state.next_id += 1;
        let view = HearingTestView {
            id: state.next_id,
            tester_name: request.tester_name,
            date_conducted: request.date_conducted,
            result: request.result,
        };
        state.records.insert(view.id, view.clone());
        convert(&view)
    }

    async fn put<B>(&self, path: &str, body: &B) -> bool
    where
        B: Serialize + Sync,
    {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("PUT {}", path));
        if state.offline {
            return false;
        }

        let (Ok(Some(id)), Some(request)) = (parse_path(path), convert::<_, HearingTestRequest>(body))
        else {
            return false;
        };
        match state.records.get_mut(&id) {
            Some(existing) => {
                existing.tester_name = request.tester_name;
                existing.date_conducted = request.date_conducted;
                existing.result = request.result;
                true
            }
            None => false,
        }
    }

    async fn delete(&self, path: &str) -> bool {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("DELETE {}", path));
        if state.offline {
            return false;
        }

        match parse_path(path) {
            Ok(Some(id)) => state.records.remove(&id).is_some(),
            _ => false,
        }
    }
}
