//! Testing utilities for the scalpel workspace
//!
//! Shared fixtures and helpers.

#![allow(missing_docs)]

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use facet::Facet;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Default, Facet)]
#[facet(rename_all = "PascalCase")]
pub struct PlayerData {
    pub uuid: String,
    pub sign: SignInfo,
    pub some_data: SomeData,
    pub array: Vec<i32>,
    pub map: HashMap<i32, i32>,
    pub map_slice: HashMap<i32, Vec<i32>>,
    pub map_map: HashMap<i32, HashMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Default, Facet)]
#[facet(rename_all = "PascalCase")]
pub struct SomeData {
    pub id: i32,
    pub uuid: String,
    pub pool: HashMap<i32, SignInfo>,
}

#[derive(Debug, Clone, PartialEq, Default, Facet)]
#[facet(rename_all = "PascalCase")]
pub struct SignInfo {
    pub rewards: Vec<Reward>,
    pub day: i32,
}

#[derive(Debug, Clone, PartialEq, Default, Facet)]
#[facet(rename_all = "PascalCase")]
pub struct Reward {
    pub category: i32,
    pub conf_id: i32,
    pub amount: i64,
}

pub fn reward(category: i32, conf_id: i32, amount: i64) -> Reward {
    Reward {
        category,
        conf_id,
        amount,
    }
}

pub fn sign_info(day: i32, rewards: Vec<Reward>) -> SignInfo {
    SignInfo { rewards, day }
}

/// Player with every container kind populated
pub fn create_test_player() -> PlayerData {
    PlayerData {
        uuid: "player_1".to_string(),
        sign: sign_info(1, vec![reward(1, 1, 100), reward(2, 2, 1000)]),
        some_data: SomeData {
            id: 100,
            uuid: "100".to_string(),
            pool: HashMap::from([
                (1, sign_info(1, vec![reward(1, 1, 100), reward(2, 2, 1000)])),
                (2, sign_info(2, vec![reward(11, 11, 100), reward(22, 22, 1000)])),
            ]),
        },
        array: vec![1, 2, 3],
        map: HashMap::from([(1, 100), (2, 200)]),
        map_slice: HashMap::from([(1, vec![1, 2, 3])]),
        map_map: HashMap::from([
            (1, string_map(&[("apple", "good"), ("orange", "nice")])),
            (2, string_map(&[("dog", "cute"), ("frog", "immortal")])),
        ]),
    }
}

fn string_map(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Account whose fields sit behind references
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Account {
    pub id: u64,
    pub nickname: Option<String>,
    pub profile: Box<Profile>,
    pub settings: Arc<Settings>,
    pub flags: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Profile {
    pub level: u8,
    pub rating: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Settings {
    pub volume: f64,
    pub muted: bool,
}

pub fn create_test_account() -> Account {
    Account {
        id: 42,
        nickname: Some("owl".to_string()),
        profile: Box::new(Profile {
            level: 3,
            rating: 0.5,
        }),
        settings: Arc::new(Settings {
            volume: 0.8,
            muted: false,
        }),
        flags: BTreeMap::from([("beta".to_string(), false)]),
    }
}

/// Install a test-writer subscriber filtered by `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
