use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::LedgerConfig;
use crate::error::{LedgerError, LedgerResult};
use crate::model::Campaign;
use crate::ops::LedgerOp;
use crate::store::{JsonFileStore, MemoryStore, Store};

/// Name given to an imported campaign that carries none.
pub const IMPORTED_CAMPAIGN: &str = "imported";

type Cell = Arc<Mutex<Campaign>>;

fn lock(cell: &Mutex<Campaign>) -> MutexGuard<'_, Campaign> {
    cell.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Export/import payload: a campaign tagged with the active campaign name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSnapshot {
    /// Name of the campaign the snapshot was taken from.
    pub current_campaign: String,
    /// The campaign itself.
    #[serde(flatten)]
    pub campaign: Campaign,
}

/// Every campaign of a process, one of them active.
///
/// Lock order is active name, campaign map, one campaign, store. Campaign
/// transactions take only the last two.
pub struct Ledger {
    store: Arc<dyn Store>,
    current: RwLock<String>,
    campaigns: RwLock<BTreeMap<String, Cell>>,
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("current", &self.current_name())
            .field("campaigns", &self.list_campaigns())
            .finish_non_exhaustive()
    }
}

impl Ledger {
    /// Open the backend `config` selects.
    pub fn open(config: &LedgerConfig) -> LedgerResult<Self> {
        let store: Arc<dyn Store> = match &config.path {
            Some(path) => Arc::new(JsonFileStore::open(path)?),
            None => Arc::new(MemoryStore::new()),
        };
        Self::with_store(store, &config.default_campaign)
    }

    /// Open on an existing store. An empty store gets a fresh
    /// `default_campaign`, which becomes active.
    pub fn with_store(store: Arc<dyn Store>, default_campaign: &str) -> LedgerResult<Self> {
        let mut root = store.load()?;
        if root.campaigns.is_empty() {
            let campaign = Campaign::default();
            store.save_campaign(default_campaign, &campaign)?;
            root.campaigns.insert(default_campaign.to_string(), campaign);
        }
        if !root.campaigns.contains_key(&root.current_campaign) {
            let fallback = if root.campaigns.contains_key(default_campaign) {
                default_campaign.to_string()
            } else {
                root.campaigns.keys().next().cloned().unwrap_or_default()
            };
            store.save_current(&fallback)?;
            root.current_campaign = fallback;
        }
        info!(
            current = %root.current_campaign,
            campaigns = root.campaigns.len(),
            "ledger opened"
        );
        let campaigns = root
            .campaigns
            .into_iter()
            .map(|(name, c)| (name, Arc::new(Mutex::new(c))))
            .collect();
        Ok(Self {
            store,
            current: RwLock::new(root.current_campaign),
            campaigns: RwLock::new(campaigns),
        })
    }

    /// Name of the active campaign.
    pub fn current_name(&self) -> String {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Names of every campaign, sorted.
    pub fn list_campaigns(&self) -> Vec<String> {
        self.campaigns
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Handle to a campaign by name.
    pub fn campaign(&self, name: &str) -> LedgerResult<CampaignHandle> {
        let cell = self
            .campaigns
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| LedgerError::not_found("campaign", name))?;
        Ok(CampaignHandle {
            name: name.to_string(),
            cell,
            store: Arc::clone(&self.store),
        })
    }

    /// Handle to the active campaign.
    pub fn active(&self) -> LedgerResult<CampaignHandle> {
        self.campaign(&self.current_name())
    }

    /// Create (or reset) a campaign with defaults and make it active.
    pub fn create_campaign(&self, name: &str) -> LedgerResult<CampaignHandle> {
        self.install(name, Campaign::default())?;
        info!(campaign = name, "campaign created");
        self.campaign(name)
    }

    /// Make an existing campaign active.
    pub fn switch_campaign(&self, name: &str) -> LedgerResult<()> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if !self
            .campaigns
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
        {
            return Err(LedgerError::not_found("campaign", name));
        }
        self.store.save_current(name)?;
        *current = name.to_string();
        info!(campaign = name, "campaign switched");
        Ok(())
    }

    /// Snapshot the active campaign.
    pub fn export(&self) -> LedgerResult<CampaignSnapshot> {
        let handle = self.active()?;
        let campaign = handle.snapshot();
        Ok(CampaignSnapshot {
            current_campaign: handle.name,
            campaign,
        })
    }

    /// Install a campaign payload and make it active.
    ///
    /// The name is `name` if given, else the payload's `currentCampaign`,
    /// else `"imported"`. An existing campaign of that name is replaced.
    pub fn import(
        &self,
        payload: serde_json::Value,
        name: Option<&str>,
    ) -> LedgerResult<CampaignHandle> {
        let serde_json::Value::Object(mut fields) = payload else {
            return Err(LedgerError::InvalidArgument(
                "import payload must be a JSON object".into(),
            ));
        };
        let tagged = fields
            .remove("currentCampaign")
            .and_then(|v| v.as_str().map(str::to_string));
        let name = name
            .map(str::to_string)
            .or(tagged)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| IMPORTED_CAMPAIGN.to_string());
        let campaign: Campaign = serde_json::from_value(serde_json::Value::Object(fields))
            .map_err(|e| LedgerError::InvalidArgument(format!("malformed campaign: {e}")))?;
        campaign.validate()?;
        self.install(&name, campaign)?;
        info!(campaign = %name, "campaign imported");
        self.campaign(&name)
    }

    /// Flush the store. The ledger stays usable.
    pub fn close(&self) -> LedgerResult<()> {
        debug!("ledger closed");
        self.store.flush()
    }

    fn install(&self, name: &str, campaign: Campaign) -> LedgerResult<()> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let existing = self
            .campaigns
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned();
        match existing {
            Some(cell) => {
                let mut guard = lock(&cell);
                self.store.save_campaign(name, &campaign)?;
                *guard = campaign;
            }
            None => {
                let mut map = self.campaigns.write().unwrap_or_else(PoisonError::into_inner);
                self.store.save_campaign(name, &campaign)?;
                map.insert(name.to_string(), Arc::new(Mutex::new(campaign)));
            }
        }
        self.store.save_current(name)?;
        *current = name.to_string();
        Ok(())
    }
}

/// A shared reference to one campaign.
///
/// Cloning is cheap; all clones serialize on the same lock.
#[derive(Clone)]
pub struct CampaignHandle {
    name: String,
    cell: Cell,
    store: Arc<dyn Store>,
}

impl std::fmt::Debug for CampaignHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CampaignHandle")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl CampaignHandle {
    /// Campaign name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A consistent copy of the campaign.
    pub fn snapshot(&self) -> Campaign {
        lock(&self.cell).clone()
    }

    /// Read the campaign under its lock.
    pub fn read<T>(&self, f: impl FnOnce(&Campaign) -> T) -> T {
        f(&lock(&self.cell))
    }

    /// Run a read-modify-write cycle as one atomic step.
    ///
    /// `f` works on a draft. If it fails, or persisting the draft fails,
    /// the campaign is left exactly as it was. No other transaction on
    /// this campaign can interleave.
    pub fn transact<T>(&self, f: impl FnOnce(&mut Campaign) -> LedgerResult<T>) -> LedgerResult<T> {
        let mut guard = lock(&self.cell);
        let mut draft = guard.clone();
        let out = f(&mut draft)?;
        self.store.save_campaign(&self.name, &draft)?;
        *guard = draft;
        Ok(out)
    }

    /// Apply one direct operation. Returns the updated campaign.
    pub fn apply(&self, op: &LedgerOp) -> LedgerResult<Campaign> {
        let updated = self.transact(|c| {
            c.apply(op)?;
            Ok(c.clone())
        })?;
        debug!(campaign = %self.name, op = op.name(), "operation committed");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use gm_mechanics::Clock;

    use super::*;
    use crate::error::ErrorKind;
    use crate::model::{Counter, Harm, Scope};

    fn memory() -> Ledger {
        Ledger::open(&LedgerConfig::default()).unwrap()
    }

    #[test]
    fn fresh_ledger_has_default_campaign() {
        let ledger = memory();
        assert_eq!(ledger.current_name(), "default");
        assert_eq!(ledger.list_campaigns(), vec!["default"]);
    }

    #[test]
    fn create_resets_and_activates() {
        let ledger = memory();
        let doskvol = ledger.create_campaign("Doskvol").unwrap();
        doskvol
            .apply(&LedgerOp::AdjustMeta {
                counter: Counter::Heat,
                delta: 3,
            })
            .unwrap();
        assert_eq!(ledger.current_name(), "Doskvol");

        ledger.switch_campaign("default").unwrap();
        ledger.create_campaign("Doskvol").unwrap();
        assert_eq!(ledger.current_name(), "Doskvol");
        // handles taken before the reset see the fresh state
        assert_eq!(doskvol.snapshot().heat, 0);
    }

    #[test]
    fn switch_to_unknown_is_not_found_and_changes_nothing() {
        let ledger = memory();
        let err = ledger.switch_campaign("Nowhere").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(ledger.current_name(), "default");
        assert_eq!(ledger.list_campaigns(), vec!["default"]);
    }

    #[test]
    fn failed_fill_leaves_state_unchanged() {
        let ledger = memory();
        let active = ledger.active().unwrap();
        let before = active.snapshot();
        let err = active
            .transact(|c| {
                c.adjust(Counter::Rep, 5);
                c.fill_clock(&Scope::Campaign, "Missing", 1)
            })
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(active.snapshot(), before);
    }

    #[test]
    fn export_import_round_trip_is_exact() {
        let ledger = memory();
        let active = ledger.active().unwrap();
        active
            .transact(|c| {
                c.heat = 3;
                c.clocks.push(Clock::new("Alarm", 6));
                c.player_mut("Anna").harms.push(Harm::new(2, "Cut", None));
                c.crew
                    .upgrades
                    .insert("Vault".into(), serde_json::json!({"level": 2}));
                Ok(())
            })
            .unwrap();

        let exported = serde_json::to_string(&ledger.export().unwrap()).unwrap();
        let payload: serde_json::Value = serde_json::from_str(&exported).unwrap();
        ledger.import(payload, Some("copy")).unwrap();
        assert_eq!(ledger.current_name(), "copy");

        let mut again = ledger.export().unwrap();
        assert_eq!(again.current_campaign, "copy");
        again.current_campaign = "default".into();
        assert_eq!(serde_json::to_string(&again).unwrap(), exported);
    }

    #[test]
    fn export_names_the_active_campaign() {
        let ledger = memory();
        let crows = ledger.create_campaign("Crows").unwrap();
        crows
            .apply(&LedgerOp::SetStress {
                name: "Anna".into(),
                value: 2,
            })
            .unwrap();
        let snapshot = ledger.export().unwrap();
        assert_eq!(snapshot.current_campaign, ledger.current_name());
        assert_eq!(snapshot.campaign, crows.snapshot());
    }

    #[test]
    fn import_rejects_broken_invariants() {
        let ledger = memory();
        let payloads = [
            serde_json::json!({"clocks": [{"name": "A", "segments": 0, "filled": 0}]}),
            serde_json::json!({"clocks": [{"name": "A", "segments": 4, "filled": 5}]}),
            serde_json::json!({"factions": {"Bluecoats": {"clocks": [{"name": "C", "segments": 2, "filled": 3}]}}}),
            serde_json::json!({"players": {"Anna": {"stress": 42}}}),
            serde_json::json!({"players": {"Anna": {"stress": -1}}}),
            serde_json::json!({"players": {"Anna": {"harms": [{"level": 4, "label": "Crushed"}]}}}),
            serde_json::json!({"config": {"houseRules": {"advanceThresholdPlayer": 0}}}),
        ];
        for payload in payloads {
            let err = ledger.import(payload.clone(), Some("bad")).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{payload}");
        }
        assert_eq!(ledger.list_campaigns(), vec!["default"]);
        assert_eq!(ledger.current_name(), "default");
    }

    #[test]
    fn import_names() {
        let ledger = memory();
        ledger
            .import(serde_json::json!({"currentCampaign": "Tagged", "heat": 1}), None)
            .unwrap();
        assert_eq!(ledger.current_name(), "Tagged");
        ledger.import(serde_json::json!({"rep": 2}), None).unwrap();
        assert_eq!(ledger.current_name(), IMPORTED_CAMPAIGN);
        assert_eq!(ledger.active().unwrap().snapshot().rep, 2);
    }

    #[test]
    fn import_rejects_non_objects() {
        let ledger = memory();
        let err = ledger.import(serde_json::json!([1, 2]), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = ledger
            .import(serde_json::json!({"heat": "hot"}), None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(ledger.list_campaigns(), vec!["default"]);
    }

    #[test]
    fn state_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let config = LedgerConfig::default().with_path(dir.path().join("gm.json"));
        {
            let ledger = Ledger::open(&config).unwrap();
            let c = ledger.create_campaign("Crows").unwrap();
            c.apply(&LedgerOp::SetStress {
                name: "Anna".into(),
                value: 4,
            })
            .unwrap();
            ledger.close().unwrap();
        }
        let ledger = Ledger::open(&config).unwrap();
        assert_eq!(ledger.current_name(), "Crows");
        let anna = ledger.active().unwrap().snapshot().players["Anna"].clone();
        assert_eq!(anna.stress, 4);
    }

    #[test]
    fn concurrent_writers_lose_no_updates() {
        let ledger = Arc::new(memory());
        ledger.create_campaign("other").unwrap();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || {
                    let name = if i % 2 == 0 { "default" } else { "other" };
                    let c = ledger.campaign(name).unwrap();
                    for _ in 0..50 {
                        c.apply(&LedgerOp::AdjustMeta {
                            counter: Counter::Coin,
                            delta: 1,
                        })
                        .unwrap();
                        c.apply(&LedgerOp::AddCrewXp { n: 1 }).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        for name in ["default", "other"] {
            let c = ledger.campaign(name).unwrap().snapshot();
            assert_eq!(c.coin, 2 + 200);
            assert_eq!(c.crew.advances * 8 + c.crew.xp, 200);
        }
    }
}
