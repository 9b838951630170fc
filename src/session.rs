// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::RemoteApi;
use crate::buildings::building;
use crate::config::Config;
use crate::models::Building;
use crate::store::Store;
use anyhow::Result;

/// Everything a command needs: the session store, the backend stub and the
/// building currently selected.
pub struct Session {
    pub store: Store,
    pub api: RemoteApi,
    building_id: String,
}

impl Session {
    pub fn new(cfg: &Config) -> Result<Self> {
        Ok(Self {
            store: Store::new(cfg.today)?,
            api: RemoteApi::new(cfg.latency),
            building_id: cfg.building.clone(),
        })
    }

    pub fn from_parts(store: Store, api: RemoteApi, building_id: &str) -> Result<Self> {
        building(building_id)?;
        Ok(Self {
            store,
            api,
            building_id: building_id.to_string(),
        })
    }

    pub fn building_id(&self) -> &str {
        &self.building_id
    }

    pub fn building(&self) -> Result<&'static Building> {
        Ok(building(&self.building_id)?)
    }

    pub fn select(&mut self, building_id: &str) -> Result<&'static Building> {
        let b = building(building_id)?;
        self.building_id = b.id.to_string();
        tracing::info!(building = b.id, "selected building");
        Ok(b)
    }
}
