/*
 * Responsibility
 * - Advisory request/response DTOs
 * - validate() for shape checks before anything reaches the orchestrator
 */
use serde::{Deserialize, Serialize};

use crate::services::advisory::AdvisoryProfile;

#[derive(Debug, Deserialize)]
pub struct AdviceRequest {
    pub balance: i64,
    pub experience: String,
    pub preference: String,
    pub liquidity: String,
    pub risk_bearing: String,
    pub minimum_freezing_period: i64,
    #[serde(default)]
    pub query_type: Option<String>,
}

impl AdviceRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.balance < 0 {
            return Err("balance must be >= 0");
        }
        if self.minimum_freezing_period < 0 {
            return Err("minimum_freezing_period must be >= 0");
        }
        for (value, message) in [
            (&self.experience, "experience is required"),
            (&self.preference, "preference is required"),
            (&self.liquidity, "liquidity is required"),
            (&self.risk_bearing, "risk_bearing is required"),
        ] {
            if value.trim().is_empty() {
                return Err(message);
            }
        }

        Ok(())
    }

    pub fn into_profile(self) -> AdvisoryProfile {
        AdvisoryProfile {
            balance: self.balance,
            experience: self.experience,
            preference: self.preference,
            liquidity: self.liquidity,
            risk_bearing: self.risk_bearing,
            minimum_freezing_period: self.minimum_freezing_period,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdvisoryResponse {
    pub response: String,
}
