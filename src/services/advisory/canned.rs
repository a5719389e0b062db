//! Canned advisories served in degraded mode.
//!
//! The choice between the two fixed texts is a plain content sniff of the prompt:
//! investment-planning prompts expect a JSON allocation list, everything else
//! gets a prose block.
use async_trait::async_trait;

use crate::services::advisory::backend::{AdvisoryBackend, GenerationError};

const ALLOCATION_MARKERS: [&str; 2] = ["investment recommendation", "Investment Preference"];

pub const CANNED_ALLOCATIONS: &str = r#"[
  {
    "investment_option": "S&P 500 Index Fund (VOO)",
    "allocation": "40%",
    "liquidity": "high",
    "risk": "medium"
  },
  {
    "investment_option": "Total Bond Market (BND)",
    "allocation": "30%",
    "liquidity": "high",
    "risk": "low"
  },
  {
    "investment_option": "International Stocks (VXUS)",
    "allocation": "20%",
    "liquidity": "high",
    "risk": "medium"
  },
  {
    "investment_option": "High-Yield Savings Account",
    "allocation": "10%",
    "liquidity": "very high",
    "risk": "very low"
  }
]"#;

pub const CANNED_ANALYSIS: &str = "Based on your financial profile, here are my recommendations:

**Investment Strategy:**
- Diversify your portfolio across different asset classes
- Consider a balanced approach with 60% stocks and 40% bonds
- Focus on low-cost index funds for long-term growth

**Risk Management:**
- Maintain an emergency fund covering 6 months of expenses
- Review and rebalance your portfolio quarterly
- Consider your risk tolerance and investment horizon

**Next Steps:**
1. Start with broad market index funds
2. Set up automatic monthly contributions
3. Monitor your investments regularly but avoid emotional decisions

Note: This is a placeholder response served while the advisory backend is unavailable.";

pub fn canned_advice(prompt: &str) -> &'static str {
    if ALLOCATION_MARKERS.iter().any(|m| prompt.contains(m)) {
        CANNED_ALLOCATIONS
    } else {
        CANNED_ANALYSIS
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CannedBackend;

#[async_trait]
impl AdvisoryBackend for CannedBackend {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        Ok(canned_advice(prompt).to_string())
    }
}
