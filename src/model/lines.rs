//! Revenue, COGS and OpEx line-item tables

use serde::{Deserialize, Serialize};

use super::keys::define_key_enum;
use super::yearly::YearlyValues;

define_key_enum!(RevenueLine, "revenue", {
    Subscriptions => "subscriptions",
    AiTools => "aiTools",
    Advertising => "advertising",
    Enterprise => "enterprise",
});

define_key_enum!(CogsLine, "cogs", {
    HostingAi => "hostingAI",
    VideoProcessing => "videoProcessing",
    PaymentFees => "paymentFees",
});

define_key_enum!(OpExLine, "opex", {
    ProductEngineering => "productEngineering",
    SalesMarketing => "salesMarketing",
    Gna => "gna",
    CustomerSuccess => "customerSuccess",
    Contractors => "contractors",
});

/// One replacement within the revenue table
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevenueUpdate {
    Line(RevenueLine, YearlyValues),
    EnterpriseEnabled(bool),
}

/// Revenue lines plus the enterprise gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueModel {
    pub subscriptions: YearlyValues,
    pub ai_tools: YearlyValues,
    pub advertising: YearlyValues,
    pub enterprise: YearlyValues,
    pub enterprise_enabled: bool,
}

impl RevenueModel {
    /// Launch plan used for a fresh session
    pub fn default_plan() -> Self {
        Self {
            subscriptions: YearlyValues::new(480_000.0, 1_200_000.0, 2_880_000.0),
            ai_tools: YearlyValues::new(120_000.0, 360_000.0, 840_000.0),
            advertising: YearlyValues::new(60_000.0, 240_000.0, 720_000.0),
            enterprise: YearlyValues::new(0.0, 100_000.0, 400_000.0),
            enterprise_enabled: true,
        }
    }

    pub fn line(&self, line: RevenueLine) -> &YearlyValues {
        match line {
            RevenueLine::Subscriptions => &self.subscriptions,
            RevenueLine::AiTools => &self.ai_tools,
            RevenueLine::Advertising => &self.advertising,
            RevenueLine::Enterprise => &self.enterprise,
        }
    }

    pub fn line_mut(&mut self, line: RevenueLine) -> &mut YearlyValues {
        match line {
            RevenueLine::Subscriptions => &mut self.subscriptions,
            RevenueLine::AiTools => &mut self.ai_tools,
            RevenueLine::Advertising => &mut self.advertising,
            RevenueLine::Enterprise => &mut self.enterprise,
        }
    }

    /// Total revenue; enterprise counts only while the gate is on
    pub fn total(&self) -> YearlyValues {
        let base = YearlyValues::sum([&self.subscriptions, &self.ai_tools, &self.advertising]);
        if self.enterprise_enabled {
            base.zip_with(&self.enterprise, |a, b| a + b)
        } else {
            base
        }
    }
}

/// Cost of goods sold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CogsModel {
    #[serde(rename = "hostingAI")]
    pub hosting_ai: YearlyValues,
    pub video_processing: YearlyValues,
    pub payment_fees: YearlyValues,
}

impl CogsModel {
    pub fn default_plan() -> Self {
        Self {
            hosting_ai: YearlyValues::new(72_000.0, 180_000.0, 360_000.0),
            video_processing: YearlyValues::new(24_000.0, 72_000.0, 168_000.0),
            // 3% of gross revenue
            payment_fees: YearlyValues::new(19_800.0, 57_000.0, 145_200.0),
        }
    }

    pub fn line(&self, line: CogsLine) -> &YearlyValues {
        match line {
            CogsLine::HostingAi => &self.hosting_ai,
            CogsLine::VideoProcessing => &self.video_processing,
            CogsLine::PaymentFees => &self.payment_fees,
        }
    }

    pub fn line_mut(&mut self, line: CogsLine) -> &mut YearlyValues {
        match line {
            CogsLine::HostingAi => &mut self.hosting_ai,
            CogsLine::VideoProcessing => &mut self.video_processing,
            CogsLine::PaymentFees => &mut self.payment_fees,
        }
    }

    pub fn total(&self) -> YearlyValues {
        YearlyValues::sum(CogsLine::ALL.iter().map(|&l| self.line(l)))
    }
}

/// Operating expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpExModel {
    pub product_engineering: YearlyValues,
    pub sales_marketing: YearlyValues,
    pub gna: YearlyValues,
    pub customer_success: YearlyValues,
    pub contractors: YearlyValues,
}

impl OpExModel {
    pub fn default_plan() -> Self {
        Self {
            product_engineering: YearlyValues::new(360_000.0, 720_000.0, 1_200_000.0),
            sales_marketing: YearlyValues::new(180_000.0, 450_000.0, 900_000.0),
            gna: YearlyValues::new(96_000.0, 180_000.0, 300_000.0),
            customer_success: YearlyValues::new(60_000.0, 120_000.0, 240_000.0),
            contractors: YearlyValues::new(72_000.0, 96_000.0, 120_000.0),
        }
    }

    pub fn line(&self, line: OpExLine) -> &YearlyValues {
        match line {
            OpExLine::ProductEngineering => &self.product_engineering,
            OpExLine::SalesMarketing => &self.sales_marketing,
            OpExLine::Gna => &self.gna,
            OpExLine::CustomerSuccess => &self.customer_success,
            OpExLine::Contractors => &self.contractors,
        }
    }

    pub fn line_mut(&mut self, line: OpExLine) -> &mut YearlyValues {
        match line {
            OpExLine::ProductEngineering => &mut self.product_engineering,
            OpExLine::SalesMarketing => &mut self.sales_marketing,
            OpExLine::Gna => &mut self.gna,
            OpExLine::CustomerSuccess => &mut self.customer_success,
            OpExLine::Contractors => &mut self.contractors,
        }
    }

    pub fn total(&self) -> YearlyValues {
        YearlyValues::sum(OpExLine::ALL.iter().map(|&l| self.line(l)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;

    #[test]
    fn test_default_revenue_total() {
        let revenue = RevenueModel::default_plan();
        assert_eq!(revenue.total(), YearlyValues::new(660_000.0, 1_900_000.0, 4_840_000.0));
        assert_eq!(revenue.total().year2, 1_200_000.0 + 360_000.0 + 240_000.0 + 100_000.0);
    }

    #[test]
    fn test_enterprise_gate() {
        let mut revenue = RevenueModel::default_plan();
        let enabled = revenue.total();
        revenue.enterprise_enabled = false;
        let disabled = revenue.total();
        assert_eq!(enabled.year3 - disabled.year3, revenue.enterprise.year3);

        revenue.enterprise.year3 = 9_999_999.0;
        assert_eq!(revenue.total(), disabled);
    }

    #[test]
    fn test_default_cost_totals() {
        assert_eq!(CogsModel::default_plan().total().year1, 115_800.0);
        assert_eq!(OpExModel::default_plan().total().year1, 768_000.0);
    }

    #[test]
    fn test_key_parsing() {
        assert_eq!("aiTools".parse::<RevenueLine>().unwrap(), RevenueLine::AiTools);
        assert_eq!("hostingAI".parse::<CogsLine>().unwrap(), CogsLine::HostingAi);
        assert_eq!(OpExLine::Gna.to_string(), "gna");

        match "payroll".parse::<OpExLine>() {
            Err(ForecastError::UnknownKey { section, key }) => {
                assert_eq!(section, "opex");
                assert_eq!(key, "payroll");
            }
            other => panic!("expected UnknownKey, got {:?}", other),
        }
    }

    #[test]
    fn test_serialized_keys_match_line_keys() {
        let json = serde_json::to_value(CogsModel::default_plan()).unwrap();
        for line in CogsLine::ALL {
            assert!(json.get(line.key()).is_some(), "missing {}", line.key());
        }
        let json = serde_json::to_value(RevenueModel::default_plan()).unwrap();
        for line in RevenueLine::ALL {
            assert!(json.get(line.key()).is_some(), "missing {}", line.key());
        }
        assert_eq!(json["enterpriseEnabled"], serde_json::json!(true));
    }
}
